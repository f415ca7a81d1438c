//! JavaScript bridge. Exposes one `GameSession` to the browser host.
//!
//! Numbers cross the boundary as JS numbers. Game modes, maps and snapshots
//! cross as JSON strings, with `"null"` meaning "not set". JS callbacks are
//! driven by the same `Store` notification passes as Rust observers; a
//! callback that throws is logged and the next one still runs.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::StateError;
use crate::game::{GameMode, GameSession, MapData};
use crate::store::Subscription;

// ── JSON boundary ──────────────────────────────────────────────────

/// Decode a game mode, `"null"` clears it.
pub fn decode_game_mode(json: &str) -> Result<Option<GameMode>, StateError> {
    serde_json::from_str(json).map_err(|source| StateError::Json {
        what: "game mode",
        source,
    })
}

/// Decode a map, `"null"` clears it. Region ids are validated.
pub fn decode_map(json: &str) -> Result<Option<MapData>, StateError> {
    serde_json::from_str(json).map_err(|source| StateError::Json { what: "map", source })
}

/// Encode a value for JS. Falls back to `"null"`.
pub fn encode_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn call_js(callback: &Function, store: &'static str, value: &JsValue) {
    if let Err(err) = callback.call1(&JsValue::NULL, value) {
        tracing::warn!(store, error = ?err, "JS observer threw");
    }
}

// ── Session handle ─────────────────────────────────────────────────

/// JS-owned handle to a game session.
#[wasm_bindgen]
pub struct GameSessionHandle {
    session: GameSession,
}

impl Default for GameSessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSessionHandle {
    /// Wrap an existing session so Rust and JS components share it.
    pub fn from_session(session: GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

#[wasm_bindgen]
impl GameSessionHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_session(GameSession::new())
    }

    // ── score / time ───────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.session.score.get()
    }

    pub fn set_score(&self, score: u32) {
        self.session.score.set(score);
    }

    pub fn add_points(&self, points: u32) {
        self.session.add_points(points);
    }

    pub fn game_time(&self) -> u32 {
        self.session.game_time.get()
    }

    pub fn set_game_time(&self, seconds: u32) {
        self.session.game_time.set(seconds);
    }

    pub fn tick(&self) {
        self.session.tick();
    }

    pub fn reset(&self) {
        self.session.reset();
    }

    // ── structured values ──────────────────────────────────────────

    pub fn game_mode_json(&self) -> String {
        self.session.game_mode.with(encode_json)
    }

    /// Replace the game mode. Invalid JSON leaves the store untouched.
    pub fn set_game_mode_json(&self, json: &str) -> Result<(), JsError> {
        let mode = decode_game_mode(json)
            .inspect_err(|e| tracing::debug!(error = %e, "rejected game mode"))?;
        self.session.game_mode.set(mode);
        Ok(())
    }

    pub fn current_map_json(&self) -> String {
        self.session.current_map.with(encode_json)
    }

    /// Replace the current map. Invalid JSON or duplicate region ids leave
    /// the store untouched.
    pub fn set_current_map_json(&self, json: &str) -> Result<(), JsError> {
        let map = decode_map(json).inspect_err(|e| tracing::debug!(error = %e, "rejected map"))?;
        self.session.current_map.set(map);
        Ok(())
    }

    pub fn snapshot_json(&self) -> String {
        encode_json(&self.session.snapshot())
    }

    // ── subscriptions ──────────────────────────────────────────────

    pub fn subscribe_score(&self, callback: Function) -> SubscriptionHandle {
        let sub = self
            .session
            .score
            .subscribe(move |v| call_js(&callback, "score", &JsValue::from(*v)));
        SubscriptionHandle { inner: sub }
    }

    pub fn subscribe_game_time(&self, callback: Function) -> SubscriptionHandle {
        let sub = self
            .session
            .game_time
            .subscribe(move |v| call_js(&callback, "game_time", &JsValue::from(*v)));
        SubscriptionHandle { inner: sub }
    }

    /// Callback receives the mode as a JSON string.
    pub fn subscribe_game_mode(&self, callback: Function) -> SubscriptionHandle {
        let sub = self.session.game_mode.subscribe(move |m| {
            call_js(&callback, "game_mode", &JsValue::from_str(&encode_json(m)))
        });
        SubscriptionHandle { inner: sub }
    }

    /// Callback receives the map as a JSON string.
    pub fn subscribe_current_map(&self, callback: Function) -> SubscriptionHandle {
        let sub = self.session.current_map.subscribe(move |m| {
            call_js(&callback, "current_map", &JsValue::from_str(&encode_json(m)))
        });
        SubscriptionHandle { inner: sub }
    }
}

/// Returned to JS by the `subscribe_*` methods.
#[wasm_bindgen]
pub struct SubscriptionHandle {
    inner: Subscription,
}

#[wasm_bindgen]
impl SubscriptionHandle {
    /// Stop notifications. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        self.inner.unsubscribe();
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ComponentKey;

    const MAP_JSON: &str = r#"{"name":"Baltics","regions":[{"id":"ee","name":"Estonia","d":"M0 0"},{"id":"lv","name":"Latvia","d":"M0 1"}]}"#;

    #[test]
    fn decode_null_clears() {
        assert_eq!(decode_game_mode("null").unwrap(), None);
        assert_eq!(decode_map("null").unwrap(), None);
    }

    #[test]
    fn decode_game_mode_json() {
        let mode = decode_game_mode(r#"{"name":"Flags","description":"Match flags","component":"flags"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(mode.component, ComponentKey::new("flags"));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_game_mode("not valid json {{{").unwrap_err();
        assert!(err.to_string().starts_with("invalid game mode JSON"));
    }

    #[test]
    fn decode_map_rejects_duplicate_regions() {
        let err = decode_map(
            r#"{"regions":[{"id":"ee","name":"Estonia","d":""},{"id":"ee","name":"Again","d":""}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate region id `ee`"));
    }

    #[test]
    fn handle_score_and_time() {
        let handle = GameSessionHandle::new();
        handle.set_score(10);
        handle.add_points(5);
        assert_eq!(handle.score(), 15);

        handle.tick();
        handle.tick();
        assert_eq!(handle.game_time(), 2);
        handle.set_game_time(60);
        assert_eq!(handle.game_time(), 60);

        handle.reset();
        assert_eq!(handle.score(), 0);
        assert_eq!(handle.game_time(), 0);
    }

    #[test]
    fn handle_structured_values_roundtrip_through_json() {
        let handle = GameSessionHandle::new();
        assert_eq!(handle.game_mode_json(), "null");
        assert_eq!(handle.current_map_json(), "null");

        assert!(handle.set_current_map_json(MAP_JSON).is_ok());
        let map = handle.session().current_map.get().unwrap();
        assert_eq!(map.name(), Some("Baltics"));
        assert_eq!(map.len(), 2);
        assert!(handle.current_map_json().contains(r#""id":"lv""#));

        assert!(handle.set_current_map_json("null").is_ok());
        assert_eq!(handle.session().current_map.get(), None);
    }

    #[test]
    fn handle_shares_session_with_rust_side() {
        let session = GameSession::new();
        let handle = GameSessionHandle::from_session(session.clone());
        session.add_points(7);
        assert_eq!(handle.score(), 7);
        assert!(handle.snapshot_json().contains(r#""score":7"#));
    }
}
