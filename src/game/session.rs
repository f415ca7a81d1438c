//! Per-game shared state: mode, score, elapsed time and map.
//!
//! A `GameSession` is created by the host and handed to whichever UI or
//! game-logic components need it. The four stores are independent; a
//! component that only cares about the score gets `session.score.clone()`.

use serde::Serialize;

use crate::game::map::MapData;
use crate::game::mode::GameMode;
use crate::store::Store;

/// The four state containers the front-end shares.
///
/// Cloning a session clones the handles, not the state.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Selected mode, `None` until the player picks one.
    pub game_mode: Store<Option<GameMode>>,
    pub score: Store<u32>,
    /// Elapsed game time in seconds.
    pub game_time: Store<u32>,
    /// Loaded map, `None` until one is loaded.
    pub current_map: Store<Option<MapData>>,
}

/// Point-in-time copy of a session, for the JS bridge and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub game_mode: Option<GameMode>,
    pub score: u32,
    pub game_time: u32,
    pub current_map: Option<MapData>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            game_mode: Store::named("game_mode", None),
            score: Store::named("score", 0),
            game_time: Store::named("game_time", 0),
            current_map: Store::named("current_map", None),
        }
    }

    /// Add to the score, saturating at `u32::MAX`.
    pub fn add_points(&self, points: u32) {
        self.score.update(|s| s.saturating_add(points));
    }

    /// Advance the game clock by one second.
    pub fn tick(&self) {
        self.game_time.update(|t| t.saturating_add(1));
    }

    /// Start a new round: score and time back to 0. Mode and map are kept.
    pub fn reset(&self) {
        tracing::debug!("resetting score and game time");
        self.score.set(0);
        self.game_time.set(0);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_mode: self.game_mode.get(),
            score: self.score.get(),
            game_time: self.game_time.get(),
            current_map: self.current_map.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::Region;
    use crate::game::mode::ComponentKey;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mode(name: &str) -> GameMode {
        GameMode::new(name, format!("{} mode", name), ComponentKey::new(name))
    }

    #[test]
    fn starts_empty() {
        let session = GameSession::new();
        assert_eq!(session.game_mode.get(), None);
        assert_eq!(session.score.get(), 0);
        assert_eq!(session.game_time.get(), 0);
        assert!(session.current_map.get().is_none());
    }

    #[test]
    fn game_mode_subscription_lifecycle() {
        let session = GameSession::new();
        let seen: Rc<RefCell<Vec<Option<GameMode>>>> = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        let mut sub = session
            .game_mode
            .subscribe(move |m| seen_clone.borrow_mut().push(m.clone()));
        assert_eq!(*seen.borrow(), vec![None]);

        session.game_mode.set(Some(mode("A")));
        assert_eq!(*seen.borrow(), vec![None, Some(mode("A"))]);

        sub.unsubscribe();
        session.game_mode.set(Some(mode("B")));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(session.game_mode.get(), Some(mode("B")));
    }

    #[test]
    fn score_accumulates() {
        let session = GameSession::new();
        for _ in 0..3 {
            session.score.update(|s| s + 10);
        }
        assert_eq!(session.score.get(), 30);

        session.add_points(5);
        assert_eq!(session.score.get(), 35);
    }

    #[test]
    fn add_points_saturates() {
        let session = GameSession::new();
        session.score.set(u32::MAX - 1);
        session.add_points(10);
        assert_eq!(session.score.get(), u32::MAX);
    }

    #[test]
    fn tick_advances_clock() {
        let session = GameSession::new();
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let ticks_clone = Rc::clone(&ticks);
        let _sub = session.game_time.subscribe(move |t| ticks_clone.borrow_mut().push(*t));

        session.tick();
        session.tick();
        assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn stores_are_independent() {
        let session = GameSession::new();
        let score_calls = Rc::new(RefCell::new(0u32));
        let calls = Rc::clone(&score_calls);
        let _sub = session.score.subscribe(move |_| *calls.borrow_mut() += 1);

        session.tick();
        session.game_mode.set(Some(mode("A")));
        assert_eq!(*score_calls.borrow(), 1);
    }

    #[test]
    fn reset_keeps_mode_and_map() {
        let session = GameSession::new();
        let map = MapData::new(vec![Region::new("fi", "Finland", "M0 0")]).unwrap();
        session.game_mode.set(Some(mode("A")));
        session.current_map.set(Some(map.clone()));
        session.add_points(40);
        session.tick();

        session.reset();
        assert_eq!(session.score.get(), 0);
        assert_eq!(session.game_time.get(), 0);
        assert_eq!(session.game_mode.get(), Some(mode("A")));
        assert_eq!(session.current_map.get(), Some(map));
    }

    #[test]
    fn clone_shares_stores() {
        let session = GameSession::new();
        let other = session.clone();
        other.add_points(3);
        assert_eq!(session.score.get(), 3);
    }

    #[test]
    fn snapshot_serializes_all_fields() {
        let session = GameSession::new();
        session.add_points(20);
        let snap = session.snapshot();
        assert_eq!(snap.score, 20);

        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(
            json,
            r#"{"game_mode":null,"score":20,"game_time":0,"current_map":null}"#
        );
    }
}
