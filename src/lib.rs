//! Shared front-end state for the browser map game.
//!
//! The crate holds the state that rendering, routing and game-logic code
//! read and write: the selected game mode, the score, the elapsed game time
//! and the loaded map. Each lives in its own [`Store`], bundled into a
//! [`GameSession`] that the host creates and passes to whoever needs it.
//!
//! Rust components use [`GameSession`] directly. The JS host goes through
//! [`bridge::GameSessionHandle`], exported via wasm-bindgen.

pub mod bridge;
pub mod error;
pub mod game;
pub mod store;

pub use error::StateError;
pub use game::{ComponentKey, GameMode, GameSession, MapData, Region, SessionSnapshot};
pub use store::{Store, Subscription, WeakStore};
