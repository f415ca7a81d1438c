//! Game data shapes shared with the map renderer and game logic,
//! plus the session that bundles the front-end's state stores.

pub mod map;
pub mod mode;
pub mod session;

pub use map::{MapData, Region};
pub use mode::{ComponentKey, GameMode};
pub use session::{GameSession, SessionSnapshot};
