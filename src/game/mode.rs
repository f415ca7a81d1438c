//! Game mode metadata.

use serde::{Deserialize, Serialize};

/// Opaque reference to a presentation component.
///
/// The UI layer decides what the key means and resolves it to something it
/// can render. This crate only stores and republishes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentKey(String);

impl ComponentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the resolver on the presentation side.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One selectable mode of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMode {
    pub name: String,
    pub description: String,
    pub component: ComponentKey,
}

impl GameMode {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        component: ComponentKey,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            component,
        }
    }
}
