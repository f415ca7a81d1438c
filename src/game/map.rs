//! Map data shapes: the regions the map renderer draws and the game logic
//! asks about.
//!
//! Region ids are checked once, when a `MapData` is built or decoded, so
//! every `MapData` in a store is known to have non-empty, unique ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// One drawable, selectable area of a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique within the owning map.
    pub id: String,
    /// Display name.
    pub name: String,
    /// SVG path commands (e.g. `"M10 10 L20 10 Z"`).
    #[serde(rename = "d")]
    pub path: String,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A playable map: ordered regions plus an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMapData")]
pub struct MapData {
    regions: Vec<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Unchecked wire form, validated into `MapData`.
#[derive(Deserialize)]
struct RawMapData {
    #[serde(default)]
    regions: Vec<Region>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawMapData> for MapData {
    type Error = StateError;

    fn try_from(raw: RawMapData) -> Result<Self, Self::Error> {
        let map = MapData::new(raw.regions)?;
        Ok(match raw.name {
            Some(name) => map.with_name(name),
            None => map,
        })
    }
}

impl MapData {
    /// Build an unnamed map. Fails on an empty or repeated region id.
    pub fn new(regions: Vec<Region>) -> Result<Self, StateError> {
        let mut seen = HashSet::with_capacity(regions.len());
        for (index, region) in regions.iter().enumerate() {
            if region.id.is_empty() {
                return Err(StateError::EmptyRegionId { index });
            }
            if !seen.insert(region.id.as_str()) {
                return Err(StateError::DuplicateRegionId(region.id.clone()));
            }
        }
        Ok(Self {
            regions,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Regions in map order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by id.
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
