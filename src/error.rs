//! Errors raised while building or decoding game data shapes.
//!
//! Store operations themselves never fail; only map validation and the
//! JSON boundary used by the bridge produce a `StateError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// A region was given an empty id. `index` is its position in the map.
    #[error("region at index {index} has an empty id")]
    EmptyRegionId { index: usize },

    #[error("duplicate region id `{0}`")]
    DuplicateRegionId(String),

    /// Incoming JSON could not be decoded into `what`.
    #[error("invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
