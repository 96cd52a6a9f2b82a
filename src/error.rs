use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort construction of part of the aisle.
///
/// Expected absence (unknown ids, untagged surfaces, failed model loads) is
/// never reported through this type.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("shelf id must not be empty")]
    EmptyShelfId,

    #[error("shelf `{0}` is already registered")]
    DuplicateShelf(String),

    #[error("shelf `{0}` has a non-finite position or rotation")]
    InvalidPlacement(String),

    #[error("shelf `{0}` has an empty model path")]
    EmptyModelPath(String),

    #[error("invalid session setting: {0}")]
    InvalidSetting(String),

    #[error("failed to read config {path:?}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
