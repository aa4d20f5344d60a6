use thiserror::Error;

use crate::access::ValueKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown shape reference: {0}")]
    UnknownRef(String),

    #[error("Reference cycle through `{0}` never reaches a concrete shape")]
    RefCycle(String),

    #[error("Depth must be at least 1")]
    InvalidDepth,

    #[error("Invalid path: `{0}`")]
    InvalidPath(String),

    #[error("Path is not writable: `{0}`")]
    ReadonlyPath(String),

    #[error("Cannot set a value at the empty path")]
    EmptyPath,

    /// An intermediate segment of a write did not hold a container.
    #[error("Cannot create property '{key}' on {kind}{}", location(.path))]
    NotAContainer {
        path: String,
        key: String,
        kind: ValueKind,
    },

    #[error("Index {index} is out of bounds for array of length {len}{}", location(.path))]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at `{}`", path)
    }
}
