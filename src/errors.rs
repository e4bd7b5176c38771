use serde::Serialize;

/// Errors surfaced by the engine's public entry points.
///
/// Invalid input is always a caller bug: it is reported immediately and
/// never retried or silently corrected.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}
