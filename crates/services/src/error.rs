//! Shared error types for the services crate.

use thiserror::Error;

use ielts_core::model::ExerciseError;

/// Errors emitted by content providers.
///
/// Every variant means the same thing to the session: the exercise could not be
/// loaded and the session enters `Error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("content generation is not configured")]
    Disabled,
    #[error("content provider returned an empty response")]
    EmptyResponse,
    #[error("content request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("content response is not valid exercise JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("evidence index {0} is not a whole number")]
    FractionalIndex(String),
    #[error(transparent)]
    Invalid(#[from] ExerciseError),
}
