use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Failures that abort a state lifecycle step.
///
/// Expected absences (no remote state, no plan) are not represented here.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid working directory: {message}")]
    InvalidWorkingDirectory { message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The job record points at a plan reference that is not a URL.
    #[error("invalid plan reference '{url}': {source}")]
    InvalidPlanReference {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
