//! Error types for command handling.

use thiserror::Error;

/// Command handling errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Core error: {0}")]
    Core(#[from] fittrack_core::FitTrackError),

    /// A required field is missing; the command is rejected and nothing changes.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The command refers to something that does not exist; it is ignored.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for command handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_kind() {
        assert_eq!(
            AppError::Validation("name is required".into()).to_string(),
            "Validation error: name is required"
        );
        assert_eq!(
            AppError::NotFound("workout 42".into()).to_string(),
            "Not found: workout 42"
        );
        let core: AppError = fittrack_core::FitTrackError::Config("bad".into()).into();
        assert!(matches!(core, AppError::Core(_)));
    }
}
