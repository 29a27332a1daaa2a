use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Conflicting arguments: {first} and {second}")]
    ConflictingArguments {
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid sleep duration: {value}. Must be a finite, non-negative number of seconds")]
    InvalidSleep { value: f64 },

    #[error("{failed} of {total} images failed")]
    BatchFailures { failed: usize, total: usize },

    #[error(transparent)]
    Library(#[from] studiocrop::Error),
}

impl AppError {
    /// Process exit status for this error: 2 for usage problems, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingArgument { .. }
            | AppError::ConflictingArguments { .. }
            | AppError::InvalidSleep { .. } => 2,
            AppError::BatchFailures { .. } | AppError::Library(_) => 1,
        }
    }
}
