use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("security initialization failed")]
    InitializationFailure,
    #[error("security violation detected")]
    SecurityViolation,
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoreError {
    /// Fatal errors terminate the running session; everything else is
    /// recoverable and absorbed by the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::InitializationFailure | CoreError::SecurityViolation
        )
    }
}
