use thiserror::Error;

/// Main error type for the Rusty Tabulate engine.
/// Aggregates errors from the standard library, dependencies, and internal modules.
///
/// Only the export side of the pipeline can fail; table normalization degrades
/// malformed input into fallback tables instead of returning errors.
#[derive(Error, Debug)]
pub enum RustyTabulateError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0}")]
    AnyhowError(#[from] anyhow::Error),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    StringEncodingError(#[from] std::string::FromUtf8Error),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    SinkError(#[from] crate::spreadsheet::sink::SinkError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyTabulateError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyTabulateError::WithContextError(format!("{}: {}", message, e)))
    }
}
