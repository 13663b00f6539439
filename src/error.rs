use thiserror::Error;

/// Every failure the engine reports.
///
/// All errors are raised synchronously by the operation that detects them;
/// nothing is retried or silently corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Operand dimensions are incompatible for the requested operation.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// A window, slice or column index reaches past the available data.
    #[error("out of range: {0}")]
    OutOfRange(String),
    /// Training or inference was requested before its inputs exist.
    #[error("missing training data: {0}")]
    MissingTrainingData(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
