use thiserror::Error;

/// Result type used throughout `rb-core`.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a buffer was refused by the reduction policy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReducibleReason {
    /// Buffer is smaller than the configured minimum size.
    TooSmall { size: usize, min: usize },
    /// The most frequent block occurs only once.
    SingleOccurrence,
}

impl std::fmt::Display for NotReducibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotReducibleReason::TooSmall { size, min } => {
                write!(f, "buffer is {} bytes, minimum is {}", size, min)
            }
            NotReducibleReason::SingleOccurrence => {
                write!(f, "most frequent block occurs only once")
            }
        }
    }
}

/// Errors raised by analysis and reduction. All of them are terminal for a
/// single invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter is out of range (e.g. a zero block length).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A mode was requested from an empty frequency table.
    #[error("no data to analyze")]
    NoData,
    /// The policy gate refused the buffer.
    #[error("not reducible: {0}")]
    NotReducible(NotReducibleReason),
}
