use thiserror::Error;

/// Misuse of a location or range against the current buffer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    /// A character location at or past the end of the buffer.
    #[error("location {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
    /// A range that is reversed or extends past the end of the buffer.
    #[error("range {start}..{end} invalid (len {len})")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, TextError>;
