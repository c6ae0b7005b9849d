use core_text::TextError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout walked or was started at a location the store rejected.
    #[error("text access failed during layout: {0}")]
    Text(#[from] TextError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
