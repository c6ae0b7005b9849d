//! Attributed text storage: characters plus named-attribute runs.
//!
//! Locations are character (Unicode scalar) indices. Ranges are half-open
//! `start..end`. Every query or mutation is bounds-checked and reports
//! [`TextError`] instead of clamping silently.
//!
//! [`AttributedText`] is the seam other crates build on: a folding layer
//! wraps any implementation and overrides `attributes_at` to present a
//! projected view, while [`AttributedBuffer`] is the concrete rope-backed
//! store.

use std::ops::Range;

pub mod attrs;
pub mod buffer;
pub mod error;
pub mod paragraph;

pub use attrs::{ATTACHMENT, AttrValue, Attachment, Attributes, FOLD};
pub use buffer::AttributedBuffer;
pub use error::{Result, TextError};
pub use paragraph::{Paragraph, is_paragraph_terminator, paragraph_bounds};

/// Read/write interface of an attributed text store.
pub trait AttributedText {
    /// Number of characters.
    fn len_chars(&self) -> usize;

    fn char_at(&self, index: usize) -> Result<char>;

    fn text(&self, range: Range<usize>) -> Result<String>;

    /// Attributes at `location` and the maximal run over which they hold.
    fn attributes_at(&self, location: usize) -> Result<(Attributes, Range<usize>)>;

    /// Value of a single attribute at `location` plus the longest range
    /// (clipped to `within`) over which it keeps that value, regardless of
    /// other attributes changing. Built on [`AttributedText::attributes_at`]
    /// so implementors that project attributes see their projection here too.
    fn attribute_at(
        &self,
        key: &str,
        location: usize,
        within: Range<usize>,
    ) -> Result<(Option<AttrValue>, Range<usize>)> {
        check_range(&within, self.len_chars())?;
        if location < within.start || location >= within.end {
            return Err(TextError::OutOfRange {
                index: location,
                len: self.len_chars(),
            });
        }
        let (attrs, run) = self.attributes_at(location)?;
        let value = attrs.get(key).cloned();

        let mut start = run.start.max(within.start);
        while start > within.start {
            let (prev, prev_run) = self.attributes_at(start - 1)?;
            if prev.get(key) != value.as_ref() {
                break;
            }
            start = prev_run.start.max(within.start);
        }
        let mut end = run.end.min(within.end);
        while end < within.end {
            let (next, next_run) = self.attributes_at(end)?;
            if next.get(key) != value.as_ref() {
                break;
            }
            end = next_run.end.min(within.end);
        }
        Ok((value, start..end))
    }

    /// Replace all attributes over `range` with `attrs`.
    fn set_attributes(&mut self, attrs: Attributes, range: Range<usize>) -> Result<()>;

    fn add_attribute(&mut self, key: &str, value: AttrValue, range: Range<usize>) -> Result<()>;

    fn remove_attribute(&mut self, key: &str, range: Range<usize>) -> Result<()>;

    /// Replace the characters in `range` with `text`. The new characters take
    /// the attributes of the first replaced character, or of the preceding
    /// character for a pure insertion.
    fn replace_characters(&mut self, range: Range<usize>, text: &str) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }
}

pub fn check_location(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(TextError::OutOfRange { index, len })
    }
}

pub fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start <= range.end && range.end <= len {
        Ok(())
    } else {
        Err(TextError::InvalidRange {
            start: range.start,
            end: range.end,
            len,
        })
    }
}
