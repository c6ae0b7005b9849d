//! Paragraph boundaries.
//!
//! A paragraph runs up to and including its terminator: `\n`, `\r`, the pair
//! `\r\n` (one unit), NEL (U+0085) or PARAGRAPH SEPARATOR (U+2029). LINE
//! SEPARATOR (U+2028) breaks a line inside a paragraph and does not end it.

use std::ops::Range;

use crate::{AttributedText, Result, check_range};

/// Bounds of one or more consecutive paragraphs.
///
/// `start <= contents_end <= end`; `contents_end..end` is the terminator
/// (empty for a final, unterminated paragraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph {
    pub start: usize,
    pub contents_end: usize,
    pub end: usize,
}

impl Paragraph {
    pub fn has_terminator(&self) -> bool {
        self.contents_end < self.end
    }
}

pub fn is_paragraph_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{85}' | '\u{2029}')
}

fn splits_crlf<T: AttributedText + ?Sized>(text: &T, index: usize) -> Result<bool> {
    Ok(index > 0
        && index < text.len_chars()
        && text.char_at(index)? == '\n'
        && text.char_at(index - 1)? == '\r')
}

/// Paragraph bounds covering `range`: the start of the paragraph holding
/// `range.start` and the end of the paragraph holding the last character of
/// `range` (or `range.start` when empty).
pub fn paragraph_bounds<T: AttributedText + ?Sized>(
    text: &T,
    range: Range<usize>,
) -> Result<Paragraph> {
    let len = text.len_chars();
    check_range(&range, len)?;

    let mut start = range.start;
    if splits_crlf(text, start)? {
        start -= 1;
    }
    while start > 0 && !is_paragraph_terminator(text.char_at(start - 1)?) {
        start -= 1;
    }

    let mut last = if range.is_empty() {
        range.start
    } else {
        range.end - 1
    };
    if splits_crlf(text, last)? {
        last -= 1;
    }
    let mut t = last;
    while t < len && !is_paragraph_terminator(text.char_at(t)?) {
        t += 1;
    }
    if t >= len {
        return Ok(Paragraph {
            start,
            contents_end: len,
            end: len,
        });
    }
    let end = if text.char_at(t)? == '\r' && t + 1 < len && text.char_at(t + 1)? == '\n' {
        t + 2
    } else {
        t + 1
    };
    Ok(Paragraph {
        start,
        contents_end: t,
        end,
    })
}
