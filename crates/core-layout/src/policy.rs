//! Control-character classification consumed by the line breaker.

use core_fold::FoldSignal;
use core_text::{AttributedText, is_paragraph_terminator};

use crate::error::Result;

/// How the line breaker treats one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Ordinary glyph with its natural advance.
    Normal,
    /// Occupies no horizontal space and never breaks a line.
    ZeroAdvancement,
    /// Tab: advance to the next tab stop.
    Whitespace,
    /// Break the line inside the paragraph.
    LineBreak,
    /// End the paragraph.
    ParagraphBreak,
}

pub fn default_control_action(ch: char) -> ControlAction {
    match ch {
        '\t' => ControlAction::Whitespace,
        '\u{2028}' => ControlAction::LineBreak,
        c if is_paragraph_terminator(c) => ControlAction::ParagraphBreak,
        c if c.is_control() => ControlAction::ZeroAdvancement,
        _ => ControlAction::Normal,
    }
}

pub trait ControlPolicy<S: ?Sized> {
    fn control_action(&self, text: &S, index: usize) -> Result<ControlAction>;
}

/// Classification by character alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl<S: AttributedText + ?Sized> ControlPolicy<S> for DefaultPolicy {
    fn control_action(&self, text: &S, index: usize) -> Result<ControlAction> {
        Ok(default_control_action(text.char_at(index)?))
    }
}

/// Folded characters (signal on, fold attribute true) take no space;
/// everything else falls back to [`DefaultPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingPolicy;

impl<S: FoldSignal + ?Sized> ControlPolicy<S> for FoldingPolicy {
    fn control_action(&self, text: &S, index: usize) -> Result<ControlAction> {
        if text.is_folded(index)? {
            return Ok(ControlAction::ZeroAdvancement);
        }
        DefaultPolicy.control_action(text, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classification() {
        assert_eq!(default_control_action('a'), ControlAction::Normal);
        assert_eq!(default_control_action('漢'), ControlAction::Normal);
        assert_eq!(default_control_action('\t'), ControlAction::Whitespace);
        assert_eq!(default_control_action('\n'), ControlAction::ParagraphBreak);
        assert_eq!(default_control_action('\r'), ControlAction::ParagraphBreak);
        assert_eq!(default_control_action('\u{85}'), ControlAction::ParagraphBreak);
        assert_eq!(default_control_action('\u{2029}'), ControlAction::ParagraphBreak);
        assert_eq!(default_control_action('\u{2028}'), ControlAction::LineBreak);
        assert_eq!(default_control_action('\u{7}'), ControlAction::ZeroAdvancement);
    }
}
