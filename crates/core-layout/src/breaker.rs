//! Default paragraph layout: walk characters, classify them, wrap lines.
//!
//! Widths are terminal columns. Wrapping is per character: a glyph that
//! would overflow `line_width` starts a new line unless the line is still
//! empty, so an over-wide glyph gets a line of its own. Zero-advance glyphs
//! never trigger a wrap.

use std::ops::Range;

use core_fold::is_placeholder;
use core_text::{AttributedText, TextError};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::policy::{ControlAction, ControlPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub line_width: usize,
    pub tab_width: usize,
    pub placeholder_width: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            line_width: 80,
            tab_width: 4,
            placeholder_width: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphKind {
    Char(char),
    Tab,
    /// The fold placeholder.
    Placeholder,
    /// Any other inline attachment.
    Attachment,
    /// Laid out with zero advance and not drawn.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Character location this glyph was generated for.
    pub index: usize,
    pub kind: GlyphKind,
    pub advance: usize,
}

impl Glyph {
    fn hidden(index: usize) -> Self {
        Self {
            index,
            kind: GlyphKind::Hidden,
            advance: 0,
        }
    }
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFragment {
    /// Characters consumed by this line, including hidden ones and any
    /// terminator.
    pub chars: Range<usize>,
    pub origin_y: usize,
    pub width: usize,
    pub glyphs: Vec<Glyph>,
}

impl LineFragment {
    fn new(start: usize, origin_y: usize) -> Self {
        Self {
            chars: start..start,
            origin_y,
            width: 0,
            glyphs: Vec::new(),
        }
    }

    /// Display text for this line. Placeholder glyphs print `placeholder`,
    /// other attachments U+FFFC, tabs their advance in spaces; hidden glyphs
    /// print nothing.
    pub fn render(&self, placeholder: &str) -> String {
        let mut out = String::new();
        for glyph in &self.glyphs {
            match glyph.kind {
                GlyphKind::Char(c) => out.push(c),
                GlyphKind::Tab => out.extend(std::iter::repeat_n(' ', glyph.advance)),
                GlyphKind::Placeholder => out.push_str(placeholder),
                GlyphKind::Attachment => out.push('\u{FFFC}'),
                GlyphKind::Hidden => {}
            }
        }
        out
    }
}

/// Vertical position of the next line, advanced once per finished line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineOrigin {
    pub y: usize,
}

#[derive(Debug, Default)]
pub struct LineBreaker {
    settings: LayoutSettings,
    lines: Vec<LineFragment>,
    ended_on_break: bool,
}

impl LineBreaker {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            lines: Vec::new(),
            ended_on_break: false,
        }
    }

    pub fn lines(&self) -> &[LineFragment] {
        &self.lines
    }

    pub fn take_lines(&mut self) -> Vec<LineFragment> {
        std::mem::take(&mut self.lines)
    }

    /// Whether the most recent paragraph ended on a paragraph break (as
    /// opposed to the end of the text).
    pub fn ended_on_paragraph_break(&self) -> bool {
        self.ended_on_break
    }

    /// Lay out the paragraph starting at `start`, appending line fragments.
    /// Returns the number of characters consumed, terminator included.
    /// `start == len` lays out the empty line after a final terminator.
    pub fn layout_paragraph<S, P>(
        &mut self,
        text: &S,
        policy: &P,
        start: usize,
        origin: &mut LineOrigin,
    ) -> Result<usize>
    where
        S: AttributedText + ?Sized,
        P: ControlPolicy<S> + ?Sized,
    {
        let len = text.len_chars();
        if start > len {
            return Err(TextError::OutOfRange { index: start, len }.into());
        }
        self.ended_on_break = false;
        let mut line = LineFragment::new(start, origin.y);
        let mut idx = start;
        while idx < len {
            let (attrs, _) = text.attributes_at(idx)?;
            let attachment = attrs.attachment();
            if attachment.is_some_and(is_placeholder) {
                let glyph = Glyph {
                    index: idx,
                    kind: GlyphKind::Placeholder,
                    advance: self.settings.placeholder_width,
                };
                self.place(&mut line, origin, glyph);
                idx += 1;
                continue;
            }

            // Zero advance wins over any other attachment, so nothing inside
            // a fold takes space after the placeholder.
            let action = policy.control_action(text, idx)?;
            if attachment.is_some() && action != ControlAction::ZeroAdvancement {
                let glyph = Glyph {
                    index: idx,
                    kind: GlyphKind::Attachment,
                    advance: 1,
                };
                self.place(&mut line, origin, glyph);
                idx += 1;
                continue;
            }

            match action {
                ControlAction::Normal => {
                    let ch = text.char_at(idx)?;
                    let glyph = Glyph {
                        index: idx,
                        kind: GlyphKind::Char(ch),
                        advance: ch.width().unwrap_or(0),
                    };
                    self.place(&mut line, origin, glyph);
                }
                ControlAction::ZeroAdvancement => line.glyphs.push(Glyph::hidden(idx)),
                ControlAction::Whitespace => self.place_tab(&mut line, origin, idx),
                ControlAction::LineBreak => {
                    line.glyphs.push(Glyph::hidden(idx));
                    idx += 1;
                    self.finish_line(&mut line, idx, origin);
                    continue;
                }
                ControlAction::ParagraphBreak => {
                    line.glyphs.push(Glyph::hidden(idx));
                    let crlf = text.char_at(idx)? == '\r'
                        && idx + 1 < len
                        && text.char_at(idx + 1)? == '\n';
                    idx += 1;
                    if crlf {
                        line.glyphs.push(Glyph::hidden(idx));
                        idx += 1;
                    }
                    self.ended_on_break = true;
                    break;
                }
            }
            idx += 1;
        }
        self.finish_line(&mut line, idx, origin);
        Ok(idx - start)
    }

    fn place(&mut self, line: &mut LineFragment, origin: &mut LineOrigin, glyph: Glyph) {
        if glyph.advance > 0
            && line.width > 0
            && line.width + glyph.advance > self.settings.line_width
        {
            self.finish_line(line, glyph.index, origin);
        }
        line.width += glyph.advance;
        line.glyphs.push(glyph);
    }

    fn place_tab(&mut self, line: &mut LineFragment, origin: &mut LineOrigin, index: usize) {
        let tab = self.settings.tab_width.max(1);
        let mut advance = tab - line.width % tab;
        if line.width > 0 && line.width + advance > self.settings.line_width {
            self.finish_line(line, index, origin);
            advance = tab;
        }
        line.width += advance;
        line.glyphs.push(Glyph {
            index,
            kind: GlyphKind::Tab,
            advance,
        });
    }

    /// Close `line` at `end` and reset it in place as the next line.
    fn finish_line(&mut self, line: &mut LineFragment, end: usize, origin: &mut LineOrigin) {
        origin.y += 1;
        let mut done = std::mem::replace(line, LineFragment::new(end, origin.y));
        done.chars.end = end;
        self.lines.push(done);
    }
}
