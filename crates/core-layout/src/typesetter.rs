//! Fold-aware typesetter.

use core_fold::FoldSignal;
use tracing::{debug, trace};

use crate::breaker::{LayoutSettings, LineBreaker, LineFragment, LineOrigin};
use crate::error::Result;
use crate::policy::{ControlAction, ControlPolicy, FoldingPolicy};
use crate::scope::FoldScope;

/// Result of laying out a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLayout {
    pub lines: Vec<LineFragment>,
    pub paragraphs: usize,
}

impl DocumentLayout {
    pub fn render(&self, placeholder: &str) -> Vec<String> {
        self.lines.iter().map(|l| l.render(placeholder)).collect()
    }
}

/// Line breaker driven by [`FoldingPolicy`], with the fold projection live
/// only while a paragraph is being laid out.
#[derive(Debug, Default)]
pub struct FoldingTypesetter {
    breaker: LineBreaker,
}

impl FoldingTypesetter {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            breaker: LineBreaker::new(settings),
        }
    }

    /// `ZeroAdvancement` for a folded character while the signal is on,
    /// otherwise the default classification.
    pub fn control_action<S: FoldSignal + ?Sized>(
        &self,
        storage: &S,
        index: usize,
    ) -> Result<ControlAction> {
        FoldingPolicy.control_action(storage, index)
    }

    /// Lay out one paragraph with the fold projection enabled. The signal is
    /// cleared again on every exit path. Returns the characters consumed.
    pub fn layout_paragraph<S: FoldSignal + ?Sized>(
        &mut self,
        storage: &mut S,
        start: usize,
        origin: &mut LineOrigin,
    ) -> Result<usize> {
        let scope = FoldScope::enter(storage);
        let consumed = self
            .breaker
            .layout_paragraph(&*scope, &FoldingPolicy, start, origin)?;
        trace!(target: "layout", start, consumed, y = origin.y, "paragraph_laid_out");
        Ok(consumed)
    }

    /// Lay out the whole document paragraph by paragraph, including the
    /// empty line after a final paragraph break.
    pub fn layout_document<S: FoldSignal + ?Sized>(
        &mut self,
        storage: &mut S,
    ) -> Result<DocumentLayout> {
        self.breaker.take_lines();
        let len = storage.len_chars();
        let mut origin = LineOrigin::default();
        let mut start = 0;
        let mut paragraphs = 0;
        while start < len {
            start += self.layout_paragraph(storage, start, &mut origin)?;
            paragraphs += 1;
        }
        if len == 0 || self.breaker.ended_on_paragraph_break() {
            self.layout_paragraph(storage, len, &mut origin)?;
            paragraphs += 1;
        }
        let lines = self.breaker.take_lines();
        debug!(
            target: "layout",
            chars = len,
            paragraphs,
            lines = lines.len(),
            "document_laid_out"
        );
        Ok(DocumentLayout { lines, paragraphs })
    }
}
