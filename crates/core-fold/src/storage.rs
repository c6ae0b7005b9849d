//! Fold-aware text storage.
//!
//! `FoldingStorage` wraps a raw [`AttributedText`] store. Reads of
//! characters pass straight through; `attributes_at` goes through the fold
//! projection; every mutation is applied to the raw store, followed by a
//! fixup pass over the edited range and an [`EditNotice`] to registered
//! hooks.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use core_text::{
    AttrValue, AttributedBuffer, AttributedText, Attributes, FOLD, Result, check_range,
};
use tracing::{debug, trace};

use crate::fixup::fixup_fold_ranges;
use crate::projection::effective_attributes;
use crate::signal::FoldSignal;

bitflags::bitflags! {
    /// What an edit changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EditMask: u8 {
        const CHARACTERS = 0b01;
        const ATTRIBUTES = 0b10;
    }
}

/// Change notification published after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditNotice {
    pub mask: EditMask,
    /// Edited range in pre-edit coordinates.
    pub range: Range<usize>,
    /// Signed change in character count.
    pub delta: isize,
}

impl EditNotice {
    /// Edited range in post-edit coordinates.
    pub fn edited_range(&self) -> Range<usize> {
        let end = (self.range.end as isize + self.delta).max(self.range.start as isize);
        self.range.start..end as usize
    }
}

/// Observer of storage edits. Hooks run after fixup, so they see the
/// corrected attributes.
pub trait EditHooks: Send + Sync + 'static {
    fn text_edited(&self, _notice: &EditNotice) {}
}

/// Default no-op hooks implementation.
pub struct NoopEditHooks;

impl EditHooks for NoopEditHooks {}

pub struct FoldingStorage<S = AttributedBuffer> {
    raw: S,
    fold_enabled: bool,
    hooks: Vec<Arc<dyn EditHooks>>,
}

impl<S: fmt::Debug> fmt::Debug for FoldingStorage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldingStorage")
            .field("raw", &self.raw)
            .field("fold_enabled", &self.fold_enabled)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl FoldingStorage<AttributedBuffer> {
    pub fn from_str(text: &str) -> Self {
        Self::new(AttributedBuffer::from_str(text))
    }
}

impl<S: AttributedText> FoldingStorage<S> {
    /// Wrap `raw`, fixing up any fold runs it already carries.
    pub fn new(mut raw: S) -> Self {
        let len = raw.len_chars();
        let clipped = fixup_fold_ranges(&mut raw, 0..len);
        if clipped > 0 {
            debug!(target: "fold.storage", clipped, "wrapped_store_fixed_up");
        }
        Self {
            raw,
            fold_enabled: false,
            hooks: Vec::new(),
        }
    }

    /// The unprojected store.
    pub fn raw(&self) -> &S {
        &self.raw
    }

    pub fn add_hooks(&mut self, hooks: Arc<dyn EditHooks>) {
        self.hooks.push(hooks);
    }

    /// Mark `range` foldable.
    pub fn fold(&mut self, range: Range<usize>) -> Result<()> {
        self.add_attribute(FOLD, AttrValue::Bool(true), range)
    }

    /// Clear the fold marker over `range`.
    pub fn unfold(&mut self, range: Range<usize>) -> Result<()> {
        self.remove_attribute(FOLD, range)
    }

    /// Unfold `range` when it is entirely folded, otherwise fold it.
    /// Returns whether the range is folded afterwards.
    pub fn toggle_fold(&mut self, range: Range<usize>) -> Result<bool> {
        check_range(&range, self.raw.len_chars())?;
        if range.is_empty() {
            return Ok(false);
        }
        let (value, run) = self.raw.attribute_at(FOLD, range.start, range.clone())?;
        let fully_folded = value == Some(AttrValue::Bool(true)) && run == range;
        if fully_folded {
            self.unfold(range)?;
        } else {
            self.fold(range)?;
        }
        Ok(!fully_folded)
    }

    /// Maximal raw fold runs in document order.
    pub fn folded_ranges(&self) -> Vec<Range<usize>> {
        let len = self.raw.len_chars();
        let mut out = Vec::new();
        let mut loc = 0;
        while loc < len {
            let Ok((value, run)) = self.raw.attribute_at(FOLD, loc, 0..len) else {
                break;
            };
            if value == Some(AttrValue::Bool(true)) {
                out.push(run.clone());
            }
            loc = run.end;
        }
        out
    }

    fn edited(&mut self, mask: EditMask, range: Range<usize>, delta: isize) {
        debug_assert!(!self.fold_enabled, "storage mutated during layout");
        let notice = EditNotice { mask, range, delta };
        let clipped = fixup_fold_ranges(&mut self.raw, notice.edited_range());
        debug!(
            target: "fold.storage",
            mask = ?notice.mask,
            start = notice.range.start,
            end = notice.range.end,
            delta = notice.delta,
            clipped,
            "edited"
        );
        for hooks in &self.hooks {
            hooks.text_edited(&notice);
        }
    }
}

impl<S: AttributedText> AttributedText for FoldingStorage<S> {
    fn len_chars(&self) -> usize {
        self.raw.len_chars()
    }

    fn char_at(&self, index: usize) -> Result<char> {
        self.raw.char_at(index)
    }

    fn text(&self, range: Range<usize>) -> Result<String> {
        self.raw.text(range)
    }

    fn attributes_at(&self, location: usize) -> Result<(Attributes, Range<usize>)> {
        effective_attributes(&self.raw, self.fold_enabled, location)
    }

    fn set_attributes(&mut self, attrs: Attributes, range: Range<usize>) -> Result<()> {
        self.raw.set_attributes(attrs, range.clone())?;
        self.edited(EditMask::ATTRIBUTES, range, 0);
        Ok(())
    }

    fn add_attribute(&mut self, key: &str, value: AttrValue, range: Range<usize>) -> Result<()> {
        self.raw.add_attribute(key, value, range.clone())?;
        self.edited(EditMask::ATTRIBUTES, range, 0);
        Ok(())
    }

    fn remove_attribute(&mut self, key: &str, range: Range<usize>) -> Result<()> {
        self.raw.remove_attribute(key, range.clone())?;
        self.edited(EditMask::ATTRIBUTES, range, 0);
        Ok(())
    }

    fn replace_characters(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        let delta = text.chars().count() as isize - range.len() as isize;
        self.raw.replace_characters(range.clone(), text)?;
        self.edited(EditMask::CHARACTERS, range, delta);
        Ok(())
    }
}

impl<S: AttributedText> FoldSignal for FoldingStorage<S> {
    fn fold_enabled(&self) -> bool {
        self.fold_enabled
    }

    fn set_fold_enabled(&mut self, enabled: bool) {
        trace!(target: "fold.storage", enabled, "fold_enabled");
        self.fold_enabled = enabled;
    }

    fn is_folded(&self, index: usize) -> Result<bool> {
        let (attrs, _) = self.raw.attributes_at(index)?;
        Ok(self.fold_enabled && attrs.is_true(FOLD))
    }
}
