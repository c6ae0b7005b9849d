use core_text::{AttributedText, Result};

/// Stores that can switch fold projection on and off.
///
/// The layout policy requires this capability statically; a store without
/// it cannot be laid out with folding at all.
pub trait FoldSignal: AttributedText {
    fn fold_enabled(&self) -> bool;

    fn set_fold_enabled(&mut self, enabled: bool);

    /// True when the signal is on and the raw fold attribute at `index` is
    /// true. Fails with `OutOfRange` for a location outside the buffer even
    /// while the signal is off.
    fn is_folded(&self, index: usize) -> Result<bool>;
}
