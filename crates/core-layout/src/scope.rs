//! Scoped fold-enabled signal.

use std::ops::Deref;

use core_fold::FoldSignal;
use tracing::warn;

/// Turns the fold projection on for as long as it lives.
///
/// The guard holds the storage's only mutable borrow and hands out shared
/// access, so nothing can edit the text or open a second scope on the same
/// storage while layout runs. Dropping it (normal return, `?`, or unwind)
/// turns the projection off again.
pub struct FoldScope<'a, S: FoldSignal + ?Sized> {
    storage: &'a mut S,
}

impl<'a, S: FoldSignal + ?Sized> FoldScope<'a, S> {
    /// Entering while the signal is already on is a caller contract
    /// violation: logged, and fatal in debug builds.
    pub fn enter(storage: &'a mut S) -> Self {
        if storage.fold_enabled() {
            warn!(target: "layout", "fold_scope_already_enabled");
        }
        debug_assert!(!storage.fold_enabled(), "fold signal already on at scope entry");
        storage.set_fold_enabled(true);
        Self { storage }
    }
}

impl<S: FoldSignal + ?Sized> Deref for FoldScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.storage
    }
}

impl<S: FoldSignal + ?Sized> Drop for FoldScope<'_, S> {
    fn drop(&mut self) {
        self.storage.set_fold_enabled(false);
    }
}
