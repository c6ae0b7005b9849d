//! Line folding over attributed text.
//!
//! Folding never touches characters. A run carrying `fold = true` is shown
//! to layout as a single placeholder attachment at its first character
//! followed by a run with no fold marker; everything else sees the raw
//! attributes. The projection is live only while the fold-enabled signal
//! is on, which the layout crate scopes to one paragraph layout call.

pub mod fixup;
pub mod placeholder;
pub mod projection;
pub mod signal;
pub mod storage;

pub use fixup::fixup_fold_ranges;
pub use placeholder::{is_placeholder, placeholder};
pub use projection::effective_attributes;
pub use signal::FoldSignal;
pub use storage::{EditHooks, EditMask, EditNotice, FoldingStorage, NoopEditHooks};
