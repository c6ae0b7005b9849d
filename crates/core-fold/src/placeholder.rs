//! The shared "collapsed content here" attachment.

use std::sync::{Arc, LazyLock};

use core_text::Attachment;

static PLACEHOLDER: LazyLock<Arc<Attachment>> =
    LazyLock::new(|| Arc::new(Attachment::new("fold.placeholder")));

/// The process-wide placeholder. Every call hands out the same allocation.
pub fn placeholder() -> Arc<Attachment> {
    Arc::clone(&PLACEHOLDER)
}

pub fn is_placeholder(attachment: &Arc<Attachment>) -> bool {
    Arc::ptr_eq(attachment, &PLACEHOLDER)
}
