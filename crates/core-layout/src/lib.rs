//! Fold-aware line layout.
//!
//! [`LineBreaker`] is the plain paragraph layout algorithm; it asks a
//! [`ControlPolicy`] how to treat each character and reads effective
//! attributes to find attachments. [`FoldingTypesetter`] runs it with
//! [`FoldingPolicy`] inside a [`FoldScope`], so folded runs collapse to one
//! placeholder glyph followed by zero-advance glyphs, and the projection is
//! switched off again as soon as the paragraph is done.

pub mod breaker;
pub mod error;
pub mod policy;
pub mod scope;
pub mod typesetter;

pub use breaker::{Glyph, GlyphKind, LayoutSettings, LineBreaker, LineFragment, LineOrigin};
pub use error::{LayoutError, Result};
pub use policy::{ControlAction, ControlPolicy, DefaultPolicy, FoldingPolicy, default_control_action};
pub use scope::FoldScope;
pub use typesetter::{DocumentLayout, FoldingTypesetter};
