//! Fold projection: the attributes a renderer sees for a location.
//!
//! With folding enabled a maximal fold run `[s, e)` is presented as two
//! effective runs:
//! * `[s, s+1)` carrying the raw attributes plus the shared placeholder
//!   attachment;
//! * `[s+1, e)` carrying the raw attributes minus the fold marker, so
//!   nothing downstream re-derives another placeholder from it.
//!
//! The result is recomputed on every query. Fold runs are always measured
//! against the raw store, never against an earlier projection.

use std::ops::Range;

use core_text::{ATTACHMENT, AttributedText, Attributes, FOLD, Result};

use crate::placeholder::placeholder;

/// Effective attributes and range at `location` over the `raw` store.
///
/// Pure in `(raw, fold_enabled, location)`. With `fold_enabled == false`,
/// or outside a fold run, this is exactly `raw.attributes_at(location)`.
pub fn effective_attributes<S: AttributedText + ?Sized>(
    raw: &S,
    fold_enabled: bool,
    location: usize,
) -> Result<(Attributes, Range<usize>)> {
    let (mut attrs, run) = raw.attributes_at(location)?;
    if !fold_enabled || !attrs.is_true(FOLD) {
        return Ok((attrs, run));
    }

    let (_, folded) = raw.attribute_at(FOLD, location, 0..raw.len_chars())?;
    if location == folded.start {
        attrs.insert(ATTACHMENT, placeholder());
        Ok((attrs, location..location + 1))
    } else {
        attrs.remove(FOLD);
        Ok((attrs, folded.start + 1..folded.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::is_placeholder;
    use core_text::{AttributedBuffer, TextError};
    use pretty_assertions::assert_eq;

    fn folded_buffer() -> AttributedBuffer {
        let mut b = AttributedBuffer::from_str("ab0123cd");
        b.add_attribute(FOLD, true.into(), 2..6).unwrap();
        b
    }

    #[test]
    fn disabled_projection_is_raw() {
        let b = folded_buffer();
        for loc in 0..b.len_chars() {
            assert_eq!(
                effective_attributes(&b, false, loc).unwrap(),
                b.attributes_at(loc).unwrap()
            );
        }
    }

    #[test]
    fn run_start_yields_placeholder_of_length_one() {
        let b = folded_buffer();
        let (attrs, range) = effective_attributes(&b, true, 2).unwrap();
        assert_eq!(range, 2..3);
        assert!(attrs.is_true(FOLD));
        assert!(is_placeholder(attrs.attachment().unwrap()));
    }

    #[test]
    fn remainder_is_one_run_without_fold() {
        let b = folded_buffer();
        for loc in 3..6 {
            let (attrs, range) = effective_attributes(&b, true, loc).unwrap();
            assert_eq!(range, 3..6);
            assert!(attrs.attachment().is_none());
            assert!(!attrs.contains(FOLD));
        }
    }

    #[test]
    fn fold_run_measured_across_other_attribute_changes() {
        let mut b = folded_buffer();
        b.add_attribute("weight", 700i64.into(), 4..8).unwrap();
        // Raw runs inside the fold are [2,4) and [4,6); the fold run is [2,6).
        let (attrs, range) = effective_attributes(&b, true, 5).unwrap();
        assert_eq!(range, 3..6);
        assert!(attrs.contains("weight"));
        let (attrs, range) = effective_attributes(&b, true, 2).unwrap();
        assert_eq!(range, 2..3);
        assert!(!attrs.contains("weight"));
    }

    #[test]
    fn single_character_fold() {
        let mut b = AttributedBuffer::from_str("abc");
        b.add_attribute(FOLD, true.into(), 1..2).unwrap();
        let (attrs, range) = effective_attributes(&b, true, 1).unwrap();
        assert_eq!(range, 1..2);
        assert!(attrs.attachment().is_some());
    }

    #[test]
    fn out_of_range_location() {
        let b = folded_buffer();
        assert_eq!(
            effective_attributes(&b, true, 8),
            Err(TextError::OutOfRange { index: 8, len: 8 })
        );
    }
}
