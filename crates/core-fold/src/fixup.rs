//! Post-edit correction of fold runs.
//!
//! A fold run that reaches the true end of its paragraph must not swallow
//! the paragraph terminator; the terminator is clipped out of the run.
//! Runs that merely contain a terminator somewhere in the middle are left
//! alone.

use std::ops::Range;

use core_text::{AttrValue, AttributedText, FOLD, Result, paragraph_bounds};
use tracing::{debug, warn};

/// Clip fold runs touching `range` so none ends on a paragraph terminator.
///
/// `range` is clamped to the buffer. An empty range (a deletion point) is
/// widened to the characters on either side so runs joined by the deletion
/// are checked. Returns the number of runs clipped. Idempotent; only ever
/// removes the fold attribute and never touches characters.
pub fn fixup_fold_ranges<S: AttributedText + ?Sized>(text: &mut S, range: Range<usize>) -> usize {
    match clip_terminators(text, range) {
        Ok(clipped) => clipped,
        Err(err) => {
            warn!(target: "fold.fixup", %err, "fixup_aborted");
            0
        }
    }
}

fn scan_window(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    if start == end {
        start.saturating_sub(1)..(end + 1).min(len)
    } else {
        start..end
    }
}

fn clip_terminators<S: AttributedText + ?Sized>(text: &mut S, range: Range<usize>) -> Result<usize> {
    let len = text.len_chars();
    let window = scan_window(range, len);
    let mut clipped = 0;
    let mut loc = window.start;
    while loc < window.end {
        let (value, mut run) = text.attribute_at(FOLD, loc, 0..len)?;
        loc = run.end;
        if value.as_ref().and_then(AttrValue::as_bool) != Some(true) {
            continue;
        }
        // A clipped run can end on the previous paragraph's terminator
        // ("ab\n\n"), so repeat until the run is stable.
        while run.len() > 1 {
            let para = paragraph_bounds(&*text, run.clone())?;
            if run.end != para.end || !para.has_terminator() {
                break;
            }
            let clip = para.contents_end.max(run.start)..para.end;
            text.remove_attribute(FOLD, clip.clone())?;
            clipped += 1;
            debug!(
                target: "fold.fixup",
                run_start = run.start,
                run_end = run.end,
                clip_start = clip.start,
                clip_end = clip.end,
                "fold_run_clipped"
            );
            run.end = clip.start;
        }
    }
    Ok(clipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{AttributedBuffer, Attributes};
    use pretty_assertions::assert_eq;

    fn fold_runs(b: &AttributedBuffer) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut loc = 0;
        while loc < b.len_chars() {
            let (v, r) = b.attribute_at(FOLD, loc, 0..b.len_chars()).unwrap();
            if v == Some(AttrValue::Bool(true)) {
                out.push(r.clone());
            }
            loc = r.end;
        }
        out
    }

    fn folded(text: &str, range: Range<usize>) -> AttributedBuffer {
        let mut b = AttributedBuffer::from_str(text);
        b.add_attribute(FOLD, true.into(), range).unwrap();
        b
    }

    #[test]
    fn clips_trailing_newline() {
        let mut b = folded("abc\n", 0..4);
        assert_eq!(fixup_fold_ranges(&mut b, 0..4), 1);
        assert_eq!(fold_runs(&b), vec![0..3]);
    }

    #[test]
    fn clips_crlf_as_a_unit() {
        let mut b = folded("ab\r\ncd", 0..4);
        fixup_fold_ranges(&mut b, 0..4);
        assert_eq!(fold_runs(&b), vec![0..2]);
    }

    #[test]
    fn second_pass_is_noop() {
        let mut b = folded("abc\ndef\n", 4..8);
        assert_eq!(fixup_fold_ranges(&mut b, 0..8), 1);
        let before = b.clone();
        assert_eq!(fixup_fold_ranges(&mut b, 0..8), 0);
        assert_eq!(fold_runs(&b), fold_runs(&before));
        assert_eq!(fold_runs(&b), vec![4..7]);
    }

    #[test]
    fn blank_line_after_fold_clipped_to_fixpoint() {
        let mut b = folded("ab\n\ncd", 0..4);
        assert_eq!(fixup_fold_ranges(&mut b, 0..4), 2);
        assert_eq!(fold_runs(&b), vec![0..2]);
        assert_eq!(fixup_fold_ranges(&mut b, 0..6), 0);
    }

    #[test]
    fn run_ending_mid_paragraph_untouched() {
        let mut b = folded("abc\ndef\n", 1..3);
        assert_eq!(fixup_fold_ranges(&mut b, 0..8), 0);
        assert_eq!(fold_runs(&b), vec![1..3]);
    }

    #[test]
    fn multi_paragraph_run_keeps_inner_terminator() {
        // Run [0,8) spans two paragraphs; only the final terminator is clipped.
        let mut b = folded("abc\ndef\nxyz", 0..8);
        assert_eq!(fixup_fold_ranges(&mut b, 0..8), 1);
        assert_eq!(fold_runs(&b), vec![0..7]);
    }

    #[test]
    fn run_covering_terminator_mid_run_not_extended() {
        // Ends inside the second paragraph: left as-is even though it holds '\n'.
        let mut b = folded("abc\ndef\n", 1..6);
        assert_eq!(fixup_fold_ranges(&mut b, 0..8), 0);
        assert_eq!(fold_runs(&b), vec![1..6]);
    }

    #[test]
    fn unterminated_paragraph_untouched() {
        let mut b = folded("abc", 0..3);
        assert_eq!(fixup_fold_ranges(&mut b, 0..3), 0);
        assert_eq!(fold_runs(&b), vec![0..3]);
    }

    #[test]
    fn single_character_runs_skipped() {
        let mut b = folded("abc\n", 3..4);
        assert_eq!(fixup_fold_ranges(&mut b, 0..4), 0);
        assert_eq!(fold_runs(&b), vec![3..4]);
    }

    #[test]
    fn false_fold_value_ignored() {
        let mut b = AttributedBuffer::from_str("abc\n");
        b.set_attributes(Attributes::new().with(FOLD, false), 0..4).unwrap();
        assert_eq!(fixup_fold_ranges(&mut b, 0..4), 0);
    }

    #[test]
    fn partial_range_sees_whole_run() {
        let mut b = folded("abcdef\n", 0..7);
        assert_eq!(fixup_fold_ranges(&mut b, 2..3), 1);
        assert_eq!(fold_runs(&b), vec![0..6]);
    }

    #[test]
    fn empty_range_checks_neighbours() {
        let mut b = folded("abc\n", 0..4);
        assert_eq!(fixup_fold_ranges(&mut b, 4..4), 1);
        assert_eq!(fold_runs(&b), vec![0..3]);
    }

    #[test]
    fn out_of_bounds_range_clamped() {
        let mut b = folded("abc\n", 0..4);
        assert_eq!(fixup_fold_ranges(&mut b, 2..100), 1);
        let mut empty = AttributedBuffer::from_str("");
        assert_eq!(fixup_fold_ranges(&mut empty, 0..10), 0);
    }
}
