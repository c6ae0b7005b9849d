//! Rope-backed attributed buffer.

use std::ops::Range;

use ropey::Rope;
use tracing::trace;

use crate::{
    AttrValue, AttributedText, Attributes, Result, TextError, check_location, check_range,
};

#[derive(Debug, Clone, PartialEq)]
struct Run {
    len: usize,
    attrs: Attributes,
}

/// Characters in a `ropey::Rope` plus a contiguous list of attribute runs.
///
/// Invariants:
/// * run lengths sum to `rope.len_chars()`;
/// * no run is empty;
/// * adjacent runs never carry equal attributes (runs are maximal);
/// * `starts[i]` is the offset of `runs[i]`, rebuilt after every edit.
#[derive(Debug, Clone, Default)]
pub struct AttributedBuffer {
    rope: Rope,
    runs: Vec<Run>,
    starts: Vec<usize>,
}

impl AttributedBuffer {
    /// Buffer holding `text` with no attributes.
    pub fn from_str(text: &str) -> Self {
        Self::with_attributes(text, Attributes::new())
    }

    /// Buffer holding `text` with `attrs` applied to every character.
    pub fn with_attributes(text: &str, attrs: Attributes) -> Self {
        let rope = Rope::from_str(text);
        let len = rope.len_chars();
        let (runs, starts) = if len == 0 {
            (Vec::new(), Vec::new())
        } else {
            (vec![Run { len, attrs }], vec![0])
        };
        Self { rope, runs, starts }
    }

    /// Whole buffer contents.
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Number of attribute runs (maximal, coalesced).
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Run index containing `location` and that run's start offset.
    fn run_containing(&self, location: usize) -> Option<(usize, usize)> {
        if location >= self.rope.len_chars() {
            return None;
        }
        let i = self.starts.partition_point(|&start| start <= location) - 1;
        Some((i, self.starts[i]))
    }

    /// Ensure a run boundary at `offset`; returns the index of the run that
    /// starts there (or `runs.len()` at the end of the buffer).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for i in 0..self.runs.len() {
            if pos == offset {
                return i;
            }
            let end = pos + self.runs[i].len;
            if offset < end {
                let tail = Run {
                    len: end - offset,
                    attrs: self.runs[i].attrs.clone(),
                };
                self.runs[i].len = offset - pos;
                self.runs.insert(i + 1, tail);
                return i + 1;
            }
            pos = end;
        }
        self.runs.len()
    }

    fn coalesce(&mut self) {
        self.runs.retain(|r| r.len > 0);
        self.runs.dedup_by(|later, earlier| {
            if later.attrs == earlier.attrs {
                earlier.len += later.len;
                true
            } else {
                false
            }
        });
        self.starts.clear();
        let mut pos = 0;
        for run in &self.runs {
            self.starts.push(pos);
            pos += run.len;
        }
    }

    fn edit_runs<F>(&mut self, range: Range<usize>, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Attributes),
    {
        check_range(&range, self.len_chars())?;
        if range.is_empty() {
            return Ok(());
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            f(&mut run.attrs);
        }
        self.coalesce();
        Ok(())
    }

    fn inherited_attributes(&self, range: &Range<usize>) -> Attributes {
        let anchor = if !range.is_empty() {
            Some(range.start)
        } else if range.start > 0 {
            Some(range.start - 1)
        } else if !self.runs.is_empty() {
            Some(0)
        } else {
            None
        };
        anchor
            .and_then(|loc| self.run_containing(loc))
            .map(|(i, _)| self.runs[i].attrs.clone())
            .unwrap_or_default()
    }
}

impl AttributedText for AttributedBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, index: usize) -> Result<char> {
        check_location(index, self.len_chars())?;
        Ok(self.rope.char(index))
    }

    fn text(&self, range: Range<usize>) -> Result<String> {
        check_range(&range, self.len_chars())?;
        Ok(self.rope.slice(range).to_string())
    }

    fn attributes_at(&self, location: usize) -> Result<(Attributes, Range<usize>)> {
        let len = self.len_chars();
        let (i, start) = self
            .run_containing(location)
            .ok_or(TextError::OutOfRange {
                index: location,
                len,
            })?;
        let run = &self.runs[i];
        Ok((run.attrs.clone(), start..start + run.len))
    }

    fn set_attributes(&mut self, attrs: Attributes, range: Range<usize>) -> Result<()> {
        self.edit_runs(range, |a| *a = attrs.clone())
    }

    fn add_attribute(&mut self, key: &str, value: AttrValue, range: Range<usize>) -> Result<()> {
        self.edit_runs(range, |a| {
            a.insert(key, value.clone());
        })
    }

    fn remove_attribute(&mut self, key: &str, range: Range<usize>) -> Result<()> {
        self.edit_runs(range, |a| {
            a.remove(key);
        })
    }

    fn replace_characters(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        check_range(&range, self.len_chars())?;
        let attrs = self.inherited_attributes(&range);
        let inserted = text.chars().count();

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        if inserted > 0 {
            self.runs.insert(
                first,
                Run {
                    len: inserted,
                    attrs,
                },
            );
        }
        self.coalesce();

        self.rope.remove(range.clone());
        self.rope.insert(range.start, text);
        trace!(
            target: "text",
            start = range.start,
            removed = range.len(),
            inserted,
            "replace_characters"
        );
        debug_assert_eq!(
            self.runs.iter().map(|r| r.len).sum::<usize>(),
            self.rope.len_chars()
        );
        Ok(())
    }
}
