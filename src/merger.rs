use std::fmt;

use tracing::debug;

use crate::lines::{
    detect_separator, join_lines, line_terminator, split_lines, split_lines_inclusive,
};
use crate::{enumerate_hunks, DiffEntry, Hunk};

/// Which side a hunk is copied from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeDirection {
    /// Copy the old side of the hunk into the new text
    OldToNew,
    /// Copy the new side of the hunk into the old text
    NewToOld,
}

impl MergeDirection {
    pub fn reverse(self) -> Self {
        match self {
            MergeDirection::OldToNew => MergeDirection::NewToOld,
            MergeDirection::NewToOld => MergeDirection::OldToNew,
        }
    }
}

impl fmt::Display for MergeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeDirection::OldToNew => write!(f, "old -> new"),
            MergeDirection::NewToOld => write!(f, "new -> old"),
        }
    }
}

/// Copies single hunks of a diff from one side to the other.
///
/// Merging is best-effort: a hunk that is not part of the diff, or whose lines
/// are out of bounds for the supplied texts, leaves the destination unchanged.
pub struct Merger<'a> {
    diff: &'a [DiffEntry],
}

impl<'a> Merger<'a> {
    pub fn new(diff: &'a [DiffEntry]) -> Self {
        Self { diff }
    }

    /// Copy `hunk` in `direction` and return the full destination text.
    ///
    /// # Arguments
    ///
    /// * `hunk` - A hunk as returned by [`enumerate_hunks`] for this diff.
    /// * `direction` - Which side to copy from.
    /// * `old` / `new` - The texts the diff was computed from.
    ///
    /// # Returns
    ///
    /// The new text for the destination side (`new` for
    /// [`MergeDirection::OldToNew`], `old` otherwise). The source text is
    /// never modified. Destination lines outside the hunk keep their own
    /// line terminators; the copied lines are joined with the destination's
    /// first separator.
    pub fn apply(&self, hunk: &Hunk, direction: MergeDirection, old: &str, new: &str) -> String {
        let (source, destination) = match direction {
            MergeDirection::OldToNew => (old, new),
            MergeDirection::NewToOld => (new, old),
        };

        if !enumerate_hunks(self.diff).contains(hunk) {
            debug!(%hunk, %direction, "hunk not found in current diff, merge skipped");
            return destination.to_string();
        }

        let (source_range, destination_range, anchor) = match direction {
            MergeDirection::OldToNew => (hunk.old_range(), hunk.new_range(), hunk.new_end),
            MergeDirection::NewToOld => (hunk.new_range(), hunk.old_range(), hunk.old_end),
        };

        let Some(source_range) = source_range else {
            debug!(%hunk, %direction, "hunk has no lines on the source side");
            return destination.to_string();
        };

        let source_lines = split_lines(source);
        let destination_pieces = split_lines_inclusive(destination);

        let copy_from = source_range.start().saturating_sub(1);
        let Some(copied) = source_lines.get(copy_from..*source_range.end()) else {
            debug!(%hunk, lines = source_lines.len(), "hunk is out of bounds for the source text");
            return destination.to_string();
        };

        // Lines [keep_until, resume_from) of the destination are replaced
        let (keep_until, resume_from) = match destination_range {
            Some(range) => (range.start().saturating_sub(1), *range.end()),
            None => (anchor, anchor),
        };
        if resume_from > destination_pieces.len() {
            debug!(
                %hunk,
                lines = destination_pieces.len(),
                "hunk is out of bounds for the destination text"
            );
            return destination.to_string();
        }

        let separator = detect_separator(destination)
            .or_else(|| detect_separator(source))
            .unwrap_or("\n");
        let prefix = &destination_pieces[..keep_until];
        let replaced = &destination_pieces[keep_until..resume_from];
        let suffix = &destination_pieces[resume_from..];

        // Untouched lines are copied verbatim, terminators included. Only the
        // joins inside the copied block and at its edges are chosen here.
        let mut merged = String::with_capacity(destination.len() + source.len());
        merged.extend(prefix.iter().copied());
        if prefix.last().is_some_and(|piece| line_terminator(piece).is_empty()) {
            merged.push_str(separator);
        }
        merged.push_str(&join_lines(copied, separator));
        if !suffix.is_empty() {
            let terminator = replaced
                .last()
                .or(prefix.last())
                .map(|piece| line_terminator(piece))
                .filter(|terminator| !terminator.is_empty())
                .unwrap_or(separator);
            merged.push_str(terminator);
            merged.extend(suffix.iter().copied());
        }
        merged
    }
}

/// Copy one hunk of `diff` in `direction`, returning the new destination text.
pub fn apply_merge(
    diff: &[DiffEntry],
    hunk: &Hunk,
    direction: MergeDirection,
    old: &str,
    new: &str,
) -> String {
    Merger::new(diff).apply(hunk, direction, old, new)
}
