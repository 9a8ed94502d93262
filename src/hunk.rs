use std::fmt;
use std::ops::RangeInclusive;

use crate::{DiffEntry, DiffKind};

/// A maximal run of contiguous `Added`/`Removed` entries.
///
/// Line numbers are 1-based and inclusive. When a side has no lines in the
/// hunk, its `*_start` is `None` and its `*_end` is the anchor: the number of
/// lines on that side before the hunk, i.e. the line the hunk sits after
/// (0 at the top of the text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hunk {
    pub old_start: Option<usize>,
    pub old_end: usize,
    pub new_start: Option<usize>,
    pub new_end: usize,
}

impl Hunk {
    /// Old-side lines covered by the hunk
    pub fn old_range(&self) -> Option<RangeInclusive<usize>> {
        self.old_start.map(|start| start..=self.old_end)
    }

    /// New-side lines covered by the hunk
    pub fn new_range(&self) -> Option<RangeInclusive<usize>> {
        self.new_start.map(|start| start..=self.new_end)
    }

    /// Lines only in the new text
    pub fn is_insertion(&self) -> bool {
        self.old_start.is_none()
    }

    /// Lines only in the old text
    pub fn is_deletion(&self) -> bool {
        self.new_start.is_none()
    }

    pub fn old_count(&self) -> usize {
        self.old_range().map_or(0, |r| r.count())
    }

    pub fn new_count(&self) -> usize {
        self.new_range().map_or(0, |r| r.count())
    }
}

impl fmt::Display for Hunk {
    /// Unified diff header style: `@@ -start,count +start,count @@`, where an
    /// empty side shows its anchor line and a count of 0.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start.unwrap_or(self.old_end),
            self.old_count(),
            self.new_start.unwrap_or(self.new_end),
            self.new_count()
        )
    }
}

/// Group the changes of an edit script into hunks, top to bottom.
pub fn enumerate_hunks(diff: &[DiffEntry]) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut last_old = 0;
    let mut last_new = 0;
    let mut current: Option<Hunk> = None;

    for entry in diff {
        match entry.kind {
            DiffKind::Same => {
                if let Some(hunk) = current.take() {
                    hunks.push(hunk);
                }
            }
            DiffKind::Removed | DiffKind::Added => {
                let hunk = current.get_or_insert(Hunk {
                    old_start: None,
                    old_end: last_old,
                    new_start: None,
                    new_end: last_new,
                });
                if let Some(line) = entry.old_line {
                    hunk.old_start.get_or_insert(line);
                    hunk.old_end = line;
                }
                if let Some(line) = entry.new_line {
                    hunk.new_start.get_or_insert(line);
                    hunk.new_end = line;
                }
            }
        }

        if let Some(line) = entry.old_line {
            last_old = line;
        }
        if let Some(line) = entry.new_line {
            last_new = line;
        }
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }

    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_diff;

    #[test]
    fn test_no_hunks_for_identical_text() {
        assert!(enumerate_hunks(&compute_diff("a\nb", "a\nb")).is_empty());
        assert!(enumerate_hunks(&[]).is_empty());
    }

    #[test]
    fn test_modification_hunk() {
        let hunks = enumerate_hunks(&compute_diff("a\nb\nc\nd", "a\nB\nC\nd"));
        assert_eq!(
            hunks,
            vec![Hunk {
                old_start: Some(2),
                old_end: 3,
                new_start: Some(2),
                new_end: 3,
            }]
        );
        assert_eq!(hunks[0].to_string(), "@@ -2,2 +2,2 @@");
    }

    #[test]
    fn test_pure_insertion_anchor() {
        let hunks = enumerate_hunks(&compute_diff("a\nb", "a\nx\ny\nb"));
        assert_eq!(hunks.len(), 1);
        let hunk = hunks[0];
        assert!(hunk.is_insertion());
        assert_eq!(hunk.old_range(), None);
        assert_eq!(hunk.old_end, 1);
        assert_eq!(hunk.new_range(), Some(2..=3));
    }

    #[test]
    fn test_pure_deletion_anchor() {
        let hunks = enumerate_hunks(&compute_diff("x\na\nb", "a\nb"));
        assert_eq!(
            hunks,
            vec![Hunk {
                old_start: Some(1),
                old_end: 1,
                new_start: None,
                new_end: 0,
            }]
        );
        assert!(hunks[0].is_deletion());
        assert_eq!(hunks[0].to_string(), "@@ -1,1 +0,0 @@");
    }

    #[test]
    fn test_multiple_hunks() {
        let old = "keep1\ngone\nkeep2\nkeep3\nold tail";
        let new = "keep1\nkeep2\nadded\nkeep3\nnew tail";
        let hunks = enumerate_hunks(&compute_diff(old, new));
        assert_eq!(hunks.len(), 3);
        assert!(hunks[0].is_deletion());
        assert_eq!(hunks[0].new_end, 1);
        assert!(hunks[1].is_insertion());
        assert_eq!(hunks[1].old_end, 3);
        assert_eq!(hunks[2].old_range(), Some(5..=5));
        assert_eq!(hunks[2].new_range(), Some(5..=5));
    }
}
