use super::{DiffAlgorithm, Differ};
use crate::lines::split_lines;
use crate::DiffEntry;
use tracing::trace;

/// Longest-common-subsequence lengths for every pair of prefixes of two line
/// sequences.
///
/// `get(i, j)` is the LCS length of `old[..i]` and `new[..j]`. The table is
/// stored flat, row-major, with `new.len() + 1` columns. Building it is
/// O(N·M) in both time and memory, which is the scaling limit of this engine.
/// Cells are `u32` to keep a 20k × 20k table at 1.6 GB.
#[derive(Debug, Clone)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Fill the table for `old` against `new`.
    ///
    /// # Panics
    ///
    /// Panics if the table has more than `usize::MAX` cells.
    pub fn build<T: PartialEq>(old: &[T], new: &[T]) -> Self {
        let rows = old.len() + 1;
        let cols = new.len() + 1;
        trace!(rows, cols, "building LCS table");

        // A cell never exceeds min(rows, cols), which fits in u32 whenever
        // rows * cols fits in usize
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("LCS table of {} x {} cells is too large", rows, cols));
        let mut cells = vec![0u32; len];
        for i in 1..rows {
            let row = i * cols;
            let prev_row = (i - 1) * cols;
            for j in 1..cols {
                cells[row + j] = if old[i - 1] == new[j - 1] {
                    cells[prev_row + j - 1] + 1
                } else {
                    cells[prev_row + j].max(cells[row + j - 1])
                };
            }
        }

        Self { rows, cols, cells }
    }

    /// LCS length of `old[..i]` and `new[..j]`
    pub fn get(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j] as usize
    }

    /// LCS length of the full sequences
    pub fn lcs_len(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Walk the table from the bottom-right corner back to the origin and
    /// return the edit script in top-to-bottom order.
    ///
    /// When stepping over a new line and stepping over an old line keep the
    /// same LCS length, the walk steps over the new line (an `Added` entry).
    /// Since the walk runs bottom-up, a replaced block therefore comes out as
    /// its removed lines followed by its added lines. Changing that choice
    /// yields a different, equally minimal script.
    pub fn backtrack(&self, old: &[&str], new: &[&str]) -> Vec<DiffEntry> {
        debug_assert_eq!(old.len() + 1, self.rows);
        debug_assert_eq!(new.len() + 1, self.cols);

        let mut entries = Vec::with_capacity(old.len().max(new.len()));
        let mut i = old.len();
        let mut j = new.len();

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
                entries.push(DiffEntry::same(old[i - 1], i, j));
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || self.get(i, j - 1) >= self.get(i - 1, j)) {
                entries.push(DiffEntry::added(new[j - 1], j));
                j -= 1;
            } else {
                entries.push(DiffEntry::removed(old[i - 1], i));
                i -= 1;
            }
        }

        entries.reverse();
        entries
    }
}

/// Diff two line sequences with the LCS engine
pub fn lcs_diff(old: &[&str], new: &[&str]) -> Vec<DiffEntry> {
    LcsTable::build(old, new).backtrack(old, new)
}

/// The LCS differ: dynamic programming over the full table, then backtracking.
/// This is the default engine and its output is fully deterministic.
pub struct LcsDiffer<'a> {
    differ: &'a Differ,
}

impl<'a> LcsDiffer<'a> {
    /// Create a new LcsDiffer from a base Differ instance
    pub fn new(differ: &'a Differ) -> Self {
        Self { differ }
    }
}

impl DiffAlgorithm for LcsDiffer<'_> {
    fn compute(&self) -> Vec<DiffEntry> {
        let old = self.differ.normalized_old();
        let new = self.differ.normalized_new();
        lcs_diff(&split_lines(&old), &split_lines(&new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiffKind;

    fn kinds(diff: &[DiffEntry]) -> Vec<DiffKind> {
        diff.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_table_values() {
        let old = ["a", "b", "c", "b"];
        let new = ["b", "c", "b", "a"];
        let table = LcsTable::build(&old, &new);
        assert_eq!(table.lcs_len(), 3);
        assert_eq!(table.get(0, 4), 0);
        assert_eq!(table.get(4, 0), 0);
        assert_eq!(table.get(1, 4), 1);
        assert_eq!(table.get(2, 1), 1);
    }

    #[test]
    fn test_empty_sides() {
        let table = LcsTable::build::<&str>(&[], &[]);
        assert_eq!(table.lcs_len(), 0);
        assert!(table.backtrack(&[], &[]).is_empty());

        let diff = lcs_diff(&[], &["x", "y"]);
        assert_eq!(kinds(&diff), vec![DiffKind::Added, DiffKind::Added]);
        assert_eq!(diff[1].new_line, Some(2));

        let diff = lcs_diff(&["x", "y"], &[]);
        assert_eq!(kinds(&diff), vec![DiffKind::Removed, DiffKind::Removed]);
        assert_eq!(diff[0].old_line, Some(1));
    }

    #[test]
    fn test_replacement_lists_removed_before_added() {
        let diff = lcs_diff(&["a", "old", "c"], &["a", "new", "c"]);
        assert_eq!(
            diff,
            vec![
                DiffEntry::same("a", 1, 1),
                DiffEntry::removed("old", 2),
                DiffEntry::added("new", 2),
                DiffEntry::same("c", 3, 3),
            ]
        );
    }

    #[test]
    fn test_tie_break_prefers_added() {
        // Both "a" and "b" are an LCS of length 1. At the corner the walk
        // steps over new "a", so "b" is the line that stays.
        let diff = lcs_diff(&["a", "b"], &["b", "a"]);
        assert_eq!(
            diff,
            vec![
                DiffEntry::removed("a", 1),
                DiffEntry::same("b", 2, 1),
                DiffEntry::added("a", 2),
            ]
        );
    }

    #[test]
    fn test_table_on_long_inputs() {
        let old: Vec<String> = (0..1500).map(|i| format!("line {}", i)).collect();
        let new: Vec<String> = (0..1500).map(|i| format!("line {}", i % 750)).collect();
        let table = LcsTable::build(&old, &new);
        assert_eq!(table.lcs_len(), 750);
        assert_eq!(table.get(1500, 0), 0);
        assert_eq!(table.get(750, 750), 750);
    }

    #[test]
    fn test_same_count_matches_table() {
        let old = ["x", "a", "b", "y", "c"];
        let new = ["a", "z", "b", "c", "w"];
        let table = LcsTable::build(&old, &new);
        let diff = table.backtrack(&old, &new);
        let same = diff.iter().filter(|e| e.kind == DiffKind::Same).count();
        assert_eq!(same, table.lcs_len());
        assert_eq!(same, 3);
    }
}
