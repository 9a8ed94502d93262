use super::{DiffAlgorithm, Differ};
use crate::lines::split_lines;
use crate::DiffEntry;
use similar::{capture_diff_slices, Algorithm as SimilarAlgorithm, DiffTag};

/// Myers diff backed by the `similar` crate.
///
/// Runs in O(ND) instead of the LCS table's O(N·M), at the cost of a
/// different (still minimal) choice among equally long common subsequences.
pub struct MyersDiffer<'a> {
    differ: &'a Differ,
}

impl<'a> MyersDiffer<'a> {
    pub fn new(differ: &'a Differ) -> Self {
        Self { differ }
    }
}

/// Diff two line sequences with Myers' algorithm
pub fn myers_diff(old: &[&str], new: &[&str]) -> Vec<DiffEntry> {
    let ops = capture_diff_slices(SimilarAlgorithm::Myers, old, new);
    let mut entries = Vec::with_capacity(old.len().max(new.len()));

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for (i, j) in old_range.zip(new_range) {
                    entries.push(DiffEntry::same(old[i], i + 1, j + 1));
                }
            }
            DiffTag::Delete => {
                for i in old_range {
                    entries.push(DiffEntry::removed(old[i], i + 1));
                }
            }
            DiffTag::Insert => {
                for j in new_range {
                    entries.push(DiffEntry::added(new[j], j + 1));
                }
            }
            DiffTag::Replace => {
                for i in old_range {
                    entries.push(DiffEntry::removed(old[i], i + 1));
                }
                for j in new_range {
                    entries.push(DiffEntry::added(new[j], j + 1));
                }
            }
        }
    }

    entries
}

impl DiffAlgorithm for MyersDiffer<'_> {
    fn compute(&self) -> Vec<DiffEntry> {
        let old = self.differ.normalized_old();
        let new = self.differ.normalized_new();
        myers_diff(&split_lines(&old), &split_lines(&new))
    }
}
