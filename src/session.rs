use tracing::debug;

use crate::differ::{DiffAlgorithm, DiffAlgorithmType, Differ};
use crate::{enumerate_hunks, DiffEntry, Hunk, MergeDirection, Merger, NormalizationOptions};

/// A merge a two-pane view can offer: copy `hunk` in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeAction {
    pub hunk: Hunk,
    pub direction: MergeDirection,
}

/// Two editable buffers and the diff between them.
///
/// Every change to either buffer, including a merge, recomputes the diff from
/// scratch, so `diff()` and `hunks()` always describe the current text.
#[derive(Debug, Clone)]
pub struct DiffSession {
    old: String,
    new: String,
    algorithm: DiffAlgorithmType,
    normalization: NormalizationOptions,
    diff: Vec<DiffEntry>,
    hunks: Vec<Hunk>,
}

impl DiffSession {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::with_options(
            old,
            new,
            DiffAlgorithmType::default(),
            NormalizationOptions::default(),
        )
    }

    pub fn with_options(
        old: impl Into<String>,
        new: impl Into<String>,
        algorithm: DiffAlgorithmType,
        normalization: NormalizationOptions,
    ) -> Self {
        let mut session = Self {
            old: old.into(),
            new: new.into(),
            algorithm,
            normalization,
            diff: Vec::new(),
            hunks: Vec::new(),
        };
        session.recompute();
        session
    }

    pub fn old_text(&self) -> &str {
        &self.old
    }

    pub fn new_text(&self) -> &str {
        &self.new
    }

    pub fn diff(&self) -> &[DiffEntry] {
        &self.diff
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Replace the old buffer
    pub fn set_old(&mut self, text: impl Into<String>) {
        self.old = text.into();
        self.recompute();
    }

    /// Replace the new buffer
    pub fn set_new(&mut self, text: impl Into<String>) {
        self.new = text.into();
        self.recompute();
    }

    /// One action per hunk per side, in hunk order.
    pub fn actions(&self) -> Vec<MergeAction> {
        self.hunks
            .iter()
            .flat_map(|hunk| {
                [MergeDirection::OldToNew, MergeDirection::NewToOld]
                    .map(|direction| MergeAction {
                        hunk: *hunk,
                        direction,
                    })
            })
            .collect()
    }

    /// Apply `action` to its destination buffer and recompute the diff.
    ///
    /// Returns `true` if the destination text changed. An action whose hunk is
    /// no longer part of the diff changes nothing.
    pub fn merge(&mut self, action: &MergeAction) -> bool {
        let merged =
            Merger::new(&self.diff).apply(&action.hunk, action.direction, &self.old, &self.new);
        let destination = match action.direction {
            MergeDirection::OldToNew => &mut self.new,
            MergeDirection::NewToOld => &mut self.old,
        };
        if *destination == merged {
            return false;
        }
        *destination = merged;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.diff = Differ::new(&self.old, &self.new)
            .algorithm(self.algorithm)
            .normalization(self.normalization)
            .compute();
        self.hunks = enumerate_hunks(&self.diff);
        debug!(entries = self.diff.len(), hunks = self.hunks.len(), "diff recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_cover_both_sides() {
        let session = DiffSession::new("a\nb\nc\nd", "a\nB\nc\nD");
        assert_eq!(session.hunks().len(), 2);

        let actions = session.actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0].hunk, session.hunks()[0]);
        assert_eq!(actions[0].direction, MergeDirection::OldToNew);
        assert_eq!(actions[1].direction, MergeDirection::NewToOld);
        assert_eq!(actions[2].hunk, session.hunks()[1]);
    }

    #[test]
    fn test_merge_recomputes_diff() {
        let mut session = DiffSession::new("a\nb\nc\nd", "a\nB\nc\nD");
        let action = session.actions()[1];

        assert!(session.merge(&action));
        assert_eq!(session.old_text(), "a\nB\nc\nd");
        assert_eq!(session.hunks().len(), 1);

        // The same action now refers to a hunk that no longer exists
        assert!(!session.merge(&action));
        assert_eq!(session.old_text(), "a\nB\nc\nd");

        let last = session.actions()[0];
        assert!(session.merge(&last));
        assert_eq!(session.new_text(), "a\nB\nc\nd");
        assert!(session.hunks().is_empty());
        assert!(session.actions().is_empty());
    }

    #[test]
    fn test_merge_from_empty_side_changes_nothing() {
        let mut session = DiffSession::new("a\nc", "a\nb\nc");
        let action = MergeAction {
            hunk: session.hunks()[0],
            direction: MergeDirection::OldToNew,
        };
        assert!(!session.merge(&action));
        assert_eq!(session.new_text(), "a\nb\nc");
    }

    #[test]
    fn test_editing_a_buffer_recomputes() {
        let mut session = DiffSession::new("x", "x");
        assert!(session.hunks().is_empty());

        session.set_new("x\ny");
        assert_eq!(session.hunks().len(), 1);

        session.set_old("x\ny");
        assert!(session.diff().iter().all(|e| !e.is_change()));
    }
}
