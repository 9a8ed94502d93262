use std::fmt;

/// Classification of a single line in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Same,
    Added,
    Removed,
}

impl DiffKind {
    pub(crate) fn to_char(self) -> char {
        match self {
            DiffKind::Same => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        }
    }
}

/// One line record of an edit script.
///
/// `Same` entries carry both line numbers, `Added` entries only `new_line` and
/// `Removed` entries only `old_line`. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub content: String,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DiffEntry {
    pub fn same(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: DiffKind::Same,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: DiffKind::Added,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: DiffKind::Removed,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Whether this entry belongs to a hunk
    pub fn is_change(&self) -> bool {
        self.kind != DiffKind::Same
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.to_char(), self.content)
    }
}

/// Line counts of an edit script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub same: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn from_entries(diff: &[DiffEntry]) -> Self {
        diff.iter().fold(Self::default(), |mut stats, entry| {
            match entry.kind {
                DiffKind::Same => stats.same += 1,
                DiffKind::Added => stats.added += 1,
                DiffKind::Removed => stats.removed += 1,
            }
            stats
        })
    }

    /// True when the two sides are identical
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unchanged, {} added, {} removed",
            self.same, self.added, self.removed
        )
    }
}

/// The old side of an edit script: `Same` and `Removed` lines in order.
pub fn old_side(diff: &[DiffEntry]) -> Vec<&str> {
    diff.iter()
        .filter(|e| e.old_line.is_some())
        .map(|e| e.content.as_str())
        .collect()
}

/// The new side of an edit script: `Same` and `Added` lines in order.
pub fn new_side(diff: &[DiffEntry]) -> Vec<&str> {
    diff.iter()
        .filter(|e| e.new_line.is_some())
        .map(|e| e.content.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_keep_line_number_invariant() {
        let same = DiffEntry::same("a", 1, 2);
        assert_eq!((same.old_line, same.new_line), (Some(1), Some(2)));

        let added = DiffEntry::added("b", 3);
        assert_eq!((added.old_line, added.new_line), (None, Some(3)));
        assert!(added.is_change());

        let removed = DiffEntry::removed("c", 4);
        assert_eq!((removed.old_line, removed.new_line), (Some(4), None));
        assert!(!same.is_change());
    }

    #[test]
    fn test_display() {
        assert_eq!(DiffEntry::same("x", 1, 1).to_string(), " x");
        assert_eq!(DiffEntry::added("y", 1).to_string(), "+y");
        assert_eq!(DiffEntry::removed("z", 1).to_string(), "-z");
    }

    #[test]
    fn test_sides_and_stats() {
        let diff = vec![
            DiffEntry::same("keep", 1, 1),
            DiffEntry::added("new", 2),
            DiffEntry::removed("old", 2),
            DiffEntry::same("tail", 3, 3),
        ];
        assert_eq!(old_side(&diff), vec!["keep", "old", "tail"]);
        assert_eq!(new_side(&diff), vec!["keep", "new", "tail"]);

        let stats = DiffStats::from_entries(&diff);
        assert_eq!(
            stats,
            DiffStats {
                same: 2,
                added: 1,
                removed: 1
            }
        );
        assert!(!stats.is_unchanged());
        assert_eq!(stats.to_string(), "2 unchanged, 1 added, 1 removed");
    }
}
