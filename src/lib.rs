use thiserror::Error;

pub mod differ;
mod entry;
pub mod folder;
mod hunk;
mod lines;
mod merger;
mod normalize;
mod session;

// Re-export the core API for convenience
pub use differ::{compute_diff, DiffAlgorithm, DiffAlgorithmType, Differ, LcsTable};
pub use entry::{new_side, old_side, DiffEntry, DiffKind, DiffStats};
pub use folder::{compare_dirs, FileComparison, FileStatus, FolderComparer};
pub use hunk::{enumerate_hunks, Hunk};
pub use lines::{detect_separator, join_lines, split_lines, split_lines_inclusive};
pub use merger::{apply_merge, MergeDirection, Merger};
pub use normalize::NormalizationOptions;
pub use session::{DiffSession, MergeAction};

/// Errors from the filesystem-facing parts of the crate.
///
/// Diffing and merging never fail: a merge that cannot be applied leaves its
/// destination unchanged instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Not a directory: {path}")]
    InvalidDirectory { path: String },

    #[error("Hunk {index} does not exist, the diff has {count} hunks")]
    HunkOutOfRange { index: usize, count: usize },
}
