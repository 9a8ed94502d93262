use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::differ::{DiffAlgorithm, DiffAlgorithmType, Differ};
use crate::{DiffEntry, DiffStats, Error, NormalizationOptions};

/// How a file differs between the two folders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Only present in the new folder
    Added,
    /// Only present in the old folder
    Removed,
    /// Present in both with different lines
    Modified(Vec<DiffEntry>),
    /// Present in both and equal after normalization
    Identical,
    /// Present in both, but at least one copy is not UTF-8 text
    Binary,
}

/// One file of a folder comparison, by path relative to the folder roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileComparison {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileComparison {
    pub fn stats(&self) -> Option<DiffStats> {
        match &self.status {
            FileStatus::Modified(diff) => Some(DiffStats::from_entries(diff)),
            _ => None,
        }
    }
}

/// Compares every file of two directory trees
pub struct FolderComparer {
    old_root: PathBuf,
    new_root: PathBuf,
    algorithm: DiffAlgorithmType,
    normalization: NormalizationOptions,
}

impl FolderComparer {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(old_root: P, new_root: Q) -> Self {
        Self {
            old_root: old_root.as_ref().to_path_buf(),
            new_root: new_root.as_ref().to_path_buf(),
            algorithm: DiffAlgorithmType::default(),
            normalization: NormalizationOptions::default(),
        }
    }

    pub fn algorithm(mut self, algorithm: DiffAlgorithmType) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn normalization(mut self, options: NormalizationOptions) -> Self {
        self.normalization = options;
        self
    }

    /// Pair files by relative path and diff each pair, sorted by path.
    pub fn compare(&self) -> Result<Vec<FileComparison>, Error> {
        let old_files = list_files(&self.old_root)?;
        let new_files = list_files(&self.new_root)?;
        debug!(
            old = old_files.len(),
            new = new_files.len(),
            "comparing folders"
        );

        let mut results = Vec::new();
        for path in old_files.union(&new_files) {
            let status = match (old_files.contains(path), new_files.contains(path)) {
                (true, false) => FileStatus::Removed,
                (false, true) => FileStatus::Added,
                _ => self.compare_file(path)?,
            };
            results.push(FileComparison {
                path: path.clone(),
                status,
            });
        }

        Ok(results)
    }

    fn compare_file(&self, relative: &Path) -> Result<FileStatus, Error> {
        let old = fs::read(self.old_root.join(relative))?;
        let new = fs::read(self.new_root.join(relative))?;

        let (Ok(old), Ok(new)) = (String::from_utf8(old), String::from_utf8(new)) else {
            warn!(path = %relative.display(), "not UTF-8 text, skipping diff");
            return Ok(FileStatus::Binary);
        };

        let diff = Differ::new(&old, &new)
            .algorithm(self.algorithm)
            .normalization(self.normalization)
            .compute();

        if diff.iter().any(DiffEntry::is_change) {
            Ok(FileStatus::Modified(diff))
        } else {
            Ok(FileStatus::Identical)
        }
    }
}

/// Compare two directory trees with the default options.
pub fn compare_dirs<P: AsRef<Path>, Q: AsRef<Path>>(
    old_root: P,
    new_root: Q,
) -> Result<Vec<FileComparison>, Error> {
    FolderComparer::new(old_root, new_root).compare()
}

fn list_files(root: &Path) -> Result<BTreeSet<PathBuf>, Error> {
    if !root.is_dir() {
        return Err(Error::InvalidDirectory {
            path: root.display().to_string(),
        });
    }
    // Symlinks are not followed, so a link back up the tree cannot loop
    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.insert(relative.to_path_buf());
        }
    }
    Ok(files)
}
