mod lcs;
mod myers;

use std::borrow::Cow;

use crate::{DiffEntry, NormalizationOptions};

pub use lcs::{lcs_diff, LcsDiffer, LcsTable};
pub use myers::{myers_diff, MyersDiffer};

/// Trait for different diffing algorithms
pub trait DiffAlgorithm {
    /// Compute the line edit script from the old content to the new content
    fn compute(&self) -> Vec<DiffEntry>;
}

/// Enum to specify which diffing algorithm to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffAlgorithmType {
    /// Full LCS table with deterministic backtracking
    #[default]
    Lcs,
    /// Myers' O(ND) algorithm, for inputs too large for the LCS table
    Myers,
}

/// The base Differ struct that orchestrates the diffing process
#[derive(Debug, Clone)]
pub struct Differ {
    pub(crate) algorithm: DiffAlgorithmType,
    pub(crate) normalization: NormalizationOptions,
    pub(crate) old: String,
    pub(crate) new: String,
}

impl Differ {
    /// Create a new Differ with the old and new content using the LCS algorithm.
    pub fn new(old: &str, new: &str) -> Self {
        Self::new_with_algorithm(old, new, DiffAlgorithmType::Lcs)
    }

    /// Create a new Differ with the old and new content and a specified algorithm.
    pub fn new_with_algorithm(old: &str, new: &str, algorithm: DiffAlgorithmType) -> Self {
        Self {
            algorithm,
            normalization: NormalizationOptions::default(),
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    /// Create a Differ where either side may be missing; a missing side is empty.
    pub fn from_optional(old: Option<&str>, new: Option<&str>) -> Self {
        Self::new(old.unwrap_or_default(), new.unwrap_or_default())
    }

    /// Select the diffing algorithm.
    pub fn algorithm(mut self, algorithm: DiffAlgorithmType) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the normalization applied to both sides before diffing.
    ///
    /// Entries then carry the normalized line content. Line numbers still
    /// refer to the original texts, since normalization keeps line counts.
    pub fn normalization(mut self, options: NormalizationOptions) -> Self {
        self.normalization = options;
        self
    }

    pub(crate) fn normalized_old(&self) -> Cow<'_, str> {
        self.normalization.apply(&self.old)
    }

    pub(crate) fn normalized_new(&self) -> Cow<'_, str> {
        self.normalization.apply(&self.new)
    }
}

impl DiffAlgorithm for Differ {
    fn compute(&self) -> Vec<DiffEntry> {
        match self.algorithm {
            DiffAlgorithmType::Lcs => LcsDiffer::new(self).compute(),
            DiffAlgorithmType::Myers => MyersDiffer::new(self).compute(),
        }
    }
}

/// Diff two texts line by line with the LCS engine and no normalization.
pub fn compute_diff(old: &str, new: &str) -> Vec<DiffEntry> {
    Differ::new(old, new).compute()
}
