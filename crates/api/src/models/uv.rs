use serde::{Deserialize, Serialize};

/// A versioned geometry source file (`*_mod.vNNN.abc`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UvCandidate {
    pub version: u32,
    pub path: String,
}

/// Geometry source candidates, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UvSource {
    candidates: Vec<UvCandidate>,
}

impl UvSource {
    pub fn new(mut candidates: Vec<UvCandidate>) -> Self {
        candidates.sort_by(|a, b| b.cmp(a));
        Self { candidates }
    }

    /// The newest candidate
    pub fn head(&self) -> Option<&UvCandidate> {
        self.candidates.first()
    }

    pub fn candidates(&self) -> &[UvCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
