use serde::{Deserialize, Serialize};

/// Counters collected while building a search index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Features offered to the builder
    pub features_seen: u64,
    /// Features that contributed to an entry
    pub features_indexed: u64,
    /// Features dropped because they carry no name
    pub skipped_unnamed: u64,
    /// Coordinates folded into bounding boxes
    pub points: u64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another builder's counters to these.
    pub fn absorb(&mut self, other: &IndexStats) {
        self.features_seen += other.features_seen;
        self.features_indexed += other.features_indexed;
        self.skipped_unnamed += other.skipped_unnamed;
        self.points += other.points;
    }
}
