//! Catalog-level types.

use super::Record;
use serde::{Deserialize, Serialize};

/// A parsed catalog: every record in document order plus parse statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Records in section order, then item order
    pub records: Vec<Record>,

    /// What the parser saw and skipped along the way
    pub stats: CatalogStats,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Find a record by its identifier.
    pub fn find(&self, book_id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.book_id == book_id)
    }

    /// Consume the catalog and return its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for Catalog {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Counters collected while parsing a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Sections parsed (after selection), including the undated preamble
    pub section_count: u32,

    /// Sections whose divider carried no recognizable date
    pub undated_sections: u32,

    /// Sections with a year but an unrecognized month name
    pub unresolved_months: u32,

    /// Records emitted
    pub record_count: u32,

    /// Blocks dropped because they contained banner or header lines
    pub noise_blocks: u32,

    /// Blocks dropped for lack of a title line
    pub untitled_blocks: u32,

    /// Blocks dropped for lack of an identifier
    pub unidentified_blocks: u32,
}

impl CatalogStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total blocks dropped for any reason.
    pub fn discarded_blocks(&self) -> u32 {
        self.noise_blocks + self.untitled_blocks + self.unidentified_blocks
    }

    /// Merge another set of counters into this one.
    pub fn merge(&mut self, other: &CatalogStats) {
        self.section_count += other.section_count;
        self.undated_sections += other.undated_sections;
        self.unresolved_months += other.unresolved_months;
        self.record_count += other.record_count;
        self.noise_blocks += other.noise_blocks;
        self.untitled_blocks += other.untitled_blocks;
        self.unidentified_blocks += other.unidentified_blocks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_new() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert_eq!(catalog.stats.discarded_blocks(), 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = CatalogStats {
            section_count: 1,
            record_count: 3,
            noise_blocks: 1,
            ..Default::default()
        };
        let other = CatalogStats {
            section_count: 2,
            undated_sections: 1,
            record_count: 4,
            unidentified_blocks: 2,
            ..Default::default()
        };
        total.merge(&other);

        assert_eq!(total.section_count, 3);
        assert_eq!(total.undated_sections, 1);
        assert_eq!(total.record_count, 7);
        assert_eq!(total.discarded_blocks(), 3);
    }
}
