//! Record-level types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field names a bracketed metadata key may not take over.
pub const RESERVED_FIELDS: &[&str] = &[
    "book_id",
    "title",
    "title_line",
    "info_text",
    "author",
    "year_month",
];

/// Year and (optional) month of a posting-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Four-digit year
    pub year: i32,

    /// Month number (1-12), absent when the month name did not resolve
    pub month: Option<u8>,
}

impl YearMonth {
    /// Create a year/month pair.
    pub fn new(year: i32, month: u8) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }

    /// Create a year without a month.
    pub fn year_only(year: i32) -> Self {
        Self { year, month: None }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}-{:02}", self.year, month),
            None => write!(f, "{:04}", self.year),
        }
    }
}

/// One cataloged item.
///
/// Bracketed metadata (`[Language: French]`) is kept in `metadata` under the
/// lower-cased key and is flattened into the record object when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier taken from the trailing number of the title line
    pub book_id: String,

    /// Title text before the `", by"` separator
    pub title: String,

    /// Text after the `", by"` separator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Full reconstructed title line
    pub title_line: String,

    /// Reassembled entry text, one metadata group per line
    pub info_text: String,

    /// Posting date of the owning section
    pub year_month: Option<YearMonth>,

    /// Lower-cased metadata keys mapped to their values
    #[serde(flatten)]
    pub metadata: BTreeMap<String, String>,
}

impl Record {
    /// Look up a metadata value by key (keys are stored lower-cased).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    /// Language metadata, if present.
    pub fn language(&self) -> Option<&str> {
        self.get("language")
    }

    /// Subtitle metadata, if present.
    pub fn subtitle(&self) -> Option<&str> {
        self.get("subtitle")
    }

    /// Check whether the record carries every required field.
    pub fn is_complete(&self) -> bool {
        !self.book_id.is_empty() && !self.title_line.is_empty() && !self.title.is_empty()
    }
}
