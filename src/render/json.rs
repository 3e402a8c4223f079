//! JSON rendering for catalog records.

use crate::error::{Error, Result};
use crate::model::{Catalog, Record};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert records to a JSON array of objects.
pub fn to_json(records: &[Record], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records),
        JsonFormat::Compact => serde_json::to_string(records),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a whole catalog (records and statistics) to JSON.
pub fn catalog_to_json(catalog: &Catalog, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(catalog),
        JsonFormat::Compact => serde_json::to_string(catalog),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse records back from a JSON array.
pub fn from_json(json: &str) -> Result<Vec<Record>> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::YearMonth;
    use std::collections::BTreeMap;

    fn record() -> Record {
        Record {
            book_id: "1".to_string(),
            title: "Test".to_string(),
            author: None,
            title_line: "Test".to_string(),
            info_text: "Test".to_string(),
            year_month: Some(YearMonth::new(2019, 6)),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&[record()], JsonFormat::Pretty).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"book_id\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&[record()], JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(to_json(&[], JsonFormat::Compact).unwrap(), "[]");
    }

    #[test]
    fn test_catalog_to_json_includes_stats() {
        let mut catalog = Catalog::new();
        catalog.records.push(record());
        catalog.stats.record_count = 1;

        let json = catalog_to_json(&catalog, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"stats\""));
        assert!(json.contains("\"record_count\":1"));
    }

    #[test]
    fn test_from_json() {
        let json = to_json(&[record()], JsonFormat::Compact).unwrap();
        let records = from_json(&json).unwrap();
        assert_eq!(records, vec![record()]);
        assert!(from_json("{").is_err());
    }
}
