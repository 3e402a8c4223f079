//! Parsing options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for parsing catalog documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to parse sections in parallel
    pub parallel: bool,

    /// Which sections to parse (1-indexed; the undated preamble is section 1)
    pub sections: SectionSelection,

    /// Apply Unicode NFC normalization before matching
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set section selection.
    pub fn with_sections(mut self, sections: SectionSelection) -> Self {
        self.sections = sections;
        self
    }

    /// Enable or disable Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            sections: SectionSelection::All,
            normalize_unicode: false,
        }
    }
}

/// Section selection for parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionSelection {
    /// Parse all sections
    #[default]
    All,
    /// Parse a range of sections (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Parse several ranges (inclusive, 1-indexed), sorted and non-overlapping
    Sections(Vec<RangeInclusive<u32>>),
}

impl SectionSelection {
    /// Check if a section number should be included.
    pub fn includes(&self, section: u32) -> bool {
        match self {
            SectionSelection::All => true,
            SectionSelection::Range(range) => range.contains(&section),
            SectionSelection::Sections(ranges) => {
                ranges.iter().any(|range| range.contains(&section))
            }
        }
    }

    /// Parse a selection string (e.g., "2-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(SectionSelection::All);
        }

        let invalid = || Error::InvalidSectionSelection(s.to_string());
        let mut ranges = s
            .split(',')
            .map(|part| parse_range(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()?;

        if ranges.len() == 1 {
            return Ok(SectionSelection::Range(ranges.remove(0)));
        }

        ranges.sort_by_key(|range| *range.start());
        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    let end = (*last.end()).max(*range.end());
                    *last = *last.start()..=end;
                }
                _ => merged.push(range),
            }
        }

        Ok(SectionSelection::Sections(merged))
    }
}

/// Parse `"N"` or `"N-M"`; a reversed range is rejected.
fn parse_range(part: &str) -> Option<RangeInclusive<u32>> {
    let part = part.trim();
    let (start, end): (u32, u32) = match part.split_once('-') {
        Some((start, end)) => (start.trim().parse().ok()?, end.trim().parse().ok()?),
        None => {
            let n = part.parse().ok()?;
            (n, n)
        }
    };
    (start <= end).then_some(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .sequential()
            .with_unicode_normalization(true)
            .with_sections(SectionSelection::Range(2..=4));

        assert!(!options.parallel);
        assert!(options.normalize_unicode);
        assert_eq!(options.sections, SectionSelection::Range(2..=4));
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.parallel);
        assert!(!options.normalize_unicode);
        assert_eq!(options.sections, SectionSelection::All);
    }

    #[test]
    fn test_section_selection_includes() {
        let all = SectionSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = SectionSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let sections = SectionSelection::Sections(vec![1..=1, 3..=3, 5..=7]);
        assert!(sections.includes(1));
        assert!(!sections.includes(2));
        assert!(sections.includes(3));
        assert!(sections.includes(6));
        assert!(!sections.includes(8));
    }

    #[test]
    fn test_section_selection_parse() {
        assert_eq!(SectionSelection::parse("all").unwrap(), SectionSelection::All);
        assert_eq!(
            SectionSelection::parse("1-10").unwrap(),
            SectionSelection::Range(1..=10)
        );
        assert_eq!(
            SectionSelection::parse("1,3,5-7,10,3").unwrap(),
            SectionSelection::Sections(vec![1..=1, 3..=3, 5..=7, 10..=10])
        );
        assert_eq!(
            SectionSelection::parse("4").unwrap(),
            SectionSelection::Range(4..=4)
        );
        assert_eq!(
            SectionSelection::parse("6-8, 2,3, 7-12").unwrap(),
            SectionSelection::Sections(vec![2..=3, 6..=12])
        );
    }

    #[test]
    fn test_section_selection_parse_invalid() {
        assert!(matches!(
            SectionSelection::parse("a-b"),
            Err(Error::InvalidSectionSelection(_))
        ));
        assert!(SectionSelection::parse("9-2").is_err());
        assert!(SectionSelection::parse("1,x").is_err());
        assert!(SectionSelection::parse("1,").is_err());
    }

    #[test]
    fn test_reversed_range_in_list_is_rejected() {
        assert!(matches!(
            SectionSelection::parse("1,9-2"),
            Err(Error::InvalidSectionSelection(_))
        ));
    }

    #[test]
    fn test_huge_range_in_list_is_not_expanded() {
        let selection = SectionSelection::parse("1,1-4294967295").unwrap();
        assert_eq!(selection, SectionSelection::Sections(vec![1..=u32::MAX]));
        assert!(selection.includes(u32::MAX));
        assert!(!selection.includes(0));
    }
}
