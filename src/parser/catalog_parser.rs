//! Catalog document parser.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Catalog;
use crate::normalize::{normalize_line_endings, normalize_unicode};

use super::options::ParseOptions;
use super::patterns::{Patterns, LISTING_MARKER};
use super::table::{parse_table, Section, TableOutcome};

/// Catalog document parser.
///
/// Holds a reference to a compiled [`Patterns`] set and the parse options;
/// the parser itself is immutable and can be reused across documents.
pub struct CatalogParser<'p> {
    patterns: &'p Patterns,
    options: ParseOptions,
}

impl CatalogParser<'static> {
    /// Create a parser with default options and the shared pattern set.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options and the shared pattern set.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            patterns: Patterns::shared(),
            options,
        }
    }
}

impl Default for CatalogParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> CatalogParser<'p> {
    /// Create a parser over a caller-owned pattern set.
    pub fn with_patterns(patterns: &'p Patterns, options: ParseOptions) -> Self {
        Self { patterns, options }
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a decoded catalog document.
    pub fn parse(&self, text: &str) -> Result<Catalog> {
        let mut normalized = normalize_line_endings(text);
        if self.options.normalize_unicode {
            normalized = normalize_unicode(&normalized);
        }

        let body = listing_body(&normalized)?;
        let sections: Vec<Section<'_>> = divide_sections(self.patterns, body)
            .into_iter()
            .filter(|section| self.options.sections.includes(section.number))
            .collect();

        log::debug!(
            "Parsing {} sections ({})",
            sections.len(),
            if self.options.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let outcomes: Vec<TableOutcome> = if self.options.parallel {
            sections
                .par_iter()
                .map(|section| parse_table(self.patterns, section))
                .collect()
        } else {
            sections
                .iter()
                .map(|section| parse_table(self.patterns, section))
                .collect()
        };

        let mut catalog = Catalog::new();
        for outcome in outcomes {
            catalog.stats.merge(&outcome.stats);
            catalog.records.extend(outcome.records);
        }

        log::info!(
            "Parsed {} records from {} sections ({} blocks discarded)",
            catalog.stats.record_count,
            catalog.stats.section_count,
            catalog.stats.discarded_blocks()
        );

        Ok(catalog)
    }
}

/// Return the text after the listing marker.
///
/// The marker must occur exactly once; otherwise the input is not a catalog.
pub fn listing_body(text: &str) -> Result<&str> {
    let mut parts = text.split(LISTING_MARKER);
    let _front = parts.next();
    match (parts.next(), parts.next()) {
        (Some(body), None) => Ok(body),
        (None, _) => Err(Error::MalformedDocument { markers: 0 }),
        (Some(_), Some(_)) => Err(Error::MalformedDocument {
            markers: text.matches(LISTING_MARKER).count(),
        }),
    }
}

/// Split a listing body into sections at each date divider.
///
/// The text before the first divider becomes the undated preamble section.
pub fn divide_sections<'a>(patterns: &Patterns, body: &'a str) -> Vec<Section<'a>> {
    patterns
        .split_sections(body)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| {
            if idx == 0 {
                Section::preamble(text)
            } else {
                Section::after_divider(idx as u32 + 1, text)
            }
        })
        .collect()
}
