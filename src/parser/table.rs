//! Table parsing: one dated section of the listings to its records.

use crate::model::{CatalogStats, Record};

use super::date::{extract_date, DateExtraction};
use super::item::{assemble_item, Assembly, DiscardReason};
use super::patterns::Patterns;

/// A contiguous span of listings under one posting-date divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Position in the document (1-indexed; the preamble is 1)
    pub number: u32,
    /// Remainder of the divider line (the date range), absent for the preamble
    pub divider: Option<&'a str>,
    /// Listing text under the divider
    pub body: &'a str,
}

impl<'a> Section<'a> {
    /// Text between the listing marker and the first divider.
    pub fn preamble(body: &'a str) -> Self {
        Self {
            number: 1,
            divider: None,
            body,
        }
    }

    /// Text that followed a divider: its first line is the divider's date
    /// range, the rest is the listing body.
    pub fn after_divider(number: u32, text: &'a str) -> Self {
        let (divider, body) = text.split_once('\n').unwrap_or((text, ""));
        Self {
            number,
            divider: Some(divider),
            body,
        }
    }
}

/// Records and counters produced from one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    /// Date found on the section's divider
    pub date: DateExtraction,
    /// Records in block order, stamped with the section's date
    pub records: Vec<Record>,
    /// Counters for this section alone
    pub stats: CatalogStats,
}

/// Parse one section into records.
pub fn parse_table(patterns: &Patterns, section: &Section<'_>) -> TableOutcome {
    let mut stats = CatalogStats {
        section_count: 1,
        ..Default::default()
    };

    let date = match section.divider {
        Some(divider) => extract_date(patterns, divider),
        None => DateExtraction::Missing,
    };
    match (&date, section.divider) {
        (DateExtraction::Missing, Some(divider)) => {
            log::warn!(
                "Section {}: no posting date in divider {:?}",
                section.number,
                divider.trim()
            );
            stats.undated_sections += 1;
        }
        (DateExtraction::Missing, None) => stats.undated_sections += 1,
        (DateExtraction::UnresolvedMonth { year, token }, _) => {
            log::warn!(
                "Section {}: unrecognized month {:?} in {}",
                section.number,
                token,
                year
            );
            stats.unresolved_months += 1;
        }
        (DateExtraction::Resolved(_), _) => {}
    }
    let year_month = date.year_month();

    let mut records = Vec::new();
    // Separator leftovers around dividers are not entries.
    for block in patterns
        .split_blocks(section.body)
        .into_iter()
        .filter(|block| !block.trim().is_empty())
    {
        match assemble_item(patterns, block) {
            Assembly::Record(mut record) => {
                record.year_month = year_month;
                records.push(record);
            }
            Assembly::Discarded(reason) => {
                log::debug!(
                    "Section {}: discarded block ({:?}): {:?}",
                    section.number,
                    reason,
                    block.lines().next().unwrap_or_default()
                );
                count_discard(&mut stats, reason);
            }
        }
    }

    stats.record_count = records.len() as u32;
    log::debug!(
        "Section {} ({}): {} records, {} blocks discarded",
        section.number,
        year_month.map(|ym| ym.to_string()).unwrap_or_else(|| "undated".to_string()),
        stats.record_count,
        stats.discarded_blocks()
    );

    TableOutcome {
        date,
        records,
        stats,
    }
}

fn count_discard(stats: &mut CatalogStats, reason: DiscardReason) {
    match reason {
        DiscardReason::Noise => stats.noise_blocks += 1,
        DiscardReason::MissingTitle => stats.untitled_blocks += 1,
        DiscardReason::MissingBookId => stats.unidentified_blocks += 1,
    }
}
