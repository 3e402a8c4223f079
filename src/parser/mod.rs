//! Catalog parsing module.
//!
//! Document → sections (by date divider) → item blocks (by blank line) →
//! records. Every stage takes the compiled [`Patterns`] by reference.

mod catalog_parser;
mod date;
mod item;
mod options;
mod patterns;
mod table;

pub use catalog_parser::{divide_sections, listing_body, CatalogParser};
pub use date::{extract_date, extract_year_month, month_number, DateExtraction};
pub use item::{assemble_item, classify_block, Assembly, ClassifiedLine, DiscardReason, AUTHOR_SEPARATOR};
pub use options::{ParseOptions, SectionSelection};
pub use patterns::{LineKind, Patterns, DATE_DIVIDER, LISTING_MARKER};
pub use table::{parse_table, Section, TableOutcome};
