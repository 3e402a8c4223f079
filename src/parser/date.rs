//! Posting-date extraction from section dividers.

use crate::model::YearMonth;

use super::patterns::Patterns;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Outcome of looking for a posting date in divider text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateExtraction {
    /// Year and month both parsed
    Resolved(YearMonth),
    /// Year parsed, month name not recognized
    UnresolvedMonth {
        /// Parsed year
        year: i32,
        /// Month text as it appeared
        token: String,
    },
    /// No `to D Mon YYYY` phrase in the text
    Missing,
}

impl DateExtraction {
    /// Collapse the outcome to an optional year/month; an unresolved month
    /// keeps its year.
    pub fn year_month(&self) -> Option<YearMonth> {
        match self {
            DateExtraction::Resolved(ym) => Some(*ym),
            DateExtraction::UnresolvedMonth { year, .. } => Some(YearMonth::year_only(*year)),
            DateExtraction::Missing => None,
        }
    }
}

/// Find the end date of a posting range (`... to 30 Jun 2019 ...`).
pub fn extract_date(patterns: &Patterns, text: &str) -> DateExtraction {
    let Some(caps) = patterns.date().captures(text) else {
        return DateExtraction::Missing;
    };

    let year = match caps.name("year").map(|m| m.as_str().parse::<i32>()) {
        Some(Ok(year)) => year,
        _ => return DateExtraction::Missing,
    };
    let token = caps.name("month").map(|m| m.as_str()).unwrap_or_default();

    match month_number(token) {
        Some(month) => DateExtraction::Resolved(YearMonth::new(year, month)),
        None => DateExtraction::UnresolvedMonth {
            year,
            token: token.to_string(),
        },
    }
}

/// Convenience wrapper over [`extract_date`] using the shared pattern set.
///
/// # Example
///
/// ```
/// use gutindex::parser::extract_year_month;
///
/// let ym = extract_year_month("eBooks:  1 Jun 2019 to 30 Jun 2019").unwrap();
/// assert_eq!((ym.year, ym.month), (2019, Some(6)));
/// ```
pub fn extract_year_month(text: &str) -> Option<YearMonth> {
    extract_date(Patterns::shared(), text).year_month()
}

/// Resolve an English month name to its number.
///
/// Three-letter tokens are tried against the abbreviations first, longer
/// tokens against the full names first; both tables are always consulted.
pub fn month_number(token: &str) -> Option<u8> {
    let token = token.to_lowercase();
    let (first, second) = if token.chars().count() == 3 {
        (&MONTH_ABBREVIATIONS, &MONTH_NAMES)
    } else {
        (&MONTH_NAMES, &MONTH_ABBREVIATIONS)
    };

    lookup(first, &token).or_else(|| lookup(second, &token))
}

fn lookup(table: &[&str; 12], token: &str) -> Option<u8> {
    table
        .iter()
        .position(|name| *name == token)
        .map(|idx| idx as u8 + 1)
}
