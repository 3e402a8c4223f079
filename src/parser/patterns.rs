//! Recognition patterns and line classification.
//!
//! All patterns are compiled once into a [`Patterns`] value. Parsing code
//! takes `&Patterns` so the set is shared read-only across threads.

use std::sync::LazyLock;

use regex::Regex;

/// Literal that introduces the catalog body.
pub const LISTING_MARKER: &str = "<==LISTINGS==>";

/// Phrase that opens every dated section.
pub const DATE_DIVIDER: &str = "~ ~ ~ ~ Posting Dates for the below eBooks:";

static SHARED: LazyLock<Patterns> = LazyLock::new(Patterns::new);

/// Compiled recognition patterns for the catalog format.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// Banner/comment lines bounded by four asterisks
    comment: Regex,
    /// Column header announcing the title/number layout
    header: Regex,
    /// Title text followed by a trailing identifier
    title_line: Regex,
    /// `[key: value]` metadata line
    metadata: Regex,
    /// Divider that opens a dated section
    divider: Regex,
    /// End date of a posting range: `to D Mon YYYY`
    date: Regex,
    /// One or more blank (or whitespace-only) lines
    block_separator: Regex,
}

/// Classification of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Banner, comment or column header; poisons the whole item block
    Noise,
    /// Title text with its trailing identifier
    Title {
        /// Leading text, trimmed
        text: &'a str,
        /// Trailing run of digits
        book_id: &'a str,
    },
    /// Bracketed metadata pair
    Metadata {
        /// Key as written, untrimmed
        key: &'a str,
        /// Value as written, untrimmed
        value: &'a str,
    },
    /// Anything else; continues the running title text
    Plain,
}

impl<'a> LineKind<'a> {
    /// Check if this line is noise.
    pub fn is_noise(&self) -> bool {
        matches!(self, LineKind::Noise)
    }
}

impl Patterns {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            comment: Regex::new(r"^\s?\*{4}[\s\S]+\*{4}").expect("comment pattern is valid"),
            header: Regex::new(r"^TITLE and AUTHOR[\s\S]+EBOOK NO\.").expect("header pattern is valid"),
            title_line: Regex::new(r"^(\w+[\s\S]+)\s+([0-9]+)").expect("title pattern is valid"),
            metadata: Regex::new(r"^\s*\[([^\]:]+): (.*)\]").expect("metadata pattern is valid"),
            divider: Regex::new(&format!(r"{}[ \t]*", regex::escape(DATE_DIVIDER)))
                .expect("divider pattern is valid"),
            date: Regex::new(
                r"to (?P<day>[0-9]{1,2}) (?P<month>[A-Z][a-z]{2,8}) (?P<year>[0-9]{4})",
            )
            .expect("date pattern is valid"),
            block_separator: Regex::new(r"\n(?:[ \t]*\n)+").expect("block separator pattern is valid"),
        }
    }

    /// Process-wide pattern set, compiled on first use.
    pub fn shared() -> &'static Patterns {
        &SHARED
    }

    /// Classify one line. Noise is checked first, then title, then metadata.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if self.is_noise(line) {
            return LineKind::Noise;
        }

        if let Some(caps) = self.title_line.captures(line) {
            if let (Some(text), Some(id)) = (caps.get(1), caps.get(2)) {
                return LineKind::Title {
                    text: text.as_str().trim(),
                    book_id: id.as_str(),
                };
            }
        }

        if let Some((key, value)) = self.metadata_pair(line) {
            return LineKind::Metadata { key, value };
        }

        LineKind::Plain
    }

    /// Check for banner/comment or column header text.
    pub fn is_noise(&self, line: &str) -> bool {
        self.comment.is_match(line) || self.header.is_match(line)
    }

    /// Match a `[key: value]` line.
    pub fn metadata_pair<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.metadata.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    /// Split a catalog body into section texts at each date divider.
    pub fn split_sections<'a>(&self, body: &'a str) -> Vec<&'a str> {
        self.divider.split(body).collect()
    }

    /// Split a section body into item blocks at blank lines.
    pub fn split_blocks<'a>(&self, body: &'a str) -> Vec<&'a str> {
        self.block_separator.split(body).collect()
    }

    /// Pattern for the end date of a posting range.
    pub(crate) fn date(&self) -> &Regex {
        &self.date
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}
