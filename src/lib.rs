//! # gutindex
//!
//! Structured record extraction from plain-text eBook catalog indexes.
//!
//! A catalog (such as Project Gutenberg's `GUTINDEX` files) is a long text
//! document of dated tables. Each table lists entries whose title wraps over
//! several lines, ends in an identifier, and may carry bracketed metadata.
//! This library turns that document into an ordered list of [`Record`]s.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gutindex::{parse_file, render};
//!
//! fn main() -> gutindex::Result<()> {
//!     let catalog = parse_file("GUTINDEX.2019")?;
//!
//!     for record in &catalog {
//!         println!("{} {}", record.book_id, record.title);
//!     }
//!
//!     let json = render::to_json(&catalog.records, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Wrapped entries**: title lines split across physical lines are rejoined
//! - **Metadata**: `[Key: value]` groups anywhere in an entry become fields
//! - **Dated sections**: every record carries its posting year and month
//! - **Parallel processing**: Uses Rayon across sections, order preserved
//! - **Recoverable input**: undated sections and malformed entries are
//!   counted, not fatal

pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{decode_bytes, detect_format, detect_format_from_path, is_catalog, CatalogFormat};
pub use error::{Error, Result};
pub use model::{Catalog, CatalogStats, Record, YearMonth};
pub use normalize::{normalize_line_endings, remove_extra_whitespace};
pub use parser::{extract_year_month, CatalogParser, ParseOptions, Patterns, SectionSelection};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a decoded catalog document.
///
/// # Arguments
///
/// * `text` - Full catalog text; line endings may be `\r\n` or `\n`
///
/// # Returns
///
/// A `Result` containing the parsed `Catalog`, or
/// `Error::MalformedDocument` when the text is not a catalog at all.
///
/// # Example
///
/// ```
/// let text = "header\n<==LISTINGS==>\n\n\
///     ~ ~ ~ ~ Posting Dates for the below eBooks:  1 Jun 2019 to 30 Jun 2019 ~ ~ ~ ~\n\n\
///     Some Title, by Some Author        12345\n";
/// let catalog = gutindex::parse_str(text).unwrap();
/// assert_eq!(catalog.records[0].book_id, "12345");
/// ```
pub fn parse_str(text: &str) -> Result<Catalog> {
    CatalogParser::new().parse(text)
}

/// Parse a decoded catalog document with custom options.
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<Catalog> {
    CatalogParser::with_options(options).parse(text)
}

/// Parse a catalog from UTF-8 bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Catalog> {
    parse_str(&decode_bytes(data)?)
}

/// Parse a catalog from UTF-8 bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Catalog> {
    parse_str_with_options(&decode_bytes(data)?, options)
}

/// Parse a catalog file.
///
/// # Example
///
/// ```no_run
/// use gutindex::parse_file;
///
/// let catalog = parse_file("GUTINDEX.2019").unwrap();
/// println!("Records: {}", catalog.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a catalog file with custom options.
///
/// # Example
///
/// ```no_run
/// use gutindex::{parse_file_with_options, ParseOptions, SectionSelection};
///
/// let options = ParseOptions::new()
///     .sequential()
///     .with_sections(SectionSelection::Range(2..=4));
/// let catalog = parse_file_with_options("GUTINDEX.2019", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Catalog> {
    let data = std::fs::read(path)?;
    parse_bytes_with_options(&data, options)
}

/// Parse a catalog from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Catalog> {
    parse_reader_with_options(reader, ParseOptions::default())
}

/// Parse a catalog from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Catalog> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_bytes_with_options(&data, options)
}

/// Parse a catalog file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Catalog> {
    let data = tokio::fs::read(path).await?;
    parse_bytes_with_options(&data, options)
}

/// Convert catalog text straight to a JSON array of records.
///
/// # Example
///
/// ```
/// use gutindex::{text_to_json, JsonFormat};
///
/// let json = text_to_json("<==LISTINGS==>\n", JsonFormat::Compact).unwrap();
/// assert_eq!(json, "[]");
/// ```
pub fn text_to_json(text: &str, format: JsonFormat) -> Result<String> {
    let catalog = parse_str(text)?;
    render::to_json(&catalog.records, format)
}

/// Convert a catalog file to a JSON array of records.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let catalog = parse_file(path)?;
    render::to_json(&catalog.records, format)
}

/// Builder for parsing catalogs.
///
/// # Example
///
/// ```no_run
/// use gutindex::{Gutindex, JsonFormat};
///
/// let json = Gutindex::new()
///     .sequential()
///     .with_sections("2-4")?
///     .parse_file("GUTINDEX.2019")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), gutindex::Error>(())
/// ```
pub struct Gutindex {
    parse_options: ParseOptions,
}

impl Gutindex {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
        }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Enable Unicode NFC normalization of the input.
    pub fn with_unicode_normalization(mut self) -> Self {
        self.parse_options = self.parse_options.with_unicode_normalization(true);
        self
    }

    /// Restrict parsing to the given sections (e.g. "2-4", "1,3").
    pub fn with_sections(mut self, selection: &str) -> Result<Self> {
        self.parse_options = self
            .parse_options
            .with_sections(SectionSelection::parse(selection)?);
        Ok(self)
    }

    /// Parse catalog text.
    pub fn parse_str(self, text: &str) -> Result<GutindexResult> {
        let catalog = CatalogParser::with_options(self.parse_options).parse(text)?;
        Ok(GutindexResult { catalog })
    }

    /// Parse a catalog file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<GutindexResult> {
        let catalog = parse_file_with_options(path, self.parse_options)?;
        Ok(GutindexResult { catalog })
    }

    /// Parse catalog bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<GutindexResult> {
        let catalog = parse_bytes_with_options(data, self.parse_options)?;
        Ok(GutindexResult { catalog })
    }
}

impl Default for Gutindex {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a catalog.
pub struct GutindexResult {
    /// The parsed catalog
    pub catalog: Catalog,
}

impl GutindexResult {
    /// Convert records to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.catalog.records, format)
    }

    /// Get the records.
    pub fn records(&self) -> &[Record] {
        &self.catalog.records
    }

    /// Get the parse statistics.
    pub fn stats(&self) -> &CatalogStats {
        &self.catalog.stats
    }

    /// Consume the result and return the catalog.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<==LISTINGS==>\n\n\
~ ~ ~ ~ Posting Dates for the below eBooks:  1 Jun 2019 to 30 Jun 2019 ~ ~ ~ ~\n\n\
Some Title, by Some Author                                   12345\n";

    #[test]
    fn test_builder_default() {
        let builder = Gutindex::default();
        assert!(builder.parse_options.parallel);
    }

    #[test]
    fn test_builder_chained() {
        let builder = Gutindex::new()
            .sequential()
            .with_unicode_normalization()
            .with_sections("2-3")
            .unwrap();

        assert!(!builder.parse_options.parallel);
        assert!(builder.parse_options.normalize_unicode);
        assert_eq!(builder.parse_options.sections, SectionSelection::Range(2..=3));
    }

    #[test]
    fn test_builder_invalid_sections() {
        assert!(matches!(
            Gutindex::new().with_sections("x"),
            Err(Error::InvalidSectionSelection(_))
        ));
    }

    #[test]
    fn test_builder_parse_str() {
        let result = Gutindex::new().parse_str(DOC).unwrap();
        assert_eq!(result.records().len(), 1);
        assert_eq!(result.stats().record_count, 1);
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("12345"));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let result = parse_bytes(&[]);
        assert!(matches!(result, Err(Error::MalformedDocument { markers: 0 })));
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let result = parse_bytes(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_parse_bytes_with_bom() {
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend_from_slice(DOC.as_bytes());
        assert_eq!(parse_bytes(&data).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_reader() {
        let catalog = parse_reader(DOC.as_bytes()).unwrap();
        assert_eq!(catalog.records[0].title, "Some Title");
    }

    #[test]
    fn test_text_to_json() {
        let json = text_to_json(DOC, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"author\":\"Some Author\""));
        assert!(text_to_json("not a catalog", JsonFormat::Compact).is_err());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_parse_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GUTINDEX.2019");
        std::fs::write(&path, DOC).unwrap();

        let catalog = parse_file_async(&path, ParseOptions::new().sequential())
            .await
            .unwrap();
        assert_eq!(catalog.records[0].year_month, Some(YearMonth::new(2019, 6)));
    }
}
