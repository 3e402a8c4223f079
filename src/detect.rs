//! Catalog format detection and decoding.

use crate::error::Result;
use crate::parser::{listing_body, DATE_DIVIDER};
use std::fs;
use std::path::Path;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Catalog format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFormat {
    /// Number of date dividers in the listing body
    pub divider_count: usize,
    /// Whether the text uses `\r\n` line endings
    pub crlf: bool,
}

impl std::fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "catalog with {} dated sections", self.divider_count)
    }
}

/// Decode catalog bytes as UTF-8, dropping a leading byte order mark.
///
/// # Returns
/// * `Ok(String)` with the decoded text
/// * `Err(Error::Encoding)` if the data is not valid UTF-8
pub fn decode_bytes(data: &[u8]) -> Result<String> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    Ok(std::str::from_utf8(data)?.to_string())
}

/// Detect the catalog format from decoded text.
///
/// # Returns
/// * `Ok(CatalogFormat)` if the text has exactly one listing marker
/// * `Err(Error::MalformedDocument)` otherwise
pub fn detect_format(text: &str) -> Result<CatalogFormat> {
    let body = listing_body(text)?;
    Ok(CatalogFormat {
        divider_count: body.matches(DATE_DIVIDER).count(),
        crlf: text.contains("\r\n"),
    })
}

/// Detect the catalog format of a file.
///
/// # Example
/// ```no_run
/// use gutindex::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("GUTINDEX.2019").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<CatalogFormat> {
    let data = fs::read(path)?;
    detect_format(&decode_bytes(&data)?)
}

/// Check if text looks like a catalog.
pub fn is_catalog(text: &str) -> bool {
    detect_format(text).is_ok()
}

/// Check if a file looks like a catalog.
pub fn is_catalog_file<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}
