//! Text normalization applied before and during catalog parsing.
//!
//! Every recognition pattern assumes `\n` line endings, so
//! [`normalize_line_endings`] runs on the whole document before anything
//! else. The remaining helpers are used by the item assembler to rebuild a
//! single logical entry from wrapped physical lines.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

static CR_LINE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+\n").expect("line ending pattern is valid"));

/// Collapse `\r\n` (and stray runs such as `\r\r\n`) into a single `\n`.
///
/// A lone `\r` not followed by `\n` is left as is.
pub fn normalize_line_endings(text: &str) -> String {
    CR_LINE_END.replace_all(text, "\n").into_owned()
}

/// Apply Unicode NFC normalization.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

/// Collapse every run of two or more whitespace characters into one space
/// and trim both ends.
///
/// A lone whitespace character (including a single `\n`) is left as is.
pub fn remove_extra_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Put every bracketed metadata group back on its own line.
///
/// The input is a joined entry; the output has a line break before each `[`
/// so the first line is the title text and the rest are metadata candidates.
pub fn arrange_entry_text(text: &str) -> String {
    remove_extra_whitespace(text).replace('[', "\n[")
}
