//! Item assembly: one blank-line-delimited block of catalog text to one record.
//!
//! Entries wrap their title across physical lines and put bracketed
//! metadata anywhere in the block. The assembler joins the block into one
//! line, normalizes whitespace, then breaks it again before every `[`: the
//! first resulting line is the title, every later line is a metadata
//! candidate, regardless of where the brackets sat in the raw text.

use std::collections::BTreeMap;

use crate::model::{Record, RESERVED_FIELDS};
use crate::normalize::arrange_entry_text;

use super::patterns::{LineKind, Patterns};

/// Separator between title and author in a title line.
pub const AUTHOR_SEPARATOR: &str = ", by";

/// Why a block produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// Block contains a banner, comment or column header line
    Noise,
    /// No non-empty title text after reassembly
    MissingTitle,
    /// No line ended in an identifier
    MissingBookId,
}

/// Outcome of assembling one item block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// A complete record (its `year_month` is filled in by the table parser)
    Record(Record),
    /// The block was dropped
    Discarded(DiscardReason),
}

impl Assembly {
    /// Return the record, if one was assembled.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Assembly::Record(record) => Some(record),
            Assembly::Discarded(_) => None,
        }
    }
}

/// A physical line together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// Line as it appeared in the block
    pub raw: &'a str,
    /// What the line was recognized as
    pub kind: LineKind<'a>,
}

/// Title fragments and identifier gathered from a block's lines.
#[derive(Debug, Default)]
struct Draft<'a> {
    fragments: Vec<&'a str>,
    book_id: Option<&'a str>,
}

/// Classify every line of a block. A single noise line rejects the block.
pub fn classify_block<'a>(
    patterns: &Patterns,
    block: &'a str,
) -> Result<Vec<ClassifiedLine<'a>>, DiscardReason> {
    block
        .lines()
        .map(|raw| match patterns.classify(raw) {
            LineKind::Noise => Err(DiscardReason::Noise),
            kind => Ok(ClassifiedLine { raw, kind }),
        })
        .collect()
}

/// Assemble one item block into a record.
pub fn assemble_item(patterns: &Patterns, block: &str) -> Assembly {
    let lines = match classify_block(patterns, block) {
        Ok(lines) => lines,
        Err(reason) => return Assembly::Discarded(reason),
    };

    let draft = lines.iter().fold(Draft::default(), |mut draft, line| {
        match line.kind {
            LineKind::Title { text, book_id } => {
                draft.fragments.push(text);
                draft.book_id = Some(book_id);
            }
            _ => draft.fragments.push(line.raw),
        }
        draft
    });

    let info_text = arrange_entry_text(&draft.fragments.join(" "));
    let mut arranged = info_text.lines();

    let title_line = match arranged.next().map(str::trim) {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => return Assembly::Discarded(DiscardReason::MissingTitle),
    };

    let metadata = collect_metadata(patterns, arranged);

    let Some(book_id) = draft.book_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Assembly::Discarded(DiscardReason::MissingBookId);
    };

    let (title, author) = split_author(&title_line);
    if title.is_empty() {
        return Assembly::Discarded(DiscardReason::MissingTitle);
    }

    Assembly::Record(Record {
        book_id: book_id.to_string(),
        title,
        author,
        title_line,
        info_text,
        year_month: None,
        metadata,
    })
}

/// Gather `[key: value]` pairs; keys are lower-cased and the last one wins.
fn collect_metadata<'a>(
    patterns: &Patterns,
    lines: impl Iterator<Item = &'a str>,
) -> BTreeMap<String, String> {
    lines
        .filter_map(|line| patterns.metadata_pair(line))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .filter(|(key, _)| {
            let reserved = RESERVED_FIELDS.contains(&key.as_str());
            if reserved {
                log::debug!("Dropping metadata key that shadows a record field: {}", key);
            }
            !reserved
        })
        .collect()
}

/// Split a title line into title and author at the first separator.
fn split_author(title_line: &str) -> (String, Option<String>) {
    match title_line.split_once(AUTHOR_SEPARATOR) {
        Some((title, author)) => {
            let author = author.trim();
            (
                title.trim().to_string(),
                (!author.is_empty()).then(|| author.to_string()),
            )
        }
        None => (title_line.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(block: &str) -> Assembly {
        assemble_item(&Patterns::new(), block)
    }

    #[test]
    fn test_title_author_and_language() {
        let block = "Some Title, by Some Author    12345\n  [Language: French]";
        let record = assemble(block).into_record().unwrap();

        assert_eq!(record.book_id, "12345");
        assert_eq!(record.title, "Some Title");
        assert_eq!(record.author.as_deref(), Some("Some Author"));
        assert_eq!(record.title_line, "Some Title, by Some Author");
        assert_eq!(record.language(), Some("French"));
        assert_eq!(record.year_month, None);
    }

    #[test]
    fn test_wrapped_title_is_rejoined() {
        let block = "The Annals of a Quiet Neighbourhood, by George                 60231\n MacDonald\n [Subtitle: A Novel]";
        let record = assemble(block).into_record().unwrap();

        assert_eq!(record.book_id, "60231");
        assert_eq!(
            record.title_line,
            "The Annals of a Quiet Neighbourhood, by George MacDonald"
        );
        assert_eq!(record.title, "The Annals of a Quiet Neighbourhood");
        assert_eq!(record.author.as_deref(), Some("George MacDonald"));
        assert_eq!(record.subtitle(), Some("A Novel"));
    }

    #[test]
    fn test_title_wrapped_after_number_line() {
        let block = "Punch, or the London Charivari, Vol. 152, Jan. 3,     54876\n 1917, by Various";
        let record = assemble(block).into_record().unwrap();

        assert_eq!(record.book_id, "54876");
        assert_eq!(
            record.title_line,
            "Punch, or the London Charivari, Vol. 152, Jan. 3, 1917, by Various"
        );
        assert_eq!(record.author.as_deref(), Some("Various"));
    }

    #[test]
    fn test_metadata_on_title_line_is_split_out() {
        let block = "Contes, by Anonymous [Language: French]     61000";
        let record = assemble(block).into_record().unwrap();

        assert_eq!(record.title_line, "Contes, by Anonymous");
        assert_eq!(record.language(), Some("French"));
    }

    #[test]
    fn test_duplicate_metadata_last_wins() {
        let block = "A Book, by Someone   7\n [Language: English]\n [language: German ]";
        let record = assemble(block).into_record().unwrap();

        assert_eq!(record.metadata.len(), 1);
        assert_eq!(record.language(), Some("German"));
    }

    #[test]
    fn test_info_text_has_one_metadata_group_per_line() {
        let block = "A Book, by Someone   7\n [Language: English] [Illustrator: Jane Roe]";
        let record = assemble(block).into_record().unwrap();

        let lines: Vec<&str> = record.info_text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("[Language"));
        assert!(lines[2].starts_with("[Illustrator"));
        assert_eq!(record.get("illustrator"), Some("Jane Roe"));
    }

    #[test]
    fn test_noise_discards_valid_block() {
        let block = "Some Title, by Some Author    12345\n**** leaked banner text ****";
        assert_eq!(assemble(block), Assembly::Discarded(DiscardReason::Noise));
    }

    #[test]
    fn test_header_is_noise() {
        let block = "TITLE and AUTHOR                                     EBOOK NO.";
        assert_eq!(assemble(block), Assembly::Discarded(DiscardReason::Noise));
    }

    #[test]
    fn test_missing_book_id() {
        let block = "A Title Without Number, by Nobody\n [Language: English]";
        assert_eq!(
            assemble(block),
            Assembly::Discarded(DiscardReason::MissingBookId)
        );
    }

    #[test]
    fn test_metadata_only_block_has_no_title() {
        assert_eq!(
            assemble(" [Language: English]"),
            Assembly::Discarded(DiscardReason::MissingTitle)
        );
        assert_eq!(
            assemble(""),
            Assembly::Discarded(DiscardReason::MissingTitle)
        );
    }

    #[test]
    fn test_no_author_separator() {
        let record = assemble("Anonymous Pamphlet     999").into_record().unwrap();
        assert_eq!(record.title, "Anonymous Pamphlet");
        assert_eq!(record.author, None);
    }

    #[test]
    fn test_reserved_metadata_key_dropped() {
        let record = assemble("A Book, by Someone   7\n [Title: Other]")
            .into_record()
            .unwrap();
        assert_eq!(record.title, "A Book");
        assert!(record.metadata.is_empty());
    }

    #[test]
    fn test_classify_block_keeps_raw_lines() {
        let patterns = Patterns::new();
        let lines = classify_block(&patterns, "A Book   7\n [Language: English]\n more").unwrap();
        assert_eq!(lines.len(), 3);
        assert!(matches!(lines[0].kind, LineKind::Title { book_id: "7", .. }));
        assert!(matches!(lines[1].kind, LineKind::Metadata { .. }));
        assert_eq!(lines[2].kind, LineKind::Plain);
        assert_eq!(lines[2].raw, " more");
    }
}
