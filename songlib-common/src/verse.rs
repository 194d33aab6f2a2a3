//! Verse extraction from stored lyric text
//!
//! Lyrics are stored as one text body with stanzas separated by a blank
//! line (two consecutive newline characters). Verses are addressed with a
//! 1-based index in text order.

use crate::{Error, Result};

/// Stanza delimiter: one blank line
pub const VERSE_DELIMITER: &str = "\n\n";

/// Split lyric text into its ordered stanzas
///
/// Empty text has no stanzas.
pub fn split_verses(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(VERSE_DELIMITER).collect()
}

/// Return the stanza at a 1-based `index`
///
/// # Errors
/// `Error::VerseOutOfRange` when `index` is 0 or past the last stanza.
pub fn verse_at(text: &str, index: usize) -> Result<&str> {
    let verses = split_verses(text);
    if index == 0 || index > verses.len() {
        return Err(Error::VerseOutOfRange {
            requested: index,
            available: verses.len(),
        });
    }
    Ok(verses[index - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const LYRICS: &str = "A line\n\nB line\n\nC line";

    #[test]
    fn test_split_preserves_order() {
        assert_eq!(split_verses(LYRICS), vec!["A line", "B line", "C line"]);
    }

    #[test]
    fn test_verse_at_first_and_middle() {
        assert_eq!(verse_at(LYRICS, 1).unwrap(), "A line");
        assert_eq!(verse_at(LYRICS, 2).unwrap(), "B line");
        assert_eq!(verse_at(LYRICS, 3).unwrap(), "C line");
    }

    #[test]
    fn test_verse_past_end() {
        match verse_at(LYRICS, 4) {
            Err(Error::VerseOutOfRange { requested, available }) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected VerseOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_verse_zero_rejected() {
        assert!(matches!(
            verse_at(LYRICS, 0),
            Err(Error::VerseOutOfRange { requested: 0, .. })
        ));
    }

    #[test]
    fn test_single_newlines_stay_inside_a_verse() {
        let text = "Ooh baby\ndon't you know\n\nI suffer";
        assert_eq!(split_verses(text), vec!["Ooh baby\ndon't you know", "I suffer"]);
    }

    #[test]
    fn test_empty_text_has_no_verses() {
        assert!(split_verses("").is_empty());
        assert!(verse_at("", 1).is_err());
    }

    #[test]
    fn test_text_without_delimiter_is_one_verse() {
        assert_eq!(verse_at("just one", 1).unwrap(), "just one");
    }
}
