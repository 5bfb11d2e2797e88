//! Text normalisation shared by lookups and the encoder.

/// Lowercase a word form for lookup. Dictionary strings are stored
/// lowercased, so every query goes through here first.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
}

/// Number of characters (not bytes) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split `s` at character position `at` into `(head, tail)`.
pub fn split_at_char(s: &str, at: usize) -> (&str, &str) {
    let byte = s.char_indices().nth(at).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(byte)
}

/// Hyphen-like joiners accepted inside a single token.
pub fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '\u{2010}' | '\u{2011}' | '\u{2013}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_icelandic_capitals() {
        assert_eq!(normalize("Ísland"), "ísland");
        assert_eq!(normalize("ÞÓRÐUR"), "þórður");
        assert_eq!(normalize("Æðardúnn"), "æðardúnn");
    }

    #[test]
    fn test_split_at_char_multibyte() {
        assert_eq!(split_at_char("ísland", 2), ("ís", "land"));
        assert_eq!(split_at_char("ráð", 0), ("", "ráð"));
        assert_eq!(split_at_char("ráð", 3), ("ráð", ""));
        assert_eq!(char_len("ráðherra"), 8);
    }

    #[test]
    fn test_is_hyphen() {
        assert!(is_hyphen('-'));
        assert!(is_hyphen('\u{2013}'));
        assert!(!is_hyphen('_'));
    }
}
