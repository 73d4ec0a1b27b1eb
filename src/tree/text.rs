//! Text cleanup helpers

/// Strip every `<` and `>` character from `text`
///
/// This is bracket removal, not markup removal: tag names and the text
/// between brackets stay in place, and unbalanced brackets are removed the
/// same way as balanced ones. Running it twice is the same as running it once.
///
/// ```
/// use oscal_ssp::tree::remove_tag;
///
/// assert_eq!(remove_tag("<b>bold</b>"), "bbold/b");
/// ```
pub fn remove_tag(text: &str) -> String {
    text.chars().filter(|&c| c != '<' && c != '>').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_brackets_unchanged() {
        assert_eq!(remove_tag("No tags here"), "No tags here");
    }

    #[test]
    fn test_brackets_removed() {
        let cleaned = remove_tag("Test < Value > End");
        assert!(!cleaned.contains('<'));
        assert!(!cleaned.contains('>'));
        assert_eq!(cleaned, "Test  Value  End");
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(remove_tag("a << b"), "a  b");
        assert_eq!(remove_tag(">>start"), "start");
        assert_eq!(remove_tag("<p>unterminated"), "punterminated");
    }

    #[test]
    fn test_idempotent() {
        for input in ["<x>y</x>", "plain", "<<>>", "", "mixed <a> and > and <"] {
            let once = remove_tag(input);
            assert_eq!(remove_tag(&once), once);
        }
    }

    #[test]
    fn test_multibyte_preserved() {
        assert_eq!(remove_tag("<é>ü"), "éü");
    }
}
