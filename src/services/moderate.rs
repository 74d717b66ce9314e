use regex::Regex;

/// Built-in banned-word list used when no custom list is configured
pub const DEFAULT_BANNED: &[&str] = &["rape", "sex", "kill", "murder", "child", "porn", "incest"];

/// Scans text for banned words and returns the ones found
///
/// Matching is case-insensitive and word-boundary anchored, so "skill"
/// never matches "kill". Results keep the banned-list order; an empty
/// result means the text is clean.
pub fn scan(text: &str, banned: Option<&[String]>) -> Vec<String> {
    let hits: Vec<String> = match banned {
        Some(words) => words
            .iter()
            .filter(|word| matches_word(text, word))
            .cloned()
            .collect(),
        None => DEFAULT_BANNED
            .iter()
            .filter(|word| matches_word(text, word))
            .map(|word| word.to_string())
            .collect(),
    };

    if !hits.is_empty() {
        tracing::warn!(hits = hits.len(), "Moderation hits found");
    }
    hits
}

fn matches_word(text: &str, word: &str) -> bool {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_banned_word() {
        assert_eq!(scan("He will kill the dragon", None), vec!["kill"]);
    }

    #[test]
    fn test_scan_no_substring_false_positive() {
        assert!(scan("She showed great skill", None).is_empty());
        assert!(scan("childish antics", None).is_empty());
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        assert_eq!(scan("KILL the lights", None), vec!["kill"]);
    }

    #[test]
    fn test_scan_returns_hits_in_list_order() {
        // text order is murder-then-kill; list order wins
        let hits = scan("A murder scene. They kill again.", None);
        assert_eq!(hits, vec!["kill", "murder"]);
    }

    #[test]
    fn test_scan_clean_text_is_empty() {
        assert!(scan("A peaceful walk in the woods", None).is_empty());
    }

    #[test]
    fn test_scan_custom_list() {
        let banned = vec!["dragon".to_string(), "sword".to_string()];
        let hits = scan("He will kill the dragon", Some(&banned));
        assert_eq!(hits, vec!["dragon"]);
    }

    #[test]
    fn test_scan_escapes_regex_metacharacters() {
        let banned = vec!["a+b".to_string()];
        assert_eq!(scan("solve a+b first", Some(&banned)), vec!["a+b"]);
        // unescaped, "a+b" would match the repeated letter here
        assert!(scan("solve aab first", Some(&banned)).is_empty());
    }
}
