//! Greeting / command detection for form values

/// Values that are never a field value on their own
pub const TRIGGER_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "menu",
    "booking",
    "book",
    "book a table",
    "reserve",
    "table",
];

/// Command words that disqualify a short value
const TRIGGER_KEYWORDS: &[&str] = &["book", "booking", "menu", "reserve", "hi", "hello", "hey", "table"];

/// Intents under which any keyword substring disqualifies a short value
pub const TRIGGER_INTENTS: &[&str] = &["greet", "book_table", "show_menu", "goodbye"];

/// "Short" means at most this many words
const MAX_TRIGGER_WORDS: usize = 3;

/// Whether `value` looks like a greeting or a command rather than a field value.
///
/// Without a triggering intent, keywords only match whole words so that
/// names such as "Sachin" or "Tabitha" are accepted.
pub fn is_trigger_phrase(value: &str, intent: Option<&str>) -> bool {
    let normalized = value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if TRIGGER_PHRASES.contains(&normalized.as_str()) {
        return true;
    }

    let word_count = normalized.split(' ').count();
    if word_count > MAX_TRIGGER_WORDS {
        return false;
    }

    let has_keyword_word = normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| TRIGGER_KEYWORDS.contains(&word));
    if has_keyword_word {
        return true;
    }

    matches!(intent, Some(name) if TRIGGER_INTENTS.contains(&name))
        && TRIGGER_KEYWORDS.iter().any(|k| normalized.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_phrases() {
        for phrase in TRIGGER_PHRASES {
            assert!(is_trigger_phrase(phrase, None), "{phrase}");
        }
        assert!(is_trigger_phrase("  Book   A Table ", None));
        assert!(is_trigger_phrase("MENU", Some("inform")));
    }

    #[test]
    fn test_short_values_with_keywords() {
        assert!(is_trigger_phrase("hi there", None));
        assert!(is_trigger_phrase("show menu", None));
        assert!(is_trigger_phrase("hello!", None));
        assert!(!is_trigger_phrase("I would like to book a table please", None));
    }

    #[test]
    fn test_names_are_not_triggers() {
        assert!(!is_trigger_phrase("Sachin", None));
        assert!(!is_trigger_phrase("Tabitha Khanna", None));
        assert!(!is_trigger_phrase("Asha Rao", Some("greet")));
        assert!(!is_trigger_phrase("9876543210", Some("book_table")));
        assert!(!is_trigger_phrase("", Some("greet")));
    }

    #[test]
    fn test_intent_enables_substring_match() {
        assert!(!is_trigger_phrase("Sachin", Some("inform")));
        assert!(is_trigger_phrase("Sachin", Some("greet")));
        assert!(is_trigger_phrase("bookings pls", Some("book_table")));
        assert!(is_trigger_phrase("menus", Some("show_menu")));
    }
}
