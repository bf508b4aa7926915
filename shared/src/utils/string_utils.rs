pub fn is_blank_optional_string(value: &Option<String>) -> bool {
    value.as_ref().is_none_or(|s| s.trim().is_empty())
}

/// Values from `.env` files or yaml are often wrapped in quotes: `'http://plex:32400'`.
pub fn trim_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"').trim()
}

pub fn str_to_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("'http://plex:32400'"), "http://plex:32400");
        assert_eq!(trim_quotes(" \"abc\" "), "abc");
        assert_eq!(trim_quotes("plain"), "plain");
    }

    #[test]
    fn test_str_to_bool() {
        assert!(str_to_bool("Yes"));
        assert!(str_to_bool("1"));
        assert!(str_to_bool(" on "));
        assert!(!str_to_bool("false"));
        assert!(!str_to_bool(""));
    }

    #[test]
    fn test_blank_optional() {
        assert!(is_blank_optional_string(&None));
        assert!(is_blank_optional_string(&Some("  ".to_string())));
        assert!(!is_blank_optional_string(&Some("info".to_string())));
    }
}
