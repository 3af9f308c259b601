/// Remove zero-width and other invisible characters.
pub fn strip_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200b}'..='\u{200f}'))
        .collect()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    strip_invisible_chars(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join transcript segments into a single normalized string.
///
/// Empty segments are dropped; the result is whitespace-normalized so that
/// caption line breaks collapse into single spaces.
pub fn join_segments(segments: &[String], separator: &str) -> String {
    let texts: Vec<&str> = segments
        .iter()
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .collect();

    normalize_whitespace(&texts.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_invisible_chars() {
        assert_eq!(strip_invisible_chars("he\u{200b}llo"), "hello");
        assert_eq!(strip_invisible_chars("plain"), "plain");
        assert_eq!(strip_invisible_chars("\u{200e}rtl\u{200f}"), "rtl");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world \n"), "hello world");
        assert_eq!(normalize_whitespace("a\tb\nc"), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_join_segments() {
        let segments = vec![
            "first line".to_string(),
            "  ".to_string(),
            "second\nline".to_string(),
        ];
        assert_eq!(join_segments(&segments, " "), "first line second line");
        assert_eq!(join_segments(&[], " "), "");
    }
}
