//! Text helpers shared by the extractors and storage.

use regex::Regex;

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the first capture group of `pattern` in `text`, if the pattern matches.
pub fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Return the text after the last colon, trimmed.
///
/// Used for `"Today Classes: 3"`-style fields; text without a colon is
/// returned whole.
pub fn value_after_colon(text: &str) -> String {
    text.rsplit(':').next().unwrap_or(text).trim().to_string()
}

/// Reduce a roll number to a filesystem-safe storage key.
///
/// Strips `\ / * ? : " < > |` and replaces spaces with underscores. The
/// result may be empty; callers must reject that.
pub fn sanitize_storage_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a  b\n\tc"), "a b c");
        assert_eq!(normalize_whitespace("  "), "");
    }

    #[test]
    fn test_capture() {
        assert_eq!(
            capture("CGPA: 3.41 Semester: 5", r"CGPA:\s*([\d.]+)"),
            Some("3.41".to_string())
        );
        assert_eq!(capture("no labels here", r"CGPA:\s*([\d.]+)"), None);
    }

    #[test]
    fn test_value_after_colon() {
        assert_eq!(value_after_colon("Today Classes: 3"), "3");
        assert_eq!(value_after_colon("plain text"), "plain text");
        assert_eq!(value_after_colon("a: b: c"), "c");
    }

    #[test]
    fn test_sanitize_storage_key() {
        assert_eq!(sanitize_storage_key("21-CS/045"), "21-CS045");
        assert_eq!(sanitize_storage_key("AB 12"), "AB_12");
        assert_eq!(sanitize_storage_key(r#"a\b/c*d?e:f"g<h>i|j"#), "abcdefghij");
        assert_eq!(sanitize_storage_key("/\\"), "");
    }
}
