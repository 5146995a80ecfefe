use serde::{Deserialize, Serialize};

/// A content type as the host registry describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Registry key of the type (e.g. "event").
    pub slug: String,
    /// Human-readable label shown in admin screens.
    pub label: String,
    /// Whether the type is publicly queryable.
    pub public: bool,
    /// Whether the type is one of the host's built-in types.
    pub builtin: bool,
}

impl ContentType {
    pub fn new(slug: &str, label: &str) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            public: true,
            builtin: false,
        }
    }

    pub fn builtin(slug: &str, label: &str) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            public: true,
            builtin: true,
        }
    }

    pub fn private(slug: &str, label: &str) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            public: false,
            builtin: false,
        }
    }
}

/// Normalize a raw identifier to the key-safe form the host uses for
/// registry lookups: lowercased, with everything outside `a-z`, `0-9`,
/// `_` and `-` removed.
pub fn sanitize_type_key(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_type_key_lowercases() {
        assert_eq!(sanitize_type_key("Event"), "event");
        assert_eq!(sanitize_type_key("PRODUCT"), "product");
    }

    #[test]
    fn test_sanitize_type_key_strips_unsafe_characters() {
        assert_eq!(sanitize_type_key("my type!"), "mytype");
        assert_eq!(sanitize_type_key("book review"), "bookreview");
        assert_eq!(sanitize_type_key("a/b\\c"), "abc");
    }

    #[test]
    fn test_sanitize_type_key_keeps_dashes_and_underscores() {
        assert_eq!(sanitize_type_key("press-release"), "press-release");
        assert_eq!(sanitize_type_key("case_study"), "case_study");
        assert_eq!(sanitize_type_key("v2-notes"), "v2-notes");
    }

    #[test]
    fn test_sanitize_type_key_drops_non_ascii() {
        assert_eq!(sanitize_type_key("caf\u{e9}"), "caf");
    }
}
