//! Slug validation for inkpost
//!
//! Post slugs and tag slugs become directory names in the generated site,
//! so they are restricted to a filesystem-safe alphabet. This also keeps
//! route paths like `post/../../etc` from escaping the output directory.

use thiserror::Error;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid slug '{0}': {1}")]
    InvalidSlug(String, &'static str),

    #[error("Slug '{0}' is too long (max {1} characters)")]
    TooLong(String, usize),

    #[error("Slug cannot be empty")]
    Empty,

    #[error("Reserved name: '{0}'")]
    Reserved(String),
}

/// Maximum length for slugs
pub const MAX_SLUG_LENGTH: usize = 255;

/// Names that cannot be used as a file or directory on some platforms
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul",
    "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8", "com9",
    "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validate a post slug
///
/// Rules:
/// - Must be 1-255 characters
/// - Only alphanumeric, underscore, and hyphen allowed
/// - Cannot start with a hyphen or underscore
/// - Cannot be a reserved name (case-insensitive)
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::Empty);
    }

    if slug.len() > MAX_SLUG_LENGTH {
        return Err(ValidationError::TooLong(slug.to_string(), MAX_SLUG_LENGTH));
    }

    for (i, c) in slug.chars().enumerate() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(ValidationError::InvalidSlug(
                slug.to_string(),
                "contains invalid characters (only alphanumeric, underscore, and hyphen allowed)",
            ));
        }
        if i == 0 && (c == '-' || c == '_') {
            return Err(ValidationError::InvalidSlug(
                slug.to_string(),
                "cannot start with hyphen or underscore",
            ));
        }
    }

    if RESERVED_NAMES.contains(&slug.to_lowercase().as_str()) {
        return Err(ValidationError::Reserved(slug.to_string()));
    }

    Ok(())
}

/// Turn free text (a tag, a title) into a slug
/// Returns None if nothing usable is left
pub fn slugify(input: &str) -> Option<String> {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }

    let result = result.trim_end_matches('-');
    let result: String = result.chars().take(MAX_SLUG_LENGTH).collect();
    let result = result.trim_end_matches('-').to_string();

    if validate_slug(&result).is_err() {
        None
    } else {
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(validate_slug("hello").is_ok());
        assert!(validate_slug("ai-coding-guardians").is_ok());
        assert!(validate_slug("Post123").is_ok());
        assert!(validate_slug("a").is_ok());
        assert!(validate_slug("2024-01-15-notes").is_ok());
    }

    #[test]
    fn test_path_traversal_blocked() {
        assert!(validate_slug("..").is_err());
        assert!(validate_slug("../secret").is_err());
        assert!(validate_slug("foo/bar").is_err());
        assert!(validate_slug("foo\\bar").is_err());
        assert!(validate_slug("../../../etc/passwd").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(validate_slug("foo bar").is_err());
        assert!(validate_slug("foo.bar").is_err());
        assert!(validate_slug("foo@bar").is_err());
        assert!(validate_slug("caf\u{e9}").is_err());
    }

    #[test]
    fn test_invalid_start_characters() {
        assert!(validate_slug("-foo").is_err());
        assert!(validate_slug("_draft").is_err());
    }

    #[test]
    fn test_reserved_names() {
        assert!(validate_slug("con").is_err());
        assert!(validate_slug("CON").is_err());
        assert!(validate_slug("nul").is_err());
    }

    #[test]
    fn test_empty_and_too_long() {
        assert!(matches!(validate_slug(""), Err(ValidationError::Empty)));
        let long_slug = "a".repeat(256);
        assert!(matches!(validate_slug(&long_slug), Err(ValidationError::TooLong(_, 255))));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust"), Some("rust".to_string()));
        assert_eq!(slugify("Machine Learning"), Some("machine-learning".to_string()));
        assert_eq!(slugify("  C++ / WASM  "), Some("c-wasm".to_string()));
        assert_eq!(slugify("already-a-slug"), Some("already-a-slug".to_string()));
        assert_eq!(slugify("!!!"), None);
        assert_eq!(slugify(""), None);
        assert_eq!(slugify("con"), None);
    }
}
