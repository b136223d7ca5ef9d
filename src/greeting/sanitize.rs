//! Name normalization and validation.

use std::fmt;

use crate::error::ValidationError;

/// Maximum name length in characters, measured after trimming.
pub const MAX_NAME_LENGTH: usize = 50;

/// Characters removed outright from user-supplied names.
pub const FORBIDDEN_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// A trimmed, non-empty name free of [`FORBIDDEN_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName(String);

impl SanitizedName {
    /// Borrow the sanitized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the sanitized name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim, length-check, then strip forbidden characters from `raw`.
///
/// The length check runs on the trimmed string before stripping, so an
/// over-long name fails on length whatever it contains. Stripping removes
/// characters without escaping, so neighbours of a removed character
/// become adjacent.
pub fn sanitize_name(raw: &str) -> Result<SanitizedName, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let trimmed = raw.trim();

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();

    if stripped.is_empty() {
        return Err(ValidationError::NameInvalidCharacters);
    }

    Ok(SanitizedName(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(sanitize_name("Alice").unwrap().as_str(), "Alice");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(sanitize_name("  Bob \t").unwrap().as_str(), "Bob");
    }

    #[test]
    fn empty_is_required_error() {
        assert_eq!(sanitize_name(""), Err(ValidationError::NameRequired));
    }

    #[test]
    fn blank_is_invalid_characters_error() {
        assert_eq!(
            sanitize_name("   "),
            Err(ValidationError::NameInvalidCharacters)
        );
    }

    #[test]
    fn only_forbidden_characters_rejected() {
        assert_eq!(
            sanitize_name("<>\"'&"),
            Err(ValidationError::NameInvalidCharacters)
        );
    }

    #[test]
    fn script_tag_collapses_without_escaping() {
        let name = sanitize_name("<script>alert(\"xss\")</script>Bob").unwrap();
        assert_eq!(name.as_str(), "scriptalert(xss)/scriptBob");
    }

    #[test]
    fn fifty_characters_accepted() {
        let raw = "a".repeat(MAX_NAME_LENGTH);
        assert_eq!(sanitize_name(&raw).unwrap().as_str(), raw);
    }

    #[test]
    fn fifty_one_characters_rejected_regardless_of_content() {
        for raw in [
            "a".repeat(51),
            "<".repeat(51),
            format!("{}&", "b".repeat(50)),
        ] {
            assert_eq!(
                sanitize_name(&raw),
                Err(ValidationError::NameTooLong { max: 50 })
            );
        }
    }

    #[test]
    fn length_measured_after_trim() {
        let raw = format!("  {}  ", "c".repeat(50));
        assert!(sanitize_name(&raw).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let raw = "é".repeat(50);
        assert!(sanitize_name(&raw).is_ok());
    }

    #[test]
    fn output_never_contains_forbidden_characters() {
        let inputs = [
            "Tom & Jerry",
            "O'Brien",
            "\"quoted\"",
            "a<b>c",
            "  &&x&&  ",
            "María",
        ];
        for raw in inputs {
            let name = sanitize_name(raw).unwrap();
            assert!(
                !name.as_str().chars().any(|c| FORBIDDEN_CHARS.contains(&c)),
                "{raw:?} -> {name}"
            );
        }
    }
}
