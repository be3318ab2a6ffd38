//! Pet nickname rules.

use crate::error::CoreError;

/// Maximum nickname length, counted in characters.
pub const MAX_NICKNAME_LENGTH: usize = 100;

/// Normalize and validate a nickname.
///
/// Surrounding whitespace is trimmed. A missing, empty or whitespace-only
/// name is rejected, as is anything longer than [`MAX_NICKNAME_LENGTH`].
pub fn validate_nickname(raw: Option<&str>) -> Result<String, CoreError> {
    let name = raw.unwrap_or_default().trim();

    if name.is_empty() {
        return Err(CoreError::Validation("Nickname is required".to_string()));
    }
    if name.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Nickname too long (max {MAX_NICKNAME_LENGTH})"
        )));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_nickname(Some("  Mochi \n")).unwrap(), "Mochi");
    }

    #[test]
    fn rejects_missing_and_blank() {
        for input in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = validate_nickname(input).unwrap_err();
            assert!(err.to_string().contains("Nickname is required"));
        }
    }

    #[test]
    fn accepts_exactly_max_length() {
        let name = "a".repeat(MAX_NICKNAME_LENGTH);
        assert_eq!(validate_nickname(Some(&name)).unwrap(), name);
    }

    #[test]
    fn rejects_over_max_length() {
        let name = "a".repeat(MAX_NICKNAME_LENGTH + 1);
        let err = validate_nickname(Some(&name)).unwrap_err();
        assert!(err.to_string().contains("Nickname too long"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "ü".repeat(MAX_NICKNAME_LENGTH);
        assert!(validate_nickname(Some(&name)).is_ok());
    }
}
