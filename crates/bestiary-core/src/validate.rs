//! Input validation for catalog operations.
//!
//! Validation runs before any storage access; failures map to
//! `Error::InvalidInput` at the call site.

use crate::defaults;

/// Validate a creature name.
///
/// Rules: length between 2-100 characters (counted in chars, not bytes).
///
/// Returns Ok(()) if valid, Err with message if invalid.
pub fn validate_creature_name(name: &str) -> std::result::Result<(), String> {
    let len = name.chars().count();
    if len < defaults::NAME_MIN_LEN {
        return Err(format!(
            "Creature name must be at least {} characters",
            defaults::NAME_MIN_LEN
        ));
    }
    if len > defaults::NAME_MAX_LEN {
        return Err(format!(
            "Creature name must be {} characters or less",
            defaults::NAME_MAX_LEN
        ));
    }
    Ok(())
}

/// Validate a caller-supplied creature or external catalog id.
pub fn validate_id(id: i64) -> std::result::Result<(), String> {
    if id < 1 {
        return Err("Id must be a positive integer".to_string());
    }
    Ok(())
}

/// Validate a raw category list's size before normalization.
pub fn validate_category_count(names: &[String]) -> std::result::Result<(), String> {
    if names.len() > defaults::MAX_CATEGORIES {
        return Err(format!(
            "At most {} categories are allowed per creature",
            defaults::MAX_CATEGORIES
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_too_short() {
        assert!(validate_creature_name("x").is_err());
        assert!(validate_creature_name("").is_err());
    }

    #[test]
    fn test_name_bounds_inclusive() {
        assert!(validate_creature_name("ab").is_ok());
        assert!(validate_creature_name(&"a".repeat(100)).is_ok());
        assert!(validate_creature_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_name_length_counts_chars_not_bytes() {
        // 100 two-byte characters is still a valid length
        assert!(validate_creature_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_id_must_be_positive() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-7).is_err());
    }

    #[test]
    fn test_category_count_limit() {
        let three: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let four: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert!(validate_category_count(&three).is_ok());
        assert!(validate_category_count(&four).is_err());
        assert!(validate_category_count(&[]).is_ok());
    }
}
