//! Field rules enforced when an entity is constructed.

use rust_decimal::Decimal;
use thiserror::Error;

/// A field value that cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty.")]
    Blank(&'static str),

    #[error("{0} must be greater than zero.")]
    NotPositive(&'static str),
}

/// Rejects empty and whitespace-only text.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

pub fn require_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

pub fn require_positive_id(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_counts_as_blank() {
        assert!(require_text("Name", "\t \n").is_err());
        assert!(require_text("Name", " x ").is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::Blank("Name").to_string(), "Name cannot be empty.");
        assert_eq!(
            ValidationError::NotPositive("Price").to_string(),
            "Price must be greater than zero."
        );
    }
}
