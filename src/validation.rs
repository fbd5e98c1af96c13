// Validation utilities module
// Custom field validators used by the catalog request DTOs

use rust_decimal::Decimal;
use validator::ValidationError;

/// Rejects strings that are empty or whitespace-only
///
/// A blank name, image or description counts as a missing field.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Rejects negative monetary amounts and tax rates
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new("negative"))
    } else {
        Ok(())
    }
}
