//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a price is a finite, non-negative amount.
///
/// # Examples
///
/// ```ignore
/// validate_price(29.99)     // Ok
/// validate_price(0.0)       // Ok
/// validate_price(-1.0)      // Err - negative
/// validate_price(f64::NAN)  // Err - not a number
/// ```
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        let mut err = ValidationError::new("price_not_finite");
        err.message = Some("Price must be a finite number".into());
        return Err(err);
    }

    if price < 0.0 {
        let mut err = ValidationError::new("price_negative");
        err.message = Some(format!("Price must not be negative (got {price})").into());
        return Err(err);
    }

    Ok(())
}
