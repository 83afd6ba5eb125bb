//! Amount validation for user-entered sums
//!
//! Both intake flows accept whole som amounts only. Each flow carries its own
//! bounds, so the validator takes them as an argument instead of hardcoding
//! a range.

use thiserror::Error;

/// Inclusive bounds for an accepted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimits {
    pub min: u64,
    pub max: u64,
}

/// Why an entered amount was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Input is empty or contains anything besides ASCII digits
    #[error("not a whole number")]
    NotANumber,

    /// Parsed value is below the flow's minimum
    #[error("amount is below the minimum of {0}")]
    TooSmall(u64),

    /// Parsed value is above the flow's maximum
    #[error("amount is above the maximum of {0}")]
    TooLarge(u64),
}

/// Parses and checks a user-entered amount.
///
/// Strict by intent: no trimming, no signs, no separators. Anything but a
/// plain run of decimal digits is rejected so the admin never sees an amount
/// that differs from what the user typed.
pub fn validate_amount(text: &str, limits: AmountLimits) -> Result<u64, AmountError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmountError::NotANumber);
    }

    // All-digit input can still overflow u64; that is out of range by definition.
    let amount: u64 = text.parse().map_err(|_| AmountError::TooLarge(limits.max))?;

    if amount < limits.min {
        return Err(AmountError::TooSmall(limits.min));
    }
    if amount > limits.max {
        return Err(AmountError::TooLarge(limits.max));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LIMITS: AmountLimits = AmountLimits { min: 100, max: 45_000 };

    #[test]
    fn test_accepts_amounts_within_bounds() {
        for (input, expected) in [("100", 100), ("500", 500), ("45000", 45_000)] {
            assert_eq!(validate_amount(input, LIMITS), Ok(expected), "failed for {}", input);
        }
    }

    #[test]
    fn test_rejects_non_digit_input() {
        let cases = ["", "abc", "12a", "a12", " 500", "500 ", "-500", "+500", "5.00", "5,00", "١٢٣"];
        for input in cases {
            assert_eq!(
                validate_amount(input, LIMITS),
                Err(AmountError::NotANumber),
                "should reject {:?}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(validate_amount("99", LIMITS), Err(AmountError::TooSmall(100)));
        assert_eq!(validate_amount("0", LIMITS), Err(AmountError::TooSmall(100)));
        assert_eq!(validate_amount("45001", LIMITS), Err(AmountError::TooLarge(45_000)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(validate_amount("100", LIMITS), Ok(100));
        assert_eq!(validate_amount("45000", LIMITS), Ok(45_000));
    }

    #[test]
    fn test_overflowing_digits_count_as_too_large() {
        assert_eq!(
            validate_amount("99999999999999999999999", LIMITS),
            Err(AmountError::TooLarge(45_000))
        );
    }

    #[test]
    fn test_distinct_bounds_per_flow() {
        let deposit = AmountLimits { min: 10, max: 100 };
        let withdraw = AmountLimits { min: 50, max: 45_000 };
        assert_eq!(validate_amount("20", deposit), Ok(20));
        assert_eq!(validate_amount("20", withdraw), Err(AmountError::TooSmall(50)));
    }
}
