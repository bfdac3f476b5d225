//! Precision rules for fixed-point columns.
//!
//! Mirrors the `NUMERIC(p, s)` declarations of the schema so that values
//! are rejected with a field message before reaching the database.

use rust_decimal::Decimal;

/// Allowed shape of a decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalPrecision {
    /// Total number of significant digits.
    pub max_digits: u32,
    /// Digits after the decimal point.
    pub decimal_places: u32,
    pub allow_negative: bool,
}

/// `latitude` / `longitude`: `NUMERIC(22, 16)`.
pub const COORDINATE: DecimalPrecision = DecimalPrecision {
    max_digits: 22,
    decimal_places: 16,
    allow_negative: true,
};

/// `avg_score` / `score`: `NUMERIC(2, 1)`, 0 to 9.9.
pub const SCORE: DecimalPrecision = DecimalPrecision {
    max_digits: 2,
    decimal_places: 1,
    allow_negative: false,
};

/// Plan `budget`: `NUMERIC(10, 2)`.
pub const BUDGET: DecimalPrecision = DecimalPrecision {
    max_digits: 10,
    decimal_places: 2,
    allow_negative: true,
};

impl DecimalPrecision {
    /// Checks `value` against this precision.
    ///
    /// Trailing fractional zeros are ignored, so `4.50` passes as `4.5`.
    ///
    /// # Errors
    ///
    /// Returns the human-readable reason the value does not fit.
    pub fn check(&self, value: &Decimal) -> Result<(), String> {
        if !self.allow_negative && value.is_sign_negative() && !value.is_zero() {
            return Err("Ensure this value is greater than or equal to 0.".to_string());
        }

        let normalized = value.normalize();
        let decimals = normalized.scale();
        let significant = normalized.mantissa().unsigned_abs().to_string().len() as u32;
        let total = significant.max(decimals);
        let whole = total - decimals;

        if total > self.max_digits {
            return Err(format!(
                "Ensure that there are no more than {} digits in total.",
                self.max_digits
            ));
        }

        if decimals > self.decimal_places {
            return Err(format!(
                "Ensure that there are no more than {} decimal places.",
                self.decimal_places
            ));
        }

        let max_whole = self.max_digits - self.decimal_places;
        if whole > max_whole {
            return Err(format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_whole
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_score_accepts_range() {
        assert!(SCORE.check(&dec("0")).is_ok());
        assert!(SCORE.check(&dec("4.5")).is_ok());
        assert!(SCORE.check(&dec("9.9")).is_ok());
        assert!(SCORE.check(&dec("3")).is_ok());
    }

    #[test]
    fn test_score_ignores_trailing_zeros() {
        assert!(SCORE.check(&dec("4.50")).is_ok());
    }

    #[test]
    fn test_score_rejects_two_decimals() {
        let err = SCORE.check(&dec("4.55")).unwrap_err();
        assert!(err.contains("decimal places"));
    }

    #[test]
    fn test_score_rejects_ten() {
        assert!(SCORE.check(&dec("10")).is_err());
        assert!(SCORE.check(&dec("10.0")).is_err());
    }

    #[test]
    fn test_score_rejects_negative() {
        assert!(SCORE.check(&dec("-1.0")).is_err());
    }

    #[test]
    fn test_coordinate_precision() {
        assert!(COORDINATE.check(&dec("60.5")).is_ok());
        assert!(COORDINATE.check(&dec("-122.4194155000000000")).is_ok());
        assert!(COORDINATE.check(&dec("41.00823590000000001")).is_err());
        assert!(COORDINATE.check(&dec("1234567")).is_err());
    }

    #[test]
    fn test_budget_precision() {
        assert!(BUDGET.check(&dec("300")).is_ok());
        assert!(BUDGET.check(&dec("99999999.99")).is_ok());
        assert!(BUDGET.check(&dec("100000000")).is_err());
        assert!(BUDGET.check(&dec("1.234")).is_err());
    }
}
