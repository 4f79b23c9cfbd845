//! Currency helpers
//!
//! Amounts travel the wire as JSON numbers (f64). All arithmetic that
//! matters goes through [`rust_decimal`] and is rounded to two decimals,
//! midpoint away from zero. Display uses a fixed symbol prefix.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed currency symbol (Nepali rupee)
pub const CURRENCY_SYMBOL: &str = "रू";

/// Round an amount to two decimals
pub fn round_amount(amount: f64) -> f64 {
    Decimal::from_f64(amount)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Sum amounts with decimal arithmetic, rounding the result to two decimals
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts
        .into_iter()
        .filter_map(Decimal::from_f64)
        .sum::<Decimal>()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Format an amount for display: symbol prefix, two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, round_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(10.005), 10.01);
        assert_eq!(round_amount(10.004), 10.0);
        assert_eq!(round_amount(-2.675), -2.68);
        assert_eq!(round_amount(0.0), 0.0);
    }

    #[test]
    fn test_sum_amounts_avoids_float_drift() {
        // 0.1 + 0.2 is not 0.3 in f64; the decimal sum is
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);
        assert_eq!(sum_amounts([150.0, 150.0]), 300.0);
        assert_eq!(sum_amounts(std::iter::empty::<f64>()), 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(300.0), "रू300.00");
        assert_eq!(format_amount(99.955), "रू99.96");
    }
}
