use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Money is held as an exact decimal; no currency is attached.
pub type Amount = Decimal;

/// Format an amount with two decimal places.
/// Example: 1500 -> "1500.00", -8500.5 -> "-8500.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "-100" -> -100
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    // Decimal::from_str also accepts forms like "1_000"; keep to plain digits.
    let digits = input.trim_start_matches(['-', '+']);
    if digits.is_empty()
        || digits.matches('.').count() > 1
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        || digits == "."
    {
        return Err(ParseAmountError::InvalidFormat);
    }

    Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)
}

/// Compute `amount * rate / 100`, or `None` if it does not fit in an [`Amount`].
pub fn percent_of(amount: Amount, rate: Decimal) -> Option<Amount> {
    amount.checked_mul(rate)?.checked_div(Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1500)), "1500.00");
        assert_eq!(format_amount(dec!(12.5)), "12.50");
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(-8500)), "-8500.00");
        assert_eq!(format_amount(dec!(55.000)), "55.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(dec!(50)));
        assert_eq!(parse_amount("50"), Ok(dec!(50)));
        assert_eq!(parse_amount(" 12.5 "), Ok(dec!(12.5)));
        assert_eq!(parse_amount("0.50"), Ok(dec!(0.5)));
        assert_eq!(parse_amount("-100"), Ok(dec!(-100)));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("12.34.56").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("-").is_err());
        assert!(parse_amount("1_000").is_err());
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(1000), dec!(5.5)), Some(dec!(55)));
        assert_eq!(percent_of(dec!(10000), dec!(10)), Some(dec!(1000)));
        assert_eq!(percent_of(dec!(0), dec!(5.5)), Some(dec!(0)));
    }

    #[test]
    fn test_percent_of_overflow() {
        assert_eq!(percent_of(Decimal::MAX, dec!(5.5)), None);
        assert!(percent_of(Decimal::MAX, dec!(1)).is_some());
    }
}
