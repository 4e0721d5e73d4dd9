//! Display formatting and form-field coercion helpers.

use chrono::{DateTime, Utc};

/// Money amounts as the backend sent them, no forced decimals.
pub fn amount(value: f64) -> String {
    format!("{value}")
}

/// Wallet balances, always two decimals; an absent wallet reads 0.00.
pub fn balance(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(0.0))
}

/// Timestamps as dd/mm/yyyy.
pub fn short_date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Coerce a positive numeric form field, with a field-specific error.
pub fn parse_amount(value: &str, field: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| format!("Enter a valid {field}"))
}

/// Coerce a positive whole-number form field.
pub fn parse_quantity(value: &str, field: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| format!("Enter a valid {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_drops_trailing_zero() {
        assert_eq!(amount(500.0), "500");
        assert_eq!(amount(450.5), "450.5");
    }

    #[test]
    fn test_balance_is_two_decimals() {
        assert_eq!(balance(Some(1000.0)), "1000.00");
        assert_eq!(balance(Some(99.555)), "99.56");
    }

    #[test]
    fn test_balance_defaults_to_zero() {
        assert_eq!(balance(None), "0.00");
    }

    #[test]
    fn test_short_date() {
        let date = DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(short_date(&date), "01/05/2024");
    }

    #[test]
    fn test_parse_amount_accepts_decimals() {
        assert_eq!(parse_amount(" 450.50 ", "price"), Ok(450.5));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("ten", "price"), Err("Enter a valid price".to_string()));
        assert_eq!(parse_amount("", "amount"), Err("Enter a valid amount".to_string()));
        assert_eq!(parse_amount("-5", "amount"), Err("Enter a valid amount".to_string()));
    }

    #[test]
    fn test_parse_quantity_requires_whole_numbers() {
        assert_eq!(parse_quantity("100", "quantity"), Ok(100));
        assert_eq!(
            parse_quantity("2.5", "quantity"),
            Err("Enter a valid quantity".to_string())
        );
        assert_eq!(
            parse_quantity("0", "quantity"),
            Err("Enter a valid quantity".to_string())
        );
    }
}
