//! Value rendering for contract form fields
//!
//! The source contracts expect US-formatted values: two-decimal
//! comma-grouped currency, long-month closing dates, and a two-digit year
//! written next to a literal "20" on the form.

use chrono::NaiveDate;

/// Render a currency amount as a fixed two-decimal, comma-grouped string,
/// e.g. `500000.0` -> `"500,000.00"`.
pub fn currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, rem)
}

/// Split a `YYYY-MM-DD` closing date into the contract's two date fields:
/// a long-month month+day string (`"March 01"`) and a two-digit year
/// (`"24"`).
///
/// An empty or malformed input degrades to raw passthrough: the month+day
/// slot carries the input unchanged and the year slot is empty. Never an
/// error.
pub fn closing_date_parts(raw: &str) -> (String, String) {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => (
            date.format("%B %d").to_string(),
            date.format("%y").to_string(),
        ),
        Err(_) => (raw.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(currency(500000.0), "500,000.00");
        assert_eq!(currency(1234567.891), "1,234,567.89");
        assert_eq!(currency(1000.0), "1,000.00");
    }

    #[test]
    fn test_currency_small_amounts_have_no_separator() {
        assert_eq!(currency(0.0), "0.00");
        assert_eq!(currency(999.99), "999.99");
        assert_eq!(currency(1.5), "1.50");
    }

    #[test]
    fn test_currency_rounds_to_cents() {
        assert_eq!(currency(999.999), "1,000.00");
        assert_eq!(currency(0.005), "0.01");
    }

    #[test]
    fn test_closing_date_parses_iso_input() {
        assert_eq!(
            closing_date_parts("2024-03-01"),
            ("March 01".to_string(), "24".to_string())
        );
        assert_eq!(
            closing_date_parts("2025-12-31"),
            ("December 31".to_string(), "25".to_string())
        );
    }

    #[test]
    fn test_closing_date_malformed_passes_through() {
        assert_eq!(
            closing_date_parts("mid June"),
            ("mid June".to_string(), String::new())
        );
        assert_eq!(
            closing_date_parts("03/01/2024"),
            ("03/01/2024".to_string(), String::new())
        );
    }

    #[test]
    fn test_closing_date_empty_stays_empty() {
        assert_eq!(closing_date_parts(""), (String::new(), String::new()));
    }

    proptest! {
        #[test]
        fn currency_always_has_two_decimals(amount in 0.0f64..1e12) {
            let rendered = currency(amount);
            let decimals = rendered.rsplit('.').next().unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert!(decimals.chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn currency_separates_thousands(amount in 1000.0f64..1e12) {
            prop_assert!(currency(amount).contains(','));
        }

        #[test]
        fn currency_below_thousand_has_no_separator(amount in 0.0f64..999.99) {
            prop_assert!(!currency(amount).contains(','));
        }
    }
}
