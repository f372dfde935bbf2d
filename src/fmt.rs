use std::fmt::Write;

use crate::error::{PennyError, Result};

/// Render an amount as dollars with two decimals and thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // Values that round to zero never show a sign.
    if val < 0.0 && cents != "0.00" {
        format!("-${grouped}.{dec_part}")
    } else {
        format!("${grouped}.{dec_part}")
    }
}

/// Today's date in the given chrono format, local time.
///
/// A malformed format (e.g. an unknown `%Q`) is a settings error.
pub fn today(date_format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", chrono::Local::now().format(date_format))
        .map_err(|_| PennyError::Settings(format!("invalid date_format {date_format:?}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(3.5), "$3.50");
        assert_eq!(money(30.5), "$30.50");
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(0.1 + 0.2), "$0.30");
        assert_eq!(money(2.675), "$2.67");
        assert_eq!(money(-0.001), "$0.00");
        assert_eq!(money(999.999), "$1,000.00");
    }

    #[test]
    fn test_today_uses_format() {
        let year = today("%Y").unwrap();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_today_rejects_bad_format() {
        let err = today("%Q bogus").unwrap_err();
        assert!(matches!(err, PennyError::Settings(_)));
    }
}
