//! Revenue (`CA`) cell parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a free-typed revenue cell into a decimal amount.
///
/// Comma decimal separators become periods, then every character other than
/// ASCII digits, `.` and `-` is dropped (currency symbols, thousands-separator
/// spaces, stray words). Whatever remains is parsed as a decimal; anything
/// unparsable yields zero. The minus sign survives the strip, so `"-50"` is
/// `-50`.
///
/// ```
/// use mcmap_core::parse_revenue;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_revenue("1 234,56 €"), Decimal::new(123_456, 2));
/// assert_eq!(parse_revenue("abc"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_revenue(raw: &str) -> Decimal {
    let cleaned: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}
