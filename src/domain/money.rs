use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For EUR/USD, 1 unit = 100 cents, so €50.00 = 5000 cents.
pub type Cents = i64;

/// Default currency symbol appended to rendered amounts.
pub const DEFAULT_CURRENCY: &str = "€";

/// Format cents as a decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Format cents followed by a currency symbol.
/// Example: (700, "€") -> "7.00€"
pub fn format_money(cents: Cents, currency: &str) -> String {
    format!("{}{}", format_cents(cents), currency)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCentsError::Empty);
    }
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match input.split_once('.') {
        Some((units, decimals)) => (units, Some(decimals)),
        None => (input, None),
    };

    let units: i64 = if units_str.is_empty() && decimal_str.is_some_and(|d| !d.is_empty()) {
        0
    } else {
        parse_digits(units_str)?
    };

    // Pad or truncate the decimal part to 2 digits
    let decimal_cents = match decimal_str {
        None => 0,
        Some(d) if !d.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(ParseCentsError::InvalidFormat);
        }
        Some(d) => match d.len() {
            0 => 0,
            1 => parse_digits(d)? * 10,
            _ => parse_digits(&d[..2])?,
        },
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::Overflow)?;
    Ok(if negative { -cents } else { cents })
}

fn parse_digits(s: &str) -> Result<i64, ParseCentsError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    s.parse().map_err(|_| ParseCentsError::Overflow)
}

/// Convert a whole or fractional currency amount from a JSON number into cents.
pub fn cents_from_units(units: f64) -> Result<Cents, ParseCentsError> {
    if !units.is_finite() {
        return Err(ParseCentsError::InvalidFormat);
    }
    let cents = (units * 100.0).round();
    // i64::MAX as f64 rounds up to 2^63, so this also rejects i64::MIN
    if cents.abs() >= i64::MAX as f64 {
        return Err(ParseCentsError::Overflow);
    }
    Ok(cents as Cents)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    Empty,
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::Empty => write!(f, "empty amount"),
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
