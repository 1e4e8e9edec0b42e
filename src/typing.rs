//! Value coercion ("auto-typing") for raw INI values.
//!
//! [`auto_type`] turns the trimmed text on the right of a delimiter into an
//! [`IniValue`]:
//!
//! | Input | Result |
//! |-------|--------|
//! | empty | [`IniValue::Empty`] |
//! | `true` / `FALSE` (any case) | [`IniValue::Bool`] |
//! | numeric literal, `NaN` | [`IniValue::Number`] |
//! | `null` (any case) | [`IniValue::Null`] |
//! | anything else | [`IniValue::String`], unchanged |
//!
//! Numeric literals follow a fixed grammar rather than a generic float parser, so
//! `0xFf0066` and `5.3` are numbers while `128.0.0.1` and `1_000` stay strings:
//!
//! ```text
//! number   := "NaN" | hex | decimal
//! hex      := "0" ("x" | "X") hexdigit+
//! decimal  := sign? (digit+ ("." digit*)? | "." digit+) exponent?
//! exponent := ("e" | "E") sign? digit+
//! sign     := "+" | "-"
//! ```

use crate::{IniValue, Number};

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerces a trimmed raw value with the default typing rules.
///
/// # Examples
///
/// ```rust
/// use inikit::{auto_type, IniValue, Number};
///
/// assert_eq!(auto_type(""), IniValue::Empty);
/// assert_eq!(auto_type("TRUE"), IniValue::Bool(true));
/// assert_eq!(auto_type("0xFf0066"), IniValue::Number(Number::Integer(0xFf0066)));
/// assert_eq!(auto_type("5.3"), IniValue::Number(Number::Float(5.3)));
/// assert_eq!(auto_type("128.0.0.1"), IniValue::from("128.0.0.1"));
/// assert_eq!(auto_type("Null"), IniValue::Null);
/// ```
#[must_use]
pub fn auto_type(raw: &str) -> IniValue {
    if raw.is_empty() {
        return IniValue::Empty;
    }
    if raw.eq_ignore_ascii_case("true") {
        return IniValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return IniValue::Bool(false);
    }
    if let Some(number) = parse_number(raw) {
        return IniValue::Number(number);
    }
    if raw.eq_ignore_ascii_case("null") {
        return IniValue::Null;
    }
    IniValue::String(raw.to_string())
}

/// Parses `raw` as a numeric literal, or returns `None` if it is not one.
///
/// Whole decimal values are returned as [`Number::Integer`] when they are exactly
/// representable, so `5.0` and `5` parse to the same number.
///
/// # Examples
///
/// ```rust
/// use inikit::{parse_number, Number};
///
/// assert_eq!(parse_number("-12"), Some(Number::Integer(-12)));
/// assert_eq!(parse_number("5.0"), Some(Number::Integer(5)));
/// assert_eq!(parse_number("1e-3"), Some(Number::Float(0.001)));
/// assert_eq!(parse_number("NaN"), Some(Number::NaN));
/// assert_eq!(parse_number("1.2.3"), None);
/// assert_eq!(parse_number("Infinity"), None);
/// ```
#[must_use]
pub fn parse_number(raw: &str) -> Option<Number> {
    if raw == "NaN" {
        return Some(Number::NaN);
    }
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return parse_hex(digits);
    }

    let shape = scan_decimal(raw)?;
    if !shape.fractional && !shape.exponent {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(Number::Integer(i));
        }
    }

    let value = raw.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_FLOAT_INTEGER {
        Some(Number::Integer(value as i64))
    } else {
        Some(Number::Float(value))
    }
}

fn parse_hex(digits: &str) -> Option<Number> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match i64::from_str_radix(digits, 16) {
        Ok(i) => Some(Number::Integer(i)),
        Err(_) => {
            let value = digits
                .chars()
                .filter_map(|c| c.to_digit(16))
                .fold(0.0_f64, |acc, d| acc * 16.0 + f64::from(d));
            value.is_finite().then_some(Number::Float(value))
        }
    }
}

struct DecimalShape {
    fractional: bool,
    exponent: bool,
}

/// Validates `raw` against the decimal grammar and reports which optional parts
/// it carries.
fn scan_decimal(raw: &str) -> Option<DecimalShape> {
    let bytes = raw.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut fractional = false;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        fractional = true;
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mut exponent = false;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        exponent = true;
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return None;
        }
        pos += exp_digits;
    }

    (pos == bytes.len()).then_some(DecimalShape {
        fractional,
        exponent,
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
