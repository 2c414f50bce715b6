use rust_decimal::{Decimal, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a plain or exponent-form decimal without rounding.
///
/// Only `[+-]digits[.digits]` (optionally followed by `e<exp>`) is accepted. A value that
/// does not fit in a `Decimal` exactly is an error rather than a rounded result.
pub fn parse_exact(raw: &str) -> Result<Decimal, Error> {
    let expanded;
    let plain = if raw.contains(['e', 'E']) {
        expanded = expand_exponent(raw)
            .ok_or_else(|| Error::ErrorString(format!("invalid exponent in {raw:?}")))?;
        expanded.as_str()
    } else {
        raw
    };

    if !is_plain_decimal(plain) {
        return Err(Error::ErrorString(format!("invalid decimal {raw:?}")));
    }

    Decimal::from_str_exact(plain)
}

fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    (!int_part.is_empty() || !frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Rewrite `1.5e3` as `1500` by moving the decimal point in the digit string.
fn expand_exponent(raw: &str) -> Option<String> {
    let (mantissa, exp) = raw.split_once(['e', 'E'])?;
    let exp: i64 = exp.parse().ok()?;
    if exp.abs() > 64 {
        return None;
    }

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    if !is_plain_decimal(unsigned) || unsigned.starts_with(['+', '-']) {
        return None;
    }

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i64 + exp;

    let plain = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, frac) = digits.split_at(point as usize);
        format!("{whole}.{frac}")
    };

    Some(format!("{sign}{plain}"))
}

/// `Option<String>` that also accepts a bare JSON number, kept as its literal text.
pub mod option_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected decimal string or number, got {other}"
            ))),
        }
    }
}

/// `Decimal` from a string or number, parsed with [`parse_exact`].
pub mod exact {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected decimal string or number, got {other}"
                )))
            }
        };
        parse_exact(&raw).map_err(serde::de::Error::custom)
    }
}
