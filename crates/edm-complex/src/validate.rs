//! Per-kind checks on scalar literals, and conversion of accepted literals
//! to typed [`Scalar`]s.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use edm_schema::ScalarKind;
use edm_tree::Scalar;

use crate::sentinel::is_sentinel;

/// `0001-01-01T00:00:00.000Z`
const MIN_DATE_MILLIS: i64 = -62_135_596_800_000;
/// `9999-12-31T23:59:59.999Z`
const MAX_DATE_MILLIS: i64 = 253_402_300_799_999;

/// Whether `literal` is acceptable for `kind`. `max_length` bounds
/// `Edm.String` values, counted in characters.
///
/// Kinds without a validator never accept anything.
pub fn validate(kind: &ScalarKind, literal: &str, max_length: usize) -> bool {
    match kind {
        ScalarKind::Boolean => validate_boolean(literal),
        ScalarKind::Int32 => validate_int32(literal),
        ScalarKind::Single => validate_single(literal),
        ScalarKind::Double => validate_double(literal),
        ScalarKind::String => validate_string(literal, max_length),
        ScalarKind::DateTime => validate_datetime(literal),
        ScalarKind::Other(_) => false,
    }
}

/// Exactly `true` or `false`.
pub fn validate_boolean(literal: &str) -> bool {
    parse_boolean(literal).is_some()
}

/// Base-10 integer within `i32`, optional sign.
pub fn validate_int32(literal: &str) -> bool {
    literal.parse::<i32>().is_ok()
}

/// Finite `f32`; overflow to infinity is rejected.
pub fn validate_single(literal: &str) -> bool {
    parse_single(literal).is_some()
}

/// Finite `f64`.
pub fn validate_double(literal: &str) -> bool {
    parse_double(literal).is_some()
}

/// At most `max_length` characters.
pub fn validate_string(literal: &str, max_length: usize) -> bool {
    literal.chars().count() <= max_length
}

/// `/Date(<millis>)/`, an RFC 3339 timestamp, or the sentinel.
pub fn validate_datetime(literal: &str) -> bool {
    is_sentinel(literal) || parse_datetime(literal).is_some()
}

/// Parse a date-time literal in either accepted encoding, restricted to
/// years 0001 through 9999.
pub fn parse_datetime(literal: &str) -> Option<DateTime<Utc>> {
    if let Some(millis) = literal
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        if !is_signed_digits(millis) {
            return None;
        }
        let millis: i64 = millis.parse().ok()?;
        if !(MIN_DATE_MILLIS..=MAX_DATE_MILLIS).contains(&millis) {
            return None;
        }
        return Utc.timestamp_millis_opt(millis).single();
    }

    let parsed = DateTime::parse_from_rfc3339(literal).ok()?.with_timezone(&Utc);
    (1..=9999).contains(&parsed.year()).then_some(parsed)
}

/// Convert an accepted literal. Expects the sentinel to have been expanded
/// already; returns `None` for anything `validate` would reject.
pub fn to_scalar(kind: &ScalarKind, literal: &str) -> Option<Scalar> {
    match kind {
        ScalarKind::Boolean => parse_boolean(literal).map(Scalar::Boolean),
        ScalarKind::Int32 => literal.parse().ok().map(Scalar::Int32),
        ScalarKind::Single => parse_single(literal).map(Scalar::Single),
        ScalarKind::Double => parse_double(literal).map(Scalar::Double),
        ScalarKind::String => Some(Scalar::String(literal.to_string())),
        ScalarKind::DateTime => parse_datetime(literal).map(Scalar::DateTime),
        ScalarKind::Other(_) => None,
    }
}

fn parse_boolean(literal: &str) -> Option<bool> {
    match literal {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_single(literal: &str) -> Option<f32> {
    if !is_decimal(literal) {
        return None;
    }
    literal.parse::<f32>().ok().filter(|n| n.is_finite())
}

fn parse_double(literal: &str) -> Option<f64> {
    if !is_decimal(literal) {
        return None;
    }
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Rust's float parser also takes `inf`, `NaN` and `infinity`; only plain
/// decimal notation is accepted here.
fn is_decimal(literal: &str) -> bool {
    !literal.is_empty()
        && literal
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

fn is_signed_digits(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
