//! Token classification and value coercion used by the parser.

use crate::error::ParseError;
use crate::types::{Value, ValueType};

/// How a raw token is read before any grammar lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    /// `--name` or `--name=value`, without the leading dashes.
    Long(&'a str),
    /// `-n` or `-n=value`, without the leading dash.
    Short(&'a str),
    Positional(&'a str),
}

pub(super) fn classify(token: &str) -> Token<'_> {
    if let Some(body) = token.strip_prefix("--") {
        Token::Long(body)
    } else if let Some(body) = token.strip_prefix('-') {
        Token::Short(body)
    } else {
        Token::Positional(token)
    }
}

/// Split `name=value` on the first `=`.
pub(super) fn split_inline(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

/// Returns the alias when `name` is exactly one character.
pub(super) fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// `""`, `0`, `false`, `no` and `off` are false; anything else is true.
///
/// Wider than a plain cast, where only `""` and `"0"` are false: a
/// positional `false` reads as false here.
pub(super) fn is_truthy(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Coerce a raw token into a scalar value of `value_type`.
///
/// Collections are assembled by the caller; here they pass through as a
/// one-element list or a one-token map.
pub(super) fn coerce(name: &str, value_type: ValueType, raw: &str) -> Result<Value, ParseError> {
    match value_type {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Boolean => Ok(Value::Boolean(is_truthy(raw))),
        ValueType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| ParseError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string(),
                expected: ValueType::Integer,
            }),
        ValueType::List => Ok(Value::List(vec![raw.to_string()])),
        ValueType::Map => {
            let mut map = crate::types::MapValue::new();
            map.push_token(raw);
            Ok(Value::Map(map))
        }
    }
}
