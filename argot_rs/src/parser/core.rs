//! Core parsing logic: option binding, positional binding and the post-pass.
//!
//! Parsing runs in three passes:
//! 1. walk the tokens, binding options and collecting positionals in order
//! 2. bind positionals to the declared arguments by index
//! 3. check required options/arguments and fill defaults

use std::collections::BTreeMap;

use tracing::debug;

use super::helpers::{Token, classify, coerce, single_char, split_inline};
use super::result::ParseResult;
use crate::error::ParseError;
use crate::grammar::{Grammar, HELP_OPTION, OptionSpec};
use crate::types::{MapValue, Value, ValueType};

/// Parse `tokens` against `grammar`.
///
/// Identical tokens and grammar always give an identical result.
pub fn parse<S: AsRef<str>>(tokens: &[S], grammar: &Grammar) -> Result<ParseResult, ParseError> {
    let mut options: BTreeMap<String, Value> = BTreeMap::new();
    let mut positionals: Vec<&str> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match classify(token) {
            Token::Long(body) => {
                let (name, inline) = split_inline(body);
                let spec = grammar
                    .option(name)
                    .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?;
                bind_option(&mut options, spec, inline)?;
            }
            Token::Short(body) => {
                let (name, inline) = split_inline(body);
                let spec = single_char(name)
                    .and_then(|alias| grammar.option_by_short(alias))
                    .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?;
                bind_option(&mut options, spec, inline)?;
            }
            Token::Positional(value) => positionals.push(value),
        }
    }

    let mut arguments = bind_positionals(grammar, &positionals)?;

    for spec in grammar.options() {
        if spec.required && !options.contains_key(&spec.name) {
            return Err(ParseError::MissingOption(spec.name.clone()));
        }
    }
    for spec in grammar.options() {
        if options.contains_key(&spec.name) {
            continue;
        }
        if spec.is_boolean() {
            options.insert(spec.name.clone(), Value::Boolean(false));
        } else if let Some(default) = &spec.default {
            options.insert(spec.name.clone(), default.clone());
        }
    }

    // `cmd --help` must not fail on missing positionals
    let help = matches!(options.get(HELP_OPTION), Some(Value::Boolean(true)));
    if !help {
        for spec in grammar.arguments() {
            if spec.required && !arguments.contains_key(&spec.name) {
                return Err(ParseError::MissingArgument(spec.name.clone()));
            }
        }
    }
    for spec in grammar.arguments() {
        if let Some(default) = &spec.default {
            arguments
                .entry(spec.name.clone())
                .or_insert_with(|| default.clone());
        }
    }

    Ok(ParseResult::new(options, arguments))
}

/// Bind one option occurrence. Non-boolean options need `=value` unless
/// they declare a default.
fn bind_option(
    options: &mut BTreeMap<String, Value>,
    spec: &OptionSpec,
    inline: Option<&str>,
) -> Result<(), ParseError> {
    if spec.is_boolean() {
        options.insert(spec.name.clone(), Value::Boolean(true));
        return Ok(());
    }

    let Some(raw) = inline else {
        let default = spec
            .default
            .clone()
            .ok_or_else(|| ParseError::MissingValue(spec.name.clone()))?;
        options.insert(spec.name.clone(), default);
        return Ok(());
    };

    match spec.value_type {
        ValueType::List => {
            let pieces = raw.split(',').filter(|p| !p.is_empty()).map(str::to_string);
            match options.get_mut(&spec.name) {
                Some(Value::List(items)) => items.extend(pieces),
                _ => {
                    options.insert(spec.name.clone(), Value::List(pieces.collect()));
                }
            }
        }
        ValueType::Map => {
            if !matches!(options.get(&spec.name), Some(Value::Map(_))) {
                options.insert(spec.name.clone(), Value::Map(MapValue::new()));
            }
            if let Some(Value::Map(map)) = options.get_mut(&spec.name) {
                for piece in raw.split(',').filter(|p| !p.is_empty()) {
                    map.push_token(piece);
                }
            }
        }
        scalar => {
            let value = coerce(&spec.name, scalar, raw)?;
            options.insert(spec.name.clone(), value);
        }
    }
    Ok(())
}

/// Bind positional tokens to the declared arguments by index. A `list` or
/// `map` argument takes everything from its index on.
fn bind_positionals(
    grammar: &Grammar,
    positionals: &[&str],
) -> Result<BTreeMap<String, Value>, ParseError> {
    let mut arguments = BTreeMap::new();
    let mut consumed = 0;

    for (index, spec) in grammar.arguments().iter().enumerate() {
        let Some(raw) = positionals.get(index) else {
            break;
        };
        match spec.value_type {
            ValueType::List => {
                let items = positionals[index..].iter().map(|s| s.to_string()).collect();
                arguments.insert(spec.name.clone(), Value::List(items));
                consumed = positionals.len();
                break;
            }
            ValueType::Map => {
                let mut map = MapValue::new();
                for token in &positionals[index..] {
                    map.push_token(token);
                }
                arguments.insert(spec.name.clone(), Value::Map(map));
                consumed = positionals.len();
                break;
            }
            scalar => {
                arguments.insert(spec.name.clone(), coerce(&spec.name, scalar, raw)?);
                consumed = index + 1;
            }
        }
    }

    if consumed < positionals.len() {
        debug!(
            command = grammar.command(),
            ignored = ?&positionals[consumed..],
            "ignoring positional tokens beyond declared arguments"
        );
    }

    Ok(arguments)
}

// ============================================================================
// Tests
// ============================================================================
