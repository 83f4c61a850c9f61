//! ParseResult - typed values bound by a successful parse.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grammar::HELP_OPTION;
use crate::types::{MapValue, Value};

/// Result of parsing a token vector against a grammar.
///
/// Every declared boolean option is present. Other options and arguments
/// are present only when supplied or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParseResult {
    options: BTreeMap<String, Value>,
    arguments: BTreeMap<String, Value>,
}

impl ParseResult {
    pub(super) fn new(
        options: BTreeMap<String, Value>,
        arguments: BTreeMap<String, Value>,
    ) -> Self {
        Self { options, arguments }
    }

    pub fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// `true` only for a boolean option bound to `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.option(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn help_requested(&self) -> bool {
        self.flag(HELP_OPTION)
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(Value::as_str)
    }

    pub fn option_int(&self, name: &str) -> Option<i64> {
        self.option(name).and_then(Value::as_int)
    }

    pub fn option_list(&self, name: &str) -> Option<&[String]> {
        self.option(name).and_then(Value::as_list)
    }

    pub fn argument_str(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(Value::as_str)
    }

    pub fn argument_int(&self, name: &str) -> Option<i64> {
        self.argument(name).and_then(Value::as_int)
    }

    pub fn argument_list(&self, name: &str) -> Option<&[String]> {
        self.argument(name).and_then(Value::as_list)
    }

    pub fn argument_map(&self, name: &str) -> Option<&MapValue> {
        self.argument(name).and_then(Value::as_map)
    }
}
