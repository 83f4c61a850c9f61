//! Option, argument and sub-command declarations.
//!
//! Specs are plain data with builder methods. Nothing is validated here;
//! [`Grammar`](super::Grammar) checks every rule when the spec is added.

use crate::types::{Value, ValueType};

/// A named `--name` / `-n` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub short: Option<char>,
    pub value_type: ValueType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: String,
    /// Label shown in help after `=`, uppercased name when unset.
    pub banner: Option<String>,
}

impl OptionSpec {
    /// String option, optional, no alias.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            value_type: ValueType::String,
            required: false,
            default: None,
            description: String::new(),
            banner: None,
        }
    }

    /// Boolean option, `true` when present.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name).value_type(ValueType::Boolean)
    }

    pub fn short(mut self, alias: char) -> Self {
        self.short = Some(alias);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn display_banner(&self) -> String {
        self.banner
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }

    pub fn is_boolean(&self) -> bool {
        self.value_type == ValueType::Boolean
    }
}

/// A positional input, bound by declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub value_type: ValueType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: String,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::String,
            required: false,
            default: None,
            description: String::new(),
        }
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Help-only entry listing a sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandSpec {
    pub name: String,
    pub description: String,
}
