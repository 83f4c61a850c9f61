//! Declarative grammar for one command.
//!
//! A [`Grammar`] owns the ordered positional arguments, the options (looked
//! up by long name or short alias) and the help metadata. Every `add_*` call
//! validates immediately, so a grammar that exists is always consistent and
//! the parser never has to re-check declaration rules.
//!
//! # Rules
//!
//! - option names and short aliases are unique
//! - an option or argument cannot be both required and carry a non-empty default
//! - a default must have the declared type
//! - a required argument cannot follow an optional one
//! - a `list` or `map` argument must be the last one

mod spec;

use std::collections::HashMap;

pub use spec::{ArgumentSpec, OptionSpec, SubcommandSpec};

use crate::error::GrammarError;
use crate::types::{Value, ValueType};

/// Name of the standard boolean option that requests full help.
pub const HELP_OPTION: &str = "help";

/// Name of the standard boolean option that enables debug output.
pub const VERBOSE_OPTION: &str = "verbose";

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    command: String,
    description: Option<String>,
    epilog: Option<String>,
    help: Option<String>,
    usages: Vec<String>,
    options: Vec<OptionSpec>,
    by_name: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
    arguments: Vec<ArgumentSpec>,
    subcommands: Vec<SubcommandSpec>,
}

impl Grammar {
    /// Empty grammar. Usage lines are prefixed with `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Grammar pre-populated with `--help/-h` and `--verbose/-v`.
    pub fn with_standard_options(command: impl Into<String>) -> Self {
        let mut grammar = Self::new(command);
        grammar.push_option(
            OptionSpec::flag(HELP_OPTION)
                .short('h')
                .description("Displays this help message"),
        );
        grammar.push_option(
            OptionSpec::flag(VERBOSE_OPTION)
                .short('v')
                .description("Displays additional output (if available)"),
        );
        grammar
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn add_option(&mut self, spec: OptionSpec) -> Result<(), GrammarError> {
        if spec.name.is_empty() || spec.name.starts_with('-') || spec.name.contains('=') {
            return Err(GrammarError::InvalidOptionName(spec.name));
        }
        if self.by_name.contains_key(&spec.name) {
            return Err(GrammarError::DuplicateOption(spec.name));
        }
        if let Some(alias) = spec.short {
            if alias == '-' || alias == '=' || alias.is_whitespace() {
                return Err(GrammarError::InvalidAlias {
                    option: spec.name,
                    alias: alias.to_string(),
                });
            }
            if let Some(&index) = self.by_short.get(&alias) {
                return Err(GrammarError::DuplicateAlias {
                    alias,
                    existing: self.options[index].name.clone(),
                });
            }
        }
        check_default(&spec.name, spec.value_type, spec.required, spec.default.as_ref())?;
        if spec.is_boolean() && spec.default == Some(Value::Boolean(true)) {
            return Err(GrammarError::BooleanDefault(spec.name));
        }

        self.push_option(spec);
        Ok(())
    }

    pub fn add_argument(&mut self, spec: ArgumentSpec) -> Result<(), GrammarError> {
        if self.arguments.iter().any(|a| a.name == spec.name) {
            return Err(GrammarError::DuplicateArgument(spec.name));
        }
        if let Some(last) = self.arguments.last() {
            if spec.required && !last.required {
                return Err(GrammarError::RequiredAfterOptional(spec.name));
            }
            if last.value_type.is_collection() {
                return Err(GrammarError::ArgumentAfterCollection {
                    name: spec.name,
                    collection: last.name.clone(),
                });
            }
        }
        check_default(&spec.name, spec.value_type, spec.required, spec.default.as_ref())?;

        self.arguments.push(spec);
        Ok(())
    }

    /// Record a sub-command for the help output. Does not affect parsing.
    pub fn add_subcommand(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), GrammarError> {
        let name = name.into();
        if self.subcommands.iter().any(|c| c.name == name) {
            return Err(GrammarError::DuplicateSubcommand(name));
        }
        self.subcommands.push(SubcommandSpec {
            name,
            description: description.into(),
        });
        Ok(())
    }

    fn push_option(&mut self, spec: OptionSpec) {
        let index = self.options.len();
        self.by_name.insert(spec.name.clone(), index);
        if let Some(alias) = spec.short {
            self.by_short.insert(alias, index);
        }
        self.options.push(spec);
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = command.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_epilog(&mut self, epilog: impl Into<String>) {
        self.epilog = Some(epilog.into());
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = Some(help.into());
    }

    pub fn add_usage(&mut self, usage: impl Into<String>) {
        self.usages.push(usage.into());
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn epilog(&self) -> Option<&str> {
        self.epilog.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.by_name.get(name).map(|&i| &self.options[i])
    }

    pub fn option_by_short(&self, alias: char) -> Option<&OptionSpec> {
        self.by_short.get(&alias).map(|&i| &self.options[i])
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn subcommands(&self) -> &[SubcommandSpec] {
        &self.subcommands
    }
}

fn check_default(
    name: &str,
    value_type: ValueType,
    required: bool,
    default: Option<&Value>,
) -> Result<(), GrammarError> {
    let Some(default) = default else {
        return Ok(());
    };
    if required && !default.is_empty() {
        return Err(GrammarError::RequiredWithDefault(name.to_string()));
    }
    if default.value_type() != value_type {
        return Err(GrammarError::DefaultTypeMismatch {
            name: name.to_string(),
            expected: value_type,
            found: default.value_type(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
