//! Error taxonomy.
//!
//! - [`GrammarError`]: programmer error raised while declaring a grammar.
//! - [`ParseError`]: user input that does not match the grammar.
//! - [`RegistryError`]: bad or duplicate command registration.
//!
//! Aborting or exiting a command is not an error; see
//! [`Termination`](crate::command::Termination).

use thiserror::Error;

use crate::types::ValueType;

/// Raised at declaration time when an option, argument or sub-command
/// breaks a grammar rule. Never recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Option `{0}` is already defined")]
    DuplicateOption(String),

    #[error("Short option `-{alias}` is already used by `--{existing}`")]
    DuplicateAlias { alias: char, existing: String },

    #[error("Option name `{0}` is invalid")]
    InvalidOptionName(String),

    #[error("Short option `{alias}` for `--{option}` must be a single character")]
    InvalidAlias { option: String, alias: String },

    #[error("`{0}` cannot be required and have a default value")]
    RequiredWithDefault(String),

    #[error("Default value for `{name}` must be {expected}, got {found}")]
    DefaultTypeMismatch {
        name: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("Boolean option `{0}` cannot default to true")]
    BooleanDefault(String),

    #[error("Type `{0}` is not supported")]
    UnsupportedType(String),

    #[error("Required argument `{0}` cannot be added after an optional one")]
    RequiredAfterOptional(String),

    #[error("Argument `{name}` cannot be added after the {collection} argument")]
    ArgumentAfterCollection { name: String, collection: String },

    #[error("Argument `{0}` is already defined")]
    DuplicateArgument(String),

    #[error("Command `{0}` is already defined")]
    DuplicateSubcommand(String),
}

/// User-input failure. Reported with the usage text; the command does not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown option `{0}`")]
    UnknownOption(String),

    #[error("Missing required option `{0}`")]
    MissingOption(String),

    #[error("Missing required argument `{0}`")]
    MissingArgument(String),

    #[error("Option `{0}` requires a value (use --{0}=VALUE)")]
    MissingValue(String),

    #[error("Invalid value `{value}` for `{name}`, expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: ValueType,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Command `{0}` is already registered")]
    DuplicateCommand(String),

    #[error("Command name `{0}` is invalid")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_rule() {
        assert_eq!(
            GrammarError::RequiredAfterOptional("file".into()).to_string(),
            "Required argument `file` cannot be added after an optional one"
        );
        assert_eq!(
            ParseError::UnknownOption("bogus".into()).to_string(),
            "Unknown option `bogus`"
        );
        assert_eq!(
            ParseError::InvalidValue {
                name: "count".into(),
                value: "ten".into(),
                expected: ValueType::Integer,
            }
            .to_string(),
            "Invalid value `ten` for `count`, expected integer"
        );
    }
}
