//! Abort/exit signal.
//!
//! A [`Termination`] stops a command immediately. Hooks return
//! [`Flow`], so `?` carries the signal through nested commands up to the
//! dispatcher, which turns it into a success flag. It is not an error: an
//! exit with [`SUCCESS`] is a normal way to finish early.

use std::fmt;

/// Exit code for a successful run.
pub const SUCCESS: i32 = 0;

/// Default exit code for an aborted run.
pub const ERROR: i32 = 1;

/// Return type of every lifecycle hook.
pub type Flow = Result<(), Termination>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    code: i32,
    message: String,
}

impl Termination {
    /// Stop with [`ERROR`].
    pub fn abort(message: impl Into<String>) -> Self {
        Self::abort_with(message, ERROR)
    }

    pub fn abort_with(message: impl Into<String>, code: i32) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stop with [`SUCCESS`].
    pub fn exit(message: impl Into<String>) -> Self {
        Self::exit_with(message, SUCCESS)
    }

    pub fn exit_with(message: impl Into<String>, code: i32) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (exit code {})", self.message, self.code)
    }
}
