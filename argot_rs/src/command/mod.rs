//! Command trait and the per-invocation lifecycle.
//!
//! A command declares its grammar in [`Command::initialize`] and implements
//! [`Command::execute`]. The optional `startup`/`shutdown` hooks run before
//! and after it. Every hook receives a [`Context`].

mod context;
mod lifecycle;
mod termination;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GrammarError;
use crate::grammar::Grammar;

pub use self::context::{Context, Session, Tone, Vars, interpolate};
pub use self::lifecycle::{Lifecycle, Outcome, Stage};
pub use self::termination::{ERROR, Flow, SUCCESS, Termination};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z-]+(?::[a-z-]+)*$").expect("name pattern is valid"));

/// `name`, `some-name` or `namespace:some-name`.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// A runnable console command.
pub trait Command {
    /// Name used to invoke the command.
    fn name(&self) -> &str;

    /// One-line summary shown in the command listing and help.
    fn description(&self) -> &str {
        ""
    }

    /// Declare options, arguments and help metadata. Standard options
    /// (`--help`, `--verbose`) are already present.
    fn initialize(&mut self, _grammar: &mut Grammar) -> Result<(), GrammarError> {
        Ok(())
    }

    fn startup(&mut self, _ctx: &mut Context<'_>) -> Flow {
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow;

    fn shutdown(&mut self, _ctx: &mut Context<'_>) -> Flow {
        Ok(())
    }
}
