//! # argot
//!
//! **Command-line grammar engine** - declare options and arguments for a
//! console command, parse raw tokens against that grammar, render help, and
//! run the command through a fixed lifecycle behind a name-based dispatcher.
//!
//! ## Features
//!
//! - **Typed grammar** - string, integer, boolean, list and map values with
//!   defaults, short aliases and declaration-time validation
//! - **Deterministic parser** - `--name[=value]`, `-x[=value]` and positionals
//!   bound by declaration order
//! - **Help rendering** - usage line, options/arguments/commands tables
//! - **Lifecycle** - `startup` / `execute` / `shutdown` hooks with abort and
//!   exit signals that unwind through nested commands
//! - **Dispatcher** - explicit registry, grouped command listing and
//!   "did you mean" hints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argot::{
//!     ArgumentSpec, Command, CommandRegistry, Context, Dispatcher, DispatcherOptions,
//!     Flow, Grammar, GrammarError, StdIo,
//! };
//!
//! struct Greet;
//!
//! impl Command for Greet {
//!     fn name(&self) -> &str {
//!         "greet"
//!     }
//!
//!     fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
//!         grammar.add_argument(ArgumentSpec::new("who").default_value("world"))
//!     }
//!
//!     fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
//!         let who = ctx.parsed().argument_str("who").unwrap_or("").to_string();
//!         ctx.success(format!("Hello {who}"));
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(|| Box::new(Greet)).unwrap();
//! let dispatcher = Dispatcher::new(registry, DispatcherOptions::default());
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let ok = dispatcher.run(&args, &mut StdIo::default()).unwrap();
//! std::process::exit(if ok { 0 } else { 1 });
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Value types, parsed values and color mode.
pub mod types;

/// Error enums for grammar declaration, parsing and registration.
pub mod error;

/// Option/argument declarations and their invariants.
///
/// # Key Types
///
/// - [`Grammar`](grammar::Grammar) - the full declared set for one command
/// - [`OptionSpec`](grammar::OptionSpec) - named input
/// - [`ArgumentSpec`](grammar::ArgumentSpec) - positional input
pub mod grammar;

/// Token parsing against a [`Grammar`].
pub mod parser;

/// Usage and help text generation.
pub mod help;

/// Semantic output tags and ANSI rendering.
pub mod colors;

/// Console sinks: terminal and in-memory.
pub mod io;

/// Command trait, per-run context and lifecycle.
pub mod command;

/// Registry and top-level dispatcher.
pub mod dispatch;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use command::{
    Command, Context, ERROR, Flow, Lifecycle, Outcome, SUCCESS, Session, Stage, Termination, Tone,
    Vars, interpolate,
};
pub use dispatch::{CommandDescriptor, CommandRegistry, Dispatcher, DispatcherOptions, Registry};
pub use error::{GrammarError, ParseError, RegistryError};
pub use grammar::{ArgumentSpec, Grammar, OptionSpec};
pub use help::HelpFormatter;
pub use io::{BufferedIo, ConsoleIo, StdIo};
pub use parser::{ParseResult, parse};
pub use types::{ColorMode, MapKey, MapValue, Value, ValueType};
