//! Per-invocation state machine.
//!
//! ```text
//! Created -> Initializing -> Parsing -+-> ParseFailed ---------------------------+
//!                                     +-> HelpRequested -------------------------+-> Done
//!                                     +-> Parsed -> Starting -> Executing -> ShuttingDown
//! ```
//!
//! A [`Termination`] returned from any hook skips the remaining hooks and is
//! handed back to the caller untouched; the stage still ends at `Done`.

use tracing::debug;

use super::context::{Context, Session};
use super::termination::{Flow, Termination};
use super::Command;
use crate::error::{GrammarError, ParseError};
use crate::grammar::{Grammar, VERBOSE_OPTION};
use crate::help::HelpFormatter;
use crate::parser::{self, ParseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    Initializing,
    Parsing,
    ParseFailed,
    HelpRequested,
    Parsed,
    Starting,
    Executing,
    ShuttingDown,
    Done,
}

/// How a lifecycle finished when no termination interrupted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All hooks ran.
    Completed,
    /// `--help` was given; help was printed and no hook ran.
    HelpShown,
    /// Input did not match the grammar; the error and usage were printed.
    ParseFailed(ParseError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::ParseFailed(_))
    }
}

/// One command invocation: its grammar, its parse result and its stage.
pub struct Lifecycle {
    command: Box<dyn Command>,
    grammar: Grammar,
    parsed: Option<ParseResult>,
    stage: Stage,
}

impl Lifecycle {
    /// Build the grammar: standard options, the command's description,
    /// then whatever the command declares in `initialize`.
    pub fn new(mut command: Box<dyn Command>) -> Result<Self, GrammarError> {
        let mut stage = Stage::Created;
        let mut grammar = Grammar::with_standard_options(command.name());
        enter(&mut stage, Stage::Initializing, grammar.command());
        if !command.description().is_empty() {
            grammar.set_description(command.description());
        }
        command.initialize(&mut grammar)?;

        Ok(Self {
            command,
            grammar,
            parsed: None,
            stage,
        })
    }

    /// Parse `args` and run the hooks.
    pub fn run<S: AsRef<str>>(
        &mut self,
        args: &[S],
        mut session: Session<'_>,
    ) -> Result<Outcome, Termination> {
        let Self {
            command,
            grammar,
            parsed,
            stage,
        } = self;
        let name = grammar.command().to_owned();

        enter(stage, Stage::Parsing, &name);
        *parsed = None;
        let result = match parser::parse(args, grammar) {
            Ok(result) => result,
            Err(err) => {
                enter(stage, Stage::ParseFailed, &name);
                session.io.write_error(&[
                    format!("<exception> ERROR </exception> <text>{}</text>", err),
                    String::new(),
                ]);
                session.io.write(&HelpFormatter::new(grammar).usage());
                enter(stage, Stage::Done, &name);
                return Ok(Outcome::ParseFailed(err));
            }
        };
        let parsed = parsed.insert(result);

        if parsed.help_requested() {
            enter(stage, Stage::HelpRequested, &name);
            session.io.write(&HelpFormatter::new(grammar).help());
            enter(stage, Stage::Done, &name);
            return Ok(Outcome::HelpShown);
        }

        enter(stage, Stage::Parsed, &name);
        let verbose = parsed.flag(VERBOSE_OPTION);
        let mut ctx = Context::new(session.reborrow(), grammar, parsed, verbose);
        let flow = run_hooks(&mut **command, &mut ctx, stage, &name);
        enter(stage, Stage::Done, &name);

        if let Err(termination) = &flow {
            debug!(
                command = %name,
                code = termination.code(),
                message = termination.message(),
                "command terminated early"
            );
        }
        flow.map(|()| Outcome::Completed)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Result of the last parse, if it succeeded.
    pub fn parsed(&self) -> Option<&ParseResult> {
        self.parsed.as_ref()
    }
}

fn run_hooks(
    command: &mut dyn Command,
    ctx: &mut Context<'_>,
    stage: &mut Stage,
    name: &str,
) -> Flow {
    enter(stage, Stage::Starting, name);
    command.startup(ctx)?;
    enter(stage, Stage::Executing, name);
    command.execute(ctx)?;
    enter(stage, Stage::ShuttingDown, name);
    command.shutdown(ctx)
}

fn enter(stage: &mut Stage, next: Stage, command: &str) {
    debug!(command, from = ?*stage, to = ?next, "lifecycle stage");
    *stage = next;
}

// ============================================================================
// Tests
// ============================================================================
