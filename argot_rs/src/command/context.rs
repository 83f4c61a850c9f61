//! Per-run context handed to command hooks.
//!
//! The context is the only way a command talks to the outside: it exposes
//! the bound options/arguments, styled output through the console sink,
//! prompts, nested command runs and the injected collaborator.

use std::any::Any;
use std::fmt::Display;
use std::io;

use tracing::debug;

use super::lifecycle::Lifecycle;
use super::termination::Termination;
use crate::dispatch::Registry;
use crate::grammar::Grammar;
use crate::io::ConsoleIo;
use crate::parser::ParseResult;
use crate::types::Value;

/// How many times `ask_choice` repeats the question before giving up.
const MAX_CHOICE_ATTEMPTS: usize = 3;

/// Placeholder values for [`interpolate`]: `("name", &name)` fills `{name}`.
pub type Vars<'v> = [(&'v str, &'v dyn Display)];

/// Stream and tag of a context message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Notice,
    Success,
    Warning,
    Error,
    /// Dropped unless `--verbose` was given.
    Debug,
}

impl Tone {
    fn tag(self) -> Option<&'static str> {
        match self {
            Tone::Plain => None,
            Tone::Info => Some("info"),
            Tone::Notice => Some("notice"),
            Tone::Success => Some("success"),
            Tone::Warning => Some("warning"),
            Tone::Error => Some("error"),
            Tone::Debug => Some("debug"),
        }
    }

    fn is_error_stream(self) -> bool {
        matches!(self, Tone::Warning | Tone::Error)
    }
}

/// Replace `{key}` placeholders with the matching values in one pass.
/// Unknown placeholders stay as written and inserted values are not
/// scanned again.
pub fn interpolate(message: &str, vars: &Vars<'_>) -> String {
    if vars.is_empty() {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let value = tail.find('}').and_then(|close| {
            let key = &tail[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(&value.to_string());
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Borrowed services shared by every lifecycle in one dispatch.
pub struct Session<'a> {
    pub io: &'a mut dyn ConsoleIo,
    pub registry: &'a dyn Registry,
    pub collaborator: Option<&'a dyn Any>,
}

impl<'a> Session<'a> {
    pub fn new(io: &'a mut dyn ConsoleIo, registry: &'a dyn Registry) -> Self {
        Self {
            io,
            registry,
            collaborator: None,
        }
    }

    /// Attach an injected collaborator (data access, clients, ...).
    pub fn with_collaborator(mut self, collaborator: &'a dyn Any) -> Self {
        self.collaborator = Some(collaborator);
        self
    }

    /// Shorter-lived session for a nested run.
    pub fn reborrow(&mut self) -> Session<'_> {
        Session {
            io: &mut *self.io,
            registry: self.registry,
            collaborator: self.collaborator,
        }
    }
}

pub struct Context<'a> {
    session: Session<'a>,
    grammar: &'a Grammar,
    parsed: &'a ParseResult,
    verbose: bool,
}

impl<'a> Context<'a> {
    pub(super) fn new(
        session: Session<'a>,
        grammar: &'a Grammar,
        parsed: &'a ParseResult,
        verbose: bool,
    ) -> Self {
        Self {
            session,
            grammar,
            parsed,
            verbose,
        }
    }

    // ------------------------------------------------------------------
    // Bound input
    // ------------------------------------------------------------------

    /// Name of the running command.
    pub fn name(&self) -> &str {
        self.grammar.command()
    }

    pub fn parsed(&self) -> &ParseResult {
        self.parsed
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.parsed.option(name)
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.parsed.argument(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.parsed.flag(name)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The injected collaborator, if one of type `T` was attached.
    pub fn collaborator<T: Any>(&self) -> Option<&T> {
        self.session.collaborator.and_then(|c| c.downcast_ref::<T>())
    }

    pub fn io(&mut self) -> &mut dyn ConsoleIo {
        &mut *self.session.io
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Write `message` with its placeholders filled from `vars`.
    pub fn say(&mut self, tone: Tone, message: &str, vars: &Vars<'_>) {
        if tone == Tone::Debug && !self.verbose {
            return;
        }
        let message = interpolate(message, vars);
        let line = match tone.tag() {
            Some(tag) => tagged(tag, &message),
            None => message,
        };
        if tone.is_error_stream() {
            self.session.io.write_error(&[line]);
        } else {
            self.session.io.write(&[line]);
        }
    }

    pub fn out(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Plain, message.as_ref(), &[]);
    }

    pub fn out_lines(&mut self, lines: &[String]) {
        self.session.io.write(lines);
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Info, message.as_ref(), &[]);
    }

    pub fn notice(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Notice, message.as_ref(), &[]);
    }

    pub fn success(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Success, message.as_ref(), &[]);
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Warning, message.as_ref(), &[]);
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Error, message.as_ref(), &[]);
    }

    /// Written only when `--verbose` was given.
    pub fn debug(&mut self, message: impl AsRef<str>) {
        self.say(Tone::Debug, message.as_ref(), &[]);
    }

    /// Print an error block and return the abort signal for the caller to
    /// propagate: `return Err(ctx.throw_error("Invalid name", None));`
    pub fn throw_error(&mut self, title: &str, message: Option<&str>) -> Termination {
        let mut lines = vec![format!(
            "<exception> ERROR </exception> <heading>{}</heading>",
            title
        )];
        if let Some(message) = message {
            lines.push(format!("<text>{}</text>", message));
        }
        self.session.io.write_error(&lines);
        Termination::abort(title)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Ask a question. An empty answer falls back to `default`.
    pub fn ask(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let prompt = match default {
            Some(default) => format!("<info>{} [{}]</info>> ", prompt, default),
            None => format!("<info>{}</info>> ", prompt),
        };
        let input = self.session.io.read_line(&prompt)?;
        let input = input.trim();
        match default {
            Some(default) if input.is_empty() => Ok(default.to_string()),
            _ => Ok(input.to_string()),
        }
    }

    /// Ask until the answer is one of `choices` (case-insensitive) or the
    /// default is taken with an empty answer.
    pub fn ask_choice(
        &mut self,
        prompt: &str,
        choices: &[&str],
        default: Option<&str>,
    ) -> io::Result<String> {
        let mut question = format!("<info>{} ({})", prompt, choices.join("/"));
        if let Some(default) = default {
            question.push_str(&format!(" [{}]", default));
        }
        question.push_str("</info>> ");

        for _ in 0..MAX_CHOICE_ATTEMPTS {
            let input = self.session.io.read_line(&question)?;
            let input = input.trim();
            if input.is_empty() {
                if let Some(default) = default {
                    return Ok(default.to_string());
                }
                continue;
            }
            if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(input)) {
                return Ok(choice.to_string());
            }
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("expected one of: {}", choices.join(", ")),
        ))
    }

    // ------------------------------------------------------------------
    // Nested commands
    // ------------------------------------------------------------------

    /// Run another registered command through its full lifecycle.
    ///
    /// The nested command gets its own grammar and parse result; this
    /// context's bound values are untouched. An unknown command or a
    /// broken grammar aborts the current command.
    pub fn run_command<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: &[S],
    ) -> Result<bool, Termination> {
        let registry = self.session.registry;
        let Some(descriptor) = registry.find(name) else {
            return Err(Termination::abort(format!(
                "Command `{}` was not found",
                name
            )));
        };
        debug!(
            caller = self.grammar.command(),
            command = name,
            "running nested command"
        );

        let mut lifecycle = Lifecycle::new(descriptor.create())
            .map_err(|err| Termination::abort(err.to_string()))?;
        let outcome = lifecycle.run(args, self.session.reborrow())?;
        Ok(outcome.is_success())
    }

    /// [`run_command`](Self::run_command) with keyed options appended as
    /// `--key=value` tokens. A key that already starts with `-` is kept
    /// as written, so `("-r", &2)` becomes `-r=2`.
    pub fn run_command_with<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: &[S],
        options: &Vars<'_>,
    ) -> Result<bool, Termination> {
        let mut tokens: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        tokens.extend(options.iter().map(|(key, value)| keyed_token(key, *value)));
        self.run_command(name, &tokens)
    }
}

fn keyed_token(key: &str, value: &dyn Display) -> String {
    if key.starts_with('-') {
        format!("{key}={value}")
    } else {
        format!("--{key}={value}")
    }
}

fn tagged(tag: &str, message: &str) -> String {
    format!("<{tag}>{message}</{tag}>")
}
