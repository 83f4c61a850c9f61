//! Top-level dispatcher.
//!
//! Resolves the first token to a registered command and runs its lifecycle
//! with the remaining tokens. With no tokens it prints the command listing.

mod registry;

use std::any::Any;
use std::collections::BTreeMap;

use strsim::levenshtein;
use tracing::{debug, warn};

use crate::command::{Lifecycle, Session};
use crate::error::GrammarError;
use crate::io::ConsoleIo;
use crate::types::ColorMode;

pub use self::registry::{CommandDescriptor, CommandFactory, CommandRegistry, Registry};

/// Largest edit distance still offered as a "did you mean" hint.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Application-level settings for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    /// Shown at the top of the command listing.
    pub app_name: String,
    /// Executable name used in the listing's usage line.
    pub binary_name: String,
    pub color: ColorMode,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            app_name: "argot".to_string(),
            binary_name: "argot".to_string(),
            color: ColorMode::Auto,
        }
    }
}

pub struct Dispatcher<R: Registry = CommandRegistry> {
    registry: R,
    options: DispatcherOptions,
}

impl<R: Registry> Dispatcher<R> {
    pub fn new(registry: R, options: DispatcherOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn options(&self) -> &DispatcherOptions {
        &self.options
    }

    /// Exact name match; no prefix or fuzzy matching.
    pub fn resolve(&self, name: &str) -> Option<&CommandDescriptor> {
        self.registry.find(name)
    }

    /// Run without a collaborator. See [`Dispatcher::run_with`].
    pub fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        io: &mut dyn ConsoleIo,
    ) -> Result<bool, GrammarError> {
        self.run_with(tokens, io, None)
    }

    /// Dispatch `tokens` (program name already removed).
    ///
    /// Returns whether the run succeeded. A broken command grammar is the
    /// only error; unknown commands and bad input are reported through `io`.
    pub fn run_with<S: AsRef<str>>(
        &self,
        tokens: &[S],
        io: &mut dyn ConsoleIo,
        collaborator: Option<&dyn Any>,
    ) -> Result<bool, GrammarError> {
        let Some((first, rest)) = tokens.split_first() else {
            io.write(&self.listing());
            return Ok(true);
        };
        let name = first.as_ref();

        let Some(descriptor) = self.resolve(name) else {
            warn!(command = name, "unknown command");
            let mut lines = vec![format!("<error>Command `{}` not found</error>", name)];
            if let Some(suggestion) = self.suggest(name) {
                lines.push(format!("<text>Did you mean `{}`?</text>", suggestion));
            }
            io.write_error(&lines);
            return Ok(false);
        };

        debug!(command = name, args = rest.len(), "dispatching");
        let mut lifecycle = Lifecycle::new(descriptor.create())?;
        let mut session = Session::new(io, &self.registry);
        if let Some(collaborator) = collaborator {
            session = session.with_collaborator(collaborator);
        }

        match lifecycle.run(rest, session) {
            Ok(outcome) => Ok(outcome.is_success()),
            Err(termination) => {
                if !termination.is_success() {
                    warn!(
                        command = name,
                        code = termination.code(),
                        message = termination.message(),
                        "command aborted"
                    );
                }
                Ok(termination.is_success())
            }
        }
    }

    /// Every registered command, grouped by namespace.
    pub fn listing(&self) -> Vec<String> {
        let commands = self.registry.list();
        let width = commands
            .iter()
            .map(|c| c.name().chars().count())
            .max()
            .unwrap_or(0)
            + 2;

        let mut groups: BTreeMap<&str, Vec<&CommandDescriptor>> = BTreeMap::new();
        for command in commands {
            groups.entry(command.namespace()).or_default().push(command);
        }

        let mut lines = vec![
            format!("<text>{}</text>", self.options.app_name),
            String::new(),
            "<heading>Usage:</heading>".to_string(),
            format!(
                "  <text>{} <command> [options] [arguments]</text>",
                self.options.binary_name
            ),
            String::new(),
        ];

        for (namespace, mut members) in groups {
            members.sort_by(|a, b| a.name().cmp(b.name()));
            if !namespace.is_empty() {
                lines.push(format!("<heading>{}</heading>", namespace));
            }
            for command in members {
                lines.push(format!(
                    "  <code>{:<width$}</code><text>{}</text>",
                    command.name(),
                    command.description(),
                    width = width
                ));
            }
            lines.push(String::new());
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Closest registered name within [`MAX_SUGGESTION_DISTANCE`].
    fn suggest(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        self.registry
            .list()
            .into_iter()
            .map(|c| (c.name(), levenshtein(&input_lower, c.name())))
            .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(_, distance)| *distance)
            .map(|(name, _)| name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Context, Flow, Termination};
    use crate::grammar::{ArgumentSpec, Grammar};
    use crate::io::BufferedIo;

    const NO_ARGS: &[&str] = &[];

    struct Simple {
        name: &'static str,
        description: &'static str,
    }

    impl Command for Simple {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
            grammar.add_argument(ArgumentSpec::new("word"))
        }

        fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
            match ctx.parsed().argument_str("word") {
                Some("abort") => Err(Termination::abort("asked to abort")),
                Some("exit") => Err(Termination::exit("asked to exit")),
                _ => {
                    ctx.out(self.name);
                    Ok(())
                }
            }
        }
    }

    struct Broken;

    impl Command for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
            grammar.add_argument(ArgumentSpec::new("first"))?;
            grammar.add_argument(ArgumentSpec::new("second").required())
        }

        fn execute(&mut self, _ctx: &mut Context<'_>) -> Flow {
            Ok(())
        }
    }

    fn add(registry: &mut CommandRegistry, name: &'static str, description: &'static str) {
        registry
            .register(move || Box::new(Simple { name, description }))
            .unwrap();
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = CommandRegistry::new();
        add(&mut registry, "db:seed", "Seeds the database");
        add(&mut registry, "echo", "Echoes words");
        add(&mut registry, "cache:warm", "Warms the cache");
        add(&mut registry, "cache:clear", "Clears the cache");
        registry.register(|| Box::new(Broken)).unwrap();
        Dispatcher::new(
            registry,
            DispatcherOptions {
                app_name: "Demo App".to_string(),
                binary_name: "demo".to_string(),
                color: ColorMode::Never,
            },
        )
    }

    #[test]
    fn test_resolve_is_exact() {
        let dispatcher = dispatcher();
        assert!(dispatcher.resolve("echo").is_some());
        assert!(dispatcher.resolve("ech").is_none());
        assert!(dispatcher.resolve("cache").is_none());
    }

    #[test]
    fn test_listing_groups_and_sorts() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.listing(),
            vec![
                "<text>Demo App</text>",
                "",
                "<heading>Usage:</heading>",
                "  <text>demo <command> [options] [arguments]</text>",
                "",
                "  <code>broken       </code><text></text>",
                "  <code>echo         </code><text>Echoes words</text>",
                "",
                "<heading>cache</heading>",
                "  <code>cache:clear  </code><text>Clears the cache</text>",
                "  <code>cache:warm   </code><text>Warms the cache</text>",
                "",
                "<heading>db</heading>",
                "  <code>db:seed      </code><text>Seeds the database</text>",
            ]
        );
    }

    #[test]
    fn test_empty_tokens_print_listing() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(NO_ARGS, &mut io), Ok(true));
        assert_eq!(io.output(), dispatcher.listing().as_slice());
    }

    #[test]
    fn test_empty_registry() {
        let dispatcher = Dispatcher::new(CommandRegistry::new(), DispatcherOptions::default());
        let mut io = BufferedIo::new();

        assert_eq!(dispatcher.run(NO_ARGS, &mut io), Ok(true));
        assert_eq!(io.output().len(), 4);

        assert_eq!(dispatcher.run(&["anything"], &mut io), Ok(false));
        assert_eq!(io.error_text(), "Command `anything` not found");
    }

    #[test]
    fn test_runs_resolved_command() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["cache:clear"], &mut io), Ok(true));
        assert_eq!(io.output(), &["cache:clear"]);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["cache:clean"], &mut io), Ok(false));
        assert_eq!(
            io.errors(),
            &[
                "<error>Command `cache:clean` not found</error>".to_string(),
                "<text>Did you mean `cache:clear`?</text>".to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_command_without_close_match() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["deploy"], &mut io), Ok(false));
        assert_eq!(io.errors().len(), 1);
    }

    #[test]
    fn test_terminations_map_to_success_flag() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["echo", "abort"], &mut io), Ok(false));
        assert_eq!(dispatcher.run(&["echo", "exit"], &mut io), Ok(true));
        assert!(io.output().is_empty());
    }

    #[test]
    fn test_parse_failure_is_unsuccessful() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["echo", "--bogus"], &mut io), Ok(false));
        assert!(io.error_text().contains("Unknown option `bogus`"));
    }

    #[test]
    fn test_help_is_successful() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(dispatcher.run(&["echo", "--help"], &mut io), Ok(true));
        assert!(io.output_text().starts_with("Echoes words"));
    }

    #[test]
    fn test_grammar_error_is_returned() {
        let dispatcher = dispatcher();
        let mut io = BufferedIo::new();
        assert_eq!(
            dispatcher.run(&["broken"], &mut io),
            Err(GrammarError::RequiredAfterOptional("second".into()))
        );
    }
}
