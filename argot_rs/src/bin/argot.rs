use std::process::ExitCode;

use anyhow::{Context as _, Result};
use argot::{
    ArgumentSpec, ColorMode, Command, CommandRegistry, Context, Dispatcher, DispatcherOptions,
    ERROR, Flow, Grammar, GrammarError, OptionSpec, StdIo, Termination, Tone, ValueType,
};
use tracing_subscriber::EnvFilter;

/// Flags read before the command name.
#[derive(Debug, Default)]
struct GlobalArgs {
    verbose: bool,
    help: bool,
    version: bool,
    color: ColorMode,
    rest: Vec<String>,
}

impl GlobalArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut global = GlobalArgs::default();
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next_if(|a| a.starts_with("--")) {
            if arg == "--verbose" {
                global.verbose = true;
            } else if arg == "--help" {
                global.help = true;
            } else if arg == "--version" {
                global.version = true;
            } else if arg == "--no-color" {
                global.color = ColorMode::Never;
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                global.color = mode.parse().map_err(anyhow::Error::msg)?;
            } else {
                // Not ours; the dispatcher reports it as an unknown command
                global.rest.push(arg);
                break;
            }
        }
        global.rest.extend(args);
        // `argot --help echo` asks for the command's help; alone it is the listing
        if global.help && !global.rest.is_empty() {
            global.rest.push("--help".to_string());
        }
        Ok(global)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn main() -> ExitCode {
    let global = match GlobalArgs::parse(std::env::args().skip(1)) {
        Ok(global) => global,
        Err(err) => {
            eprintln!("argot: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(global.verbose);

    if global.version {
        println!("argot {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(global) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("argot: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(global: GlobalArgs) -> Result<bool> {
    let dispatcher = Dispatcher::new(
        registry().context("failed to register commands")?,
        DispatcherOptions {
            app_name: format!("argot {}", env!("CARGO_PKG_VERSION")),
            binary_name: "argot".to_string(),
            color: global.color,
        },
    );
    let mut io = StdIo::new(dispatcher.options().color);
    dispatcher
        .run(&global.rest, &mut io)
        .context("command grammar is invalid")
}

fn registry() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    registry.register(|| Box::new(Echo))?;
    registry.register(|| Box::new(Inspect))?;
    registry.register(|| Box::new(DemoAbort))?;
    registry.register(|| Box::new(DemoExit))?;
    registry.register(|| Box::new(DemoChain))?;
    Ok(registry)
}

// ============================================================================
// Commands
// ============================================================================

struct Echo;

impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Prints its words"
    }

    fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
        grammar.add_option(
            OptionSpec::flag("upper")
                .short('u')
                .description("Uppercase the output"),
        )?;
        grammar.add_option(
            OptionSpec::new("repeat")
                .short('r')
                .value_type(ValueType::Integer)
                .banner("N")
                .default_value(1)
                .description("Print the line N times"),
        )?;
        grammar.add_option(
            OptionSpec::new("separator")
                .default_value(" ")
                .description("Text placed between words"),
        )?;
        grammar.add_argument(
            ArgumentSpec::new("words")
                .value_type(ValueType::List)
                .description("Words to print"),
        )?;
        grammar.add_usage("echo hello world --upper");
        grammar.add_usage("echo a b c --separator=, -r=2");
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
        let parsed = ctx.parsed();
        let repeat = parsed.option_int("repeat").unwrap_or(1);
        if repeat < 1 {
            return Err(ctx.throw_error("Invalid repeat", Some("--repeat must be at least 1")));
        }

        let separator = parsed.option_str("separator").unwrap_or(" ");
        let mut line = parsed.argument_list("words").unwrap_or_default().join(separator);
        if parsed.flag("upper") {
            line = line.to_uppercase();
        }
        ctx.debug(format!("repeating {} time(s)", repeat));

        for _ in 0..repeat {
            ctx.out(&line);
        }
        Ok(())
    }
}

struct Inspect;

impl Command for Inspect {
    fn name(&self) -> &str {
        "inspect"
    }

    fn description(&self) -> &str {
        "Prints the parsed input as JSON"
    }

    fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
        grammar.set_help("Map entries use key:value; bare entries are numbered from 0.");
        grammar.add_option(
            OptionSpec::new("tags")
                .value_type(ValueType::List)
                .description("Comma separated tags, repeatable"),
        )?;
        grammar.add_option(
            OptionSpec::new("level")
                .short('l')
                .value_type(ValueType::Integer)
                .description("Numeric level"),
        )?;
        grammar.add_argument(
            ArgumentSpec::new("target")
                .required()
                .description("What to inspect"),
        )?;
        grammar.add_argument(
            ArgumentSpec::new("pairs")
                .value_type(ValueType::Map)
                .description("Extra key:value pairs"),
        )
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
        let json = serde_json::to_string_pretty(ctx.parsed())
            .map_err(|err| Termination::abort(format!("failed to serialize result: {err}")))?;
        for line in json.lines() {
            ctx.out(line);
        }
        Ok(())
    }
}

struct DemoAbort;

impl Command for DemoAbort {
    fn name(&self) -> &str {
        "demo:abort"
    }

    fn description(&self) -> &str {
        "Aborts with the given exit code"
    }

    fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
        grammar.add_option(
            OptionSpec::new("code")
                .value_type(ValueType::Integer)
                .default_value(1)
                .description("Exit code carried by the abort"),
        )
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
        let code = ctx.parsed().option_int("code").unwrap_or(1);
        let code = i32::try_from(code).unwrap_or(ERROR);
        ctx.say(Tone::Error, "Aborting with code {code}", &[("code", &code)]);
        Err(Termination::abort_with("demo abort", code))
    }

    fn shutdown(&mut self, ctx: &mut Context<'_>) -> Flow {
        ctx.out("shutdown");
        Ok(())
    }
}

struct DemoExit;

impl Command for DemoExit {
    fn name(&self) -> &str {
        "demo:exit"
    }

    fn description(&self) -> &str {
        "Exits successfully before shutdown"
    }

    fn startup(&mut self, ctx: &mut Context<'_>) -> Flow {
        ctx.info("startup");
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
        ctx.success("Nothing left to do");
        Err(Termination::exit("done early"))
    }

    fn shutdown(&mut self, ctx: &mut Context<'_>) -> Flow {
        ctx.out("shutdown");
        Ok(())
    }
}

struct DemoChain;

impl Command for DemoChain {
    fn name(&self) -> &str {
        "demo:chain"
    }

    fn description(&self) -> &str {
        "Runs echo as a nested command"
    }

    fn initialize(&mut self, grammar: &mut Grammar) -> Result<(), GrammarError> {
        grammar.add_argument(
            ArgumentSpec::new("value")
                .default_value("outer")
                .description("Printed after the nested run"),
        )
    }

    fn execute(&mut self, ctx: &mut Context<'_>) -> Flow {
        ctx.notice("Running echo");
        if !ctx.run_command_with("echo", &["nested"], &[("upper", &true)])? {
            return Err(Termination::abort("nested echo failed"));
        }
        let value = ctx.parsed().argument_str("value").unwrap_or("").to_string();
        ctx.out(format!("chain {}", value));
        Ok(())
    }
}
