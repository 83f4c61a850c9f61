//! Help and usage text generation.
//!
//! Output is a list of lines carrying semantic tags (`<heading>`, `<code>`,
//! `<text>`, `<yellow>`). The console sink decides how tags look; nothing
//! here knows about colors. Rows keep declaration order.

use crate::grammar::Grammar;

/// Renders usage and help lines for one grammar.
pub struct HelpFormatter<'a> {
    grammar: &'a Grammar,
}

impl<'a> HelpFormatter<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Self { grammar }
    }

    /// `command [command] --required [options] arg [optional]`
    pub fn usage_line(&self) -> String {
        let grammar = self.grammar;
        let mut command = grammar.command().to_string();
        if !grammar.subcommands().is_empty() {
            command.push_str(" command");
        }

        let mut parts: Vec<String> = grammar
            .options()
            .iter()
            .filter(|o| o.required)
            .map(|o| format!("--{}", o.name))
            .collect();
        parts.push("[options]".to_string());

        if grammar.arguments().is_empty() {
            parts.push("[arguments]".to_string());
        } else {
            parts.extend(grammar.arguments().iter().map(|a| {
                if a.required {
                    a.name.clone()
                } else {
                    format!("[{}]", a.name)
                }
            }));
        }

        format!("{} {}", command, parts.join(" "))
    }

    /// Only the usage block, printed after a parse error.
    pub fn usage(&self) -> Vec<String> {
        vec![
            "<heading>Usage:</heading>".to_string(),
            format!("  <text>{}</text>", self.usage_line()),
        ]
    }

    /// Full help: description, usage, options, arguments, commands, epilog
    /// and extended help. Empty sections are left out.
    pub fn help(&self) -> Vec<String> {
        let grammar = self.grammar;
        let mut lines = Vec::new();

        if let Some(description) = grammar.description() {
            lines.extend(description.lines().map(|l| format!("<text>{}</text>", l)));
            lines.push(String::new());
        }

        lines.extend(self.usage());
        for usage in grammar.usages() {
            lines.push(format!("  <text>{}</text>", usage));
        }
        lines.push(String::new());

        let options = self.option_rows();
        let arguments: Vec<(String, String)> = grammar
            .arguments()
            .iter()
            .map(|a| (a.name.clone(), a.description.clone()))
            .collect();
        let commands: Vec<(String, String)> = grammar
            .subcommands()
            .iter()
            .map(|c| (c.name.clone(), c.description.clone()))
            .collect();

        let width = options
            .iter()
            .chain(&arguments)
            .chain(&commands)
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            + 2;

        for (heading, rows) in [
            ("Options:", &options),
            ("Arguments:", &arguments),
            ("Commands:", &commands),
        ] {
            if rows.is_empty() {
                continue;
            }
            lines.push(format!("<heading>{}</heading>", heading));
            for (label, description) in rows {
                push_row(&mut lines, label, description, width);
            }
            lines.push(String::new());
        }

        if let Some(epilog) = grammar.epilog() {
            lines.extend(epilog.lines().map(|l| format!("<text>{}</text>", l)));
            lines.push(String::new());
        }

        if let Some(help) = grammar.help() {
            lines.push("<heading>Help:</heading>".to_string());
            lines.extend(help.lines().map(|l| format!("  <text>{}</text>", l)));
            lines.push(String::new());
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    fn option_rows(&self) -> Vec<(String, String)> {
        self.grammar
            .options()
            .iter()
            .map(|option| {
                let mut label = format!("--{}", option.name);
                if let Some(alias) = option.short {
                    label = format!("-{}, {}", alias, label);
                }
                if !option.is_boolean() {
                    label.push('=');
                    label.push_str(&option.display_banner());
                }

                let mut description = option.description.clone();
                if let Some(default) = option.default.as_ref().filter(|d| !d.is_empty()) {
                    description.push_str(&format!(" <yellow>[default: {}]</yellow>", default));
                }
                (label, description)
            })
            .collect()
    }
}

/// One table row; continuation lines of a multi-line description are
/// indented under the first.
fn push_row(lines: &mut Vec<String>, label: &str, description: &str, width: usize) {
    let mut description_lines = description.lines();
    let first = description_lines.next().unwrap_or("");
    lines.push(format!(
        "  <code>{:<width$}</code><text>{}</text>",
        label,
        first,
        width = width
    ));
    for rest in description_lines {
        lines.push(format!("  {:<width$}<text>{}</text>", "", rest, width = width));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{ArgumentSpec, OptionSpec};
    use crate::types::ValueType;

    #[test]
    fn test_usage_without_arguments() {
        let grammar = Grammar::with_standard_options("cache:clear");
        assert_eq!(
            HelpFormatter::new(&grammar).usage_line(),
            "cache:clear [options] [arguments]"
        );
    }

    #[test]
    fn test_usage_with_required_option_and_arguments() {
        let mut grammar = Grammar::with_standard_options("db:seed");
        grammar
            .add_option(OptionSpec::new("connection").required())
            .unwrap();
        grammar
            .add_argument(ArgumentSpec::new("table").required())
            .unwrap();
        grammar.add_argument(ArgumentSpec::new("file")).unwrap();
        assert_eq!(
            HelpFormatter::new(&grammar).usage_line(),
            "db:seed --connection [options] table [file]"
        );
    }

    #[test]
    fn test_usage_with_subcommands() {
        let mut grammar = Grammar::new("cache");
        grammar.add_subcommand("clear", "Clears the cache").unwrap();
        assert_eq!(
            HelpFormatter::new(&grammar).usage_line(),
            "cache command [options] [arguments]"
        );
    }

    #[test]
    fn test_usage_block() {
        let grammar = Grammar::new("demo");
        assert_eq!(
            HelpFormatter::new(&grammar).usage(),
            vec![
                "<heading>Usage:</heading>".to_string(),
                "  <text>demo [options] [arguments]</text>".to_string(),
            ]
        );
    }

    #[test]
    fn test_help_options_table() {
        let mut grammar = Grammar::with_standard_options("demo");
        grammar
            .add_option(
                OptionSpec::new("env")
                    .short('e')
                    .default_value("dev")
                    .description("Target environment"),
            )
            .unwrap();
        let help = HelpFormatter::new(&grammar).help();

        assert!(help.contains(&"<heading>Options:</heading>".to_string()));
        assert!(help.contains(
            &"  <code>-h, --help     </code><text>Displays this help message</text>".to_string()
        ));
        assert!(help.contains(
            &"  <code>-e, --env=ENV  </code><text>Target environment <yellow>[default: dev]</yellow></text>"
                .to_string()
        ));
    }

    #[test]
    fn test_help_banner_and_empty_default() {
        let mut grammar = Grammar::new("demo");
        grammar
            .add_option(
                OptionSpec::new("limit")
                    .value_type(ValueType::Integer)
                    .banner("N")
                    .default_value(0)
                    .description("Row limit"),
            )
            .unwrap();
        grammar
            .add_option(OptionSpec::new("name").default_value("").description("Name"))
            .unwrap();
        let help = HelpFormatter::new(&grammar).help().join("\n");
        assert!(help.contains("--limit=N"));
        assert!(!help.contains("[default: 0]"));
        assert!(help.contains("Row limit</text>"));
        assert!(!help.contains("Name <yellow>"));
    }

    #[test]
    fn test_help_section_order_and_metadata() {
        let mut grammar = Grammar::with_standard_options("make:model");
        grammar.set_description("Generates a model");
        grammar.set_epilog("See the docs for more");
        grammar.set_help("Models live in src/models");
        grammar.add_usage("make:model Contact name:string");
        grammar
            .add_argument(ArgumentSpec::new("name").required().description("Model name"))
            .unwrap();
        grammar.add_subcommand("all", "Everything").unwrap();

        let help = HelpFormatter::new(&grammar).help();
        let position = |needle: &str| help.iter().position(|l| l.contains(needle)).unwrap();

        assert_eq!(help[0], "<text>Generates a model</text>");
        assert!(position("Usage:") < position("Options:"));
        assert!(position("Options:") < position("Arguments:"));
        assert!(position("Arguments:") < position("Commands:"));
        assert!(position("Commands:") < position("See the docs"));
        assert!(position("See the docs") < position("Help:"));
        assert!(help.contains(&"  <text>make:model Contact name:string</text>".to_string()));
        assert!(help.contains(&"  <text>make:model command [options] name</text>".to_string()));
        assert_ne!(help.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_help_omits_empty_sections() {
        let grammar = Grammar::new("bare");
        let help = HelpFormatter::new(&grammar).help();
        assert_eq!(help.len(), 2);
    }

    #[test]
    fn test_multiline_description_rows() {
        let mut grammar = Grammar::new("demo");
        grammar
            .add_argument(ArgumentSpec::new("path").description("First line\nSecond line"))
            .unwrap();
        let help = HelpFormatter::new(&grammar).help();
        assert!(help.contains(&"  <code>path  </code><text>First line</text>".to_string()));
        assert!(help.contains(&"        <text>Second line</text>".to_string()));
    }
}
