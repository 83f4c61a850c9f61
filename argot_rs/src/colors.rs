//! Terminal color utilities for console output.
//!
//! Output lines carry semantic tags such as `<error>…</error>`. The
//! [`Painter`] turns known tags into ANSI sequences, or strips them when
//! colors are off. Unknown tags (e.g. a literal `<command>` placeholder in a
//! usage line) are left untouched.

use std::io::IsTerminal;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ColorMode;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

/// Bold yellow.
pub const HEADING: &str = "\x1b[1;33m";
/// Bold white on red.
pub const EXCEPTION: &str = "\x1b[1;37;41m";

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"<(/?)(error|warning|info|notice|success|debug|heading|code|text|yellow|exception)>",
    )
    .expect("tag pattern is valid")
});

/// ANSI sequence for a semantic tag.
fn tag_style(tag: &str) -> &'static str {
    match tag {
        "error" => RED,
        "warning" | "yellow" => YELLOW,
        "info" => BLUE,
        "notice" => CYAN,
        "success" | "code" => GREEN,
        "debug" => DIM,
        "heading" => HEADING,
        "exception" => EXCEPTION,
        _ => "",
    }
}

// ============================================================================
// Color State
// ============================================================================

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Remove known semantic tags, keeping their content.
pub fn strip_tags(line: &str) -> String {
    TAG_RE.replace_all(line, "").into_owned()
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Render one tagged line. Nested tags restore the outer style on close.
    pub fn render(&self, line: &str) -> String {
        if !self.enabled {
            return strip_tags(line);
        }

        let mut out = String::with_capacity(line.len() + 16);
        let mut stack: Vec<&'static str> = Vec::new();
        let mut last = 0;

        for caps in TAG_RE.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&line[last..whole.start()]);
            last = whole.end();

            if &caps[1] == "/" {
                stack.pop();
                out.push_str(RESET);
                for style in &stack {
                    out.push_str(style);
                }
            } else {
                let style = tag_style(&caps[2]);
                stack.push(style);
                out.push_str(style);
            }
        }
        out.push_str(&line[last..]);
        if !stack.is_empty() {
            out.push_str(RESET);
        }
        out
    }
}
