//! Console input/output sinks.
//!
//! Commands never print directly; they go through a [`ConsoleIo`]. Lines
//! may carry semantic tags which the sink renders (see [`crate::colors`]).
//!
//! - [`StdIo`] writes to stdout/stderr and reads stdin.
//! - [`BufferedIo`] captures everything and replays scripted input (tests).

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::colors::{Painter, strip_tags};
use crate::types::ColorMode;

/// Output/input sink consumed by commands and the dispatcher.
pub trait ConsoleIo {
    /// Write lines to the output stream, one newline each.
    fn write(&mut self, lines: &[String]);

    /// Write lines to the error stream, one newline each.
    fn write_error(&mut self, lines: &[String]);

    /// Show `prompt` and read one line without its line terminator.
    /// End of input reads as an empty line.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Terminal sink.
#[derive(Debug, Clone, Copy)]
pub struct StdIo {
    painter: Painter,
}

impl StdIo {
    pub fn new(color: ColorMode) -> Self {
        Self {
            painter: Painter::new(color),
        }
    }
}

impl Default for StdIo {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl ConsoleIo for StdIo {
    fn write(&mut self, lines: &[String]) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for line in lines {
            // A closed pipe (e.g. `| head`) is not worth failing over
            let _ = writeln!(handle, "{}", self.painter.render(line));
        }
    }

    fn write_error(&mut self, lines: &[String]) {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        for line in lines {
            let _ = writeln!(handle, "{}", self.painter.render(line));
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", self.painter.render(prompt))?;
            stdout.flush()?;
        }
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// In-memory sink with scripted input.
#[derive(Debug, Clone, Default)]
pub struct BufferedIo {
    output: Vec<String>,
    errors: Vec<String>,
    prompts: Vec<String>,
    input: VecDeque<String>,
}

impl BufferedIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines returned, in order, by successive `read_line` calls.
    pub fn with_input<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Output joined with newlines, tags stripped.
    pub fn output_text(&self) -> String {
        join_plain(&self.output)
    }

    /// Error output joined with newlines, tags stripped.
    pub fn error_text(&self) -> String {
        join_plain(&self.errors)
    }
}

fn join_plain(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| strip_tags(l))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ConsoleIo for BufferedIo {
    fn write(&mut self, lines: &[String]) {
        self.output.extend_from_slice(lines);
    }

    fn write_error(&mut self, lines: &[String]) {
        self.errors.extend_from_slice(lines);
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front().unwrap_or_default())
    }
}
