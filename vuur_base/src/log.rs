//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Something in the input could not be processed.
    Error,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 1;

    while number >= 10 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the particular span of the source code.
///
/// The lines covered by the span are printed together with one line of context on each side;
/// the characters inside the span are underlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        line_number: Option<usize>,
        width: usize,
    ) -> std::fmt::Result {
        match line_number {
            Some(line_number) => write!(
                f,
                "{}{:pad$} {} ",
                Style::Bold.with(Color::Cyan.with(line_number)),
                "",
                Style::Bold.with(Color::Cyan.with("┃")),
                pad = width - get_digit(line_number)
            ),
            None => write!(
                f,
                "{:width$} {} ",
                "",
                Style::Bold.with(Color::Cyan.with("┃"))
            ),
        }
    }

    fn write_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        line_number: usize,
        width: usize,
        highlight: bool,
    ) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let Some(line) = source_file
            .line_range(line_number)
            .and_then(|range| source_file.char_indices(range))
        else {
            return Ok(());
        };

        Self::write_gutter(f, Some(line_number), width)?;

        for (byte_index, char) in line {
            let is_in_span =
                highlight && byte_index >= self.span.start() && byte_index < self.span.end();

            match char {
                '\n' => {}
                '\t' => write!(f, "    ")?,
                char if is_in_span => write!(
                    f,
                    "{}",
                    Style::Underline.with(Style::Bold.with(Color::Red.with(char)))
                )?,
                char => write!(f, "{char}")?,
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();

        let Some(start_location) = self.span.start_location() else {
            return writeln!(
                f,
                "{} {}: end of file",
                Style::Bold.with(Color::Cyan.with("-->")),
                source_file.full_path().display()
            );
        };

        // a trailing line break belongs to the line it terminates
        let spanned = self.span.bytes();
        let spanned = spanned.strip_suffix(b"\n").unwrap_or(spanned);

        let start_line = start_location.line;
        let end_line = start_line + spanned.iter().filter(|byte| **byte == b'\n').count();
        let is_multiline = start_line != end_line;

        let width = get_digit(end_line + 1);

        writeln!(
            f,
            "{:width$}{} {}:{}:{}",
            "",
            Style::Bold.with(Color::Cyan.with("-->")),
            source_file.full_path().display(),
            start_location.line,
            start_location.column
        )?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)?;

        if start_line > 1 {
            self.write_line(f, start_line - 1, width, false)?;
        }

        for line_number in start_line..=end_line {
            self.write_line(f, line_number, width, true)?;
        }

        if let (Some(help), false) = (&self.help_display, is_multiline) {
            Self::write_gutter(f, None, width)?;

            let indent: usize = source_file
                .get_line(start_line)
                .map_or(0, |line| {
                    line.chars()
                        .take(start_location.column - 1)
                        .map(|char| if char == '\t' { 4 } else { 1 })
                        .sum()
                });

            writeln!(f, "{:indent$}{}: {help}", "", Style::Bold.with("help"))?;
        }

        self.write_line(f, end_line + 1, width, false)?;

        Self::write_gutter(f, None, width)?;
        writeln!(f)?;

        if let (Some(help), true) = (&self.help_display, is_multiline) {
            writeln!(
                f,
                "{:width$} {} {}: {help}",
                "",
                Style::Bold.with(Color::Cyan.with("=")),
                Style::Bold.with("help")
            )?;
        }

        Ok(())
    }
}
