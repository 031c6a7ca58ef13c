//! Human-readable error rendering using miette
//!
//! The evaluator reports failures as typed values. This module turns an
//! [`ExecutionError`] into a report showing the error kind, the message and
//! the full cause chain, including causes that came from the host.

use crate::{ErrorKind, ExecutionError};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use std::error::Error;
use std::fmt::Display;
use std::io::Write;

/// An [`ExecutionError`] viewed as a [`miette::Diagnostic`].
///
/// The diagnostic code is the error kind, so hosts and users see the same
/// taxonomy the evaluator uses.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ErrorReport<'a>(pub &'a ExecutionError);

impl Diagnostic for ErrorReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.0.kind()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let help = match self.0.kind() {
            ErrorKind::LookupError => "ARG indexes count from the innermost APPLY, REDUCE or MAP",
            ErrorKind::UnsupportedNodeError => {
                "records and list forms cannot be evaluated as values"
            }
            ErrorKind::ResourceExceeded => "raise the limit with ExecutionOptions",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use animagus::{MemoryEnvironment, Value, execute, render_error};
///
/// let env = MemoryEnvironment::builder().build();
/// if let Err(e) = execute(&Value::Arg(0), &env) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &ExecutionError) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &ExecutionError, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &ExecutionError) -> String {
    render(error, true)
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &ExecutionError) -> String {
    render(error, false)
}

fn render_error_to_writer(
    error: &ExecutionError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    writer.write_all(render(error, use_color).as_bytes())
}

fn render(error: &ExecutionError, use_color: bool) -> String {
    let theme = if use_color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme).with_width(100);

    let mut out = String::new();
    if handler.render_report(&mut out, &ErrorReport(error)).is_err() {
        out = plain_chain(error);
    }
    out
}

fn plain_chain(error: &ExecutionError) -> String {
    let mut out = format!("{}: {error}\n", error.kind());
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(&format!("  caused by: {cause}\n"));
        source = cause.source();
    }
    out
}
