//! Output formatting helpers for the `cq` CLI.

use std::io::{self, Write};

use cqql_query::{ParseError, QueryError};
use cqql_ui::styles::render_stage;
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print rows as an aligned table with a header and a dashed separator.
///
/// Column widths are measured in characters, so styled cells should be
/// padded before coloring.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            let width = widths.get(i).copied().unwrap_or(0);
            let _ = write!(handle, "{:<width$}", cell, width = width);
        }
        let _ = writeln!(handle);
    }
}

/// Print a stage header followed by its body, e.g.
///
/// ```text
/// NORMALIZED
/// ((A & price__low) | ...)
/// ```
pub fn output_stage(name: &str, body: &str) {
    println!("{}", render_stage(name));
    println!("{}", body);
}

/// Short error class for the pipeline errors in `err`'s chain, if any.
pub fn error_kind(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<QueryError>()
            .map(QueryError::kind)
            .or_else(|| cause.downcast_ref::<ParseError>().map(ParseError::kind))
    })
}

/// Render an error the way `main` prints it: `<kind>: <message>`.
pub fn format_error(err: &anyhow::Error) -> String {
    match error_kind(err) {
        Some(kind) => format!("{}: {:#}", kind, err),
        None => format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_errors_carry_their_kind() {
        let err = anyhow::Error::new(QueryError::from(ParseError::Lex { ch: '#', offset: 2 }));
        assert_eq!(error_kind(&err), Some("lex error"));
        assert_eq!(
            format_error(&err),
            "lex error: unexpected character '#' at offset 2"
        );
    }

    #[test]
    fn context_does_not_hide_the_kind() {
        let err = anyhow::Error::new(ParseError::Syntax {
            expected: "')'".into(),
            found: "end of input".into(),
            position: 3,
        })
        .context("invalid formula");
        assert_eq!(error_kind(&err), Some("syntax error"));
    }

    #[test]
    fn other_errors_have_no_kind() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(error_kind(&err), None);
        assert_eq!(format_error(&err), "something else");
    }
}
