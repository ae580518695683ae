//! Plain-text trace written to stdout.
//!
//! Each endpoint produces one block:
//!
//! ```text
//! Checking <url>...
//! Status Code: <code>
//! Response: <body prefix>
//! --------------------
//! ```
//!
//! or, when no response was obtained, a single `Error checking` line in place
//! of the status and response lines. The format is the program's only
//! output contract; diagnostics go to the tracing subscriber on stderr.

use std::io::{self, Write};

use crate::checker::Outcome;

/// Line printed after every endpoint, success or failure.
pub const SEPARATOR: &str = "--------------------";

/// First `max_chars` characters of `text`, or all of it when shorter.
///
/// Counts Unicode scalar values, never bytes, so multi-byte text is never
/// split mid-character. No ellipsis or other marker is appended.
pub fn body_prefix(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

pub fn write_checking(out: &mut impl Write, url: &str) -> io::Result<()> {
    writeln!(out, "Checking {url}...")?;
    // The request may take a while; show what is in flight.
    out.flush()
}

pub fn write_outcome(out: &mut impl Write, url: &str, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Response { status, body_prefix } => {
            writeln!(out, "Status Code: {status}")?;
            writeln!(out, "Response: {body_prefix}")
        }
        Outcome::Failure(err) => writeln!(out, "Error checking {url}: {err}"),
    }
}

pub fn write_separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")?;
    out.flush()
}
