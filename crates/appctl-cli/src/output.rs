//! Formatted output helpers for CLI commands.
//!
//! Provides headers, aligned lists and key/value tables, labelled actions,
//! and human-readable byte, date, and count formatting. Every writer takes
//! the destination explicitly so commands can be rendered into a buffer.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};

/// A value in a [`styled_hash`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A single line of text.
    Text(String),
    /// Several lines, printed one per row under the same label.
    List(Vec<String>),
}

/// Writes a section header.
pub fn styled_header(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "=== {title}")
}

/// Writes one item per line, followed by a blank line.
pub fn styled_list(out: &mut dyn Write, items: &[&str]) -> std::io::Result<()> {
    for item in items {
        writeln!(out, "{item}")?;
    }
    writeln!(out)
}

/// Writes two-column rows with the first column padded to a common width,
/// followed by a blank line.
pub fn styled_rows(out: &mut dyn Write, rows: &[(&str, &str)]) -> std::io::Result<()> {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, right) in rows {
        let line = format!("{left:<width$}  {right}");
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out)
}

/// Writes a key/value table in key order.
///
/// Labels are padded so values line up. Empty lists are skipped. A list
/// prints its first element beside the label and the rest aligned beneath,
/// followed by a blank line when it has more than one element.
pub fn styled_hash(out: &mut dyn Write, fields: &BTreeMap<&str, Field>) -> std::io::Result<()> {
    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0) + 2;
    for (key, field) in fields {
        let label = format!("{key}: ");
        match field {
            Field::Text(value) => writeln!(out, "{label:<width$}{value}")?,
            Field::List(values) => {
                let Some((first, rest)) = values.split_first() else {
                    continue;
                };
                writeln!(out, "{label:<width$}{first}")?;
                for value in rest {
                    writeln!(out, "{:width$}{value}", "")?;
                }
                if !rest.is_empty() {
                    writeln!(out)?;
                }
            }
        }
    }
    Ok(())
}

/// Runs `f` as a labelled step, printing `"<label>... "` and then `done`
/// or `failed`.
///
/// # Errors
///
/// Returns the error from `f` with `label` attached as context, or an I/O
/// error if writing fails.
pub fn action<T>(
    out: &mut dyn Write,
    label: &str,
    f: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    write!(out, "{label}... ")?;
    out.flush()?;
    match f() {
        Ok(value) => {
            writeln!(out, "done")?;
            Ok(value)
        }
        Err(err) => {
            writeln!(out, "failed")?;
            Err(err.context(label.to_string()))
        }
    }
}

/// Formats a byte count the way the platform reports sizes.
///
/// Zero is `(empty)`, values under 1 KiB are plain numbers, larger values
/// are truncated to whole `k`, `M`, or `G` units.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match bytes {
        0 => "(empty)".to_string(),
        b if b < KIB => b.to_string(),
        b if b < MIB => format!("{}k", b / KIB),
        b if b < GIB => format!("{}M", b / MIB),
        b => format!("{}G", b / GIB),
    }
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM UTC`.
///
/// Accepts RFC 3339 and the legacy `YYYY/MM/DD HH:MM:SS +ZZZZ` form.
/// Anything else is returned unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(raw, "%Y/%m/%d %H:%M:%S %z"))
        .map_or_else(
            |_| raw.to_string(),
            |dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M %Z").to_string(),
        )
}

/// Returns `"1 table"`, `"2 tables"`, and so on.
#[must_use]
pub fn quantify(word: &str, count: u64) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
