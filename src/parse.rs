//! INI text <-> section map conversion.
//!
//! Both directions are pure functions over strings; the store wraps them with
//! file I/O and dirty tracking.
//!
//! # Reading
//!
//! Parsing is lenient and never fails. Carriage returns are dropped, so `\n`
//! and `\r\n` files read the same. Leading spaces and tabs are ignored. A line
//! is then one of:
//!
//! - a comment (`;` first) or blank — skipped;
//! - a header `[name]` — starts a section, replacing an earlier one of the
//!   same name;
//! - an entry `key = value ; comment` — everything from the first `;` is
//!   dropped, and the rest must hold exactly one `=`.
//!
//! Entries before the first header and lines with zero or several `=` are
//! skipped.
//!
//! # Writing
//!
//! Sections are emitted in order as `[name]` followed by `key=value` lines,
//! separated by a blank line, all terminated with `\r\n`.

use indexmap::IndexMap;
use tracing::trace;

/// Entries of a single section, in insertion order.
pub type Entries = IndexMap<String, String>;

/// Line terminator used when rendering.
pub const LINE_ENDING: &str = "\r\n";

/// Parse INI text into an ordered map of section name to entries.
pub fn parse_document(text: &str) -> IndexMap<String, Entries> {
    let normalized = text.replace('\r', "");
    let mut sections: IndexMap<String, Entries> = IndexMap::new();
    let mut current: Option<String> = None;

    for (index, raw) in normalized.split('\n').enumerate() {
        let line = raw.trim_start_matches([' ', '\t']);

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.insert(name.to_string(), Entries::new());
            current = Some(name.to_string());
            continue;
        }

        let Some(entries) = current.as_ref().and_then(|name| sections.get_mut(name)) else {
            trace!(line = index + 1, "skipping entry outside of any section");
            continue;
        };

        match parse_entry(line) {
            Some((key, value)) => {
                entries.insert(key.to_string(), value.to_string());
            }
            None => trace!(line = index + 1, "skipping malformed line"),
        }
    }

    sections
}

/// Split `key = value ; comment` into trimmed key and value.
///
/// Returns `None` unless the text before the first `;` has exactly one `=`.
fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let content = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let (key, value) = content.split_once('=')?;
    if value.contains('=') {
        return None;
    }

    Some((key.trim_matches(' '), value.trim_matches(' ')))
}

/// Render one section as `[name]` followed by its `key=value` lines.
pub fn render_section(name: &str, entries: &Entries) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("[{name}]"));
    lines.extend(entries.iter().map(|(key, value)| format!("{key}={value}")));
    lines.join(LINE_ENDING)
}

/// Render sections into INI text.
///
/// Sections are separated by a blank line and the document ends with exactly
/// one line terminator. No sections render as an empty string.
pub fn render_document<'a>(sections: impl IntoIterator<Item = (&'a str, &'a Entries)>) -> String {
    let mut out = String::new();
    for (name, entries) in sections {
        out.push_str(&render_section(name, entries));
        out.push_str(LINE_ENDING);
        out.push_str(LINE_ENDING);
    }

    if out.ends_with(LINE_ENDING) {
        out.truncate(out.len() - LINE_ENDING.len());
    }
    out
}
