//! Best-effort recovery of seed records from broken JSON text.
//!
//! Seed `.txt` files are usually hand-assembled dumps of several JSON
//! arrays of `{ company_name, website }` objects: pasted back to back with
//! no separator, littered with trailing commas, and often cut off in the
//! middle of the last array. Parsing runs in two stages:
//!
//! 1. [`scan_array_spans`] finds candidate `[ { ... } ]` documents with a
//!    lazy pattern, so concatenated arrays come out as separate spans.
//! 2. Each span is parsed strictly, then once more after
//!    [`repair_trailing_commas`]. Whatever follows the last span and starts
//!    with `[` is parsed whole if it closes, or cut after its last complete
//!    element if it does not.
//!
//! Nothing here fails the whole input. Every fragment that cannot be
//! recovered adds a diagnostic and is skipped.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::types::SeedRecord;

/// Minimal array-of-objects document: `[`, an object opening, lazy
/// content, an object closing, an optional trailing comma, `]`.
static RE_ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*,?\s*\]").unwrap());

static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Outcome of a recovery parse.
///
/// An empty `errors` list means the input was clean. A non-empty list means
/// some repair or skipping happened; not every diagnostic implies lost
/// records (some describe successful repairs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub results: Vec<SeedRecord>,
    pub errors: Vec<String>,
}

impl RecoveryReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn diagnostic(&mut self, message: String) {
        warn!(diagnostic = %message, "Seed recovery");
        self.errors.push(message);
    }
}

/// Byte ranges of candidate array documents, in input order.
pub fn scan_array_spans(text: &str) -> Vec<Range<usize>> {
    RE_ARRAY_SPAN.find_iter(text).map(|m| m.range()).collect()
}

/// Drop commas that directly precede a closing `}` or `]`.
pub fn repair_trailing_commas(text: &str) -> String {
    RE_TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// Recover every seed record the text still holds.
pub fn parse_multi_array(text: &str) -> RecoveryReport {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut report = RecoveryReport::default();
    let mut last_end = 0;

    for span in scan_array_spans(&text) {
        last_end = span.end;
        parse_array(&mut report, &text[span.clone()], span.start);
    }

    let remaining = text[last_end..].trim();
    if remaining.starts_with('[') {
        recover_tail(&mut report, remaining, text.len() - text[last_end..].trim_start().len());
    } else {
        report_ignored(&mut report, remaining);
    }

    info!(
        records = report.results.len(),
        diagnostics = report.errors.len(),
        "Recovered seed records from JSON text"
    );
    report
}

/// Strict parse, then one retry with trailing commas removed.
fn parse_array(report: &mut RecoveryReport, fragment: &str, offset: usize) {
    match parse_items(fragment) {
        Ok(items) => push_items(report, items, offset),
        Err(_) => match parse_items(&repair_trailing_commas(fragment)) {
            Ok(items) => {
                report.diagnostic(format!(
                    "repaired trailing commas in array at byte {offset}"
                ));
                push_items(report, items, offset);
            }
            Err(e) => {
                report.diagnostic(format!("could not parse array at byte {offset}: {e}"));
            }
        },
    }
}

fn report_ignored(report: &mut RecoveryReport, remaining: &str) {
    if !remaining.is_empty() {
        report.diagnostic(format!(
            "ignored {} trailing character(s) that do not start an array",
            remaining.chars().count()
        ));
    }
}

/// Handle text after the last span that starts with `[`.
///
/// If the array closes after all it is parsed whole. Otherwise it is cut
/// after its last complete element and closed.
fn recover_tail(report: &mut RecoveryReport, tail: &str, offset: usize) {
    let end = match tail_extent(tail) {
        TailExtent::Closed(close) => {
            parse_array(report, &tail[..=close], offset);
            report_ignored(report, tail[close + 1..].trim());
            return;
        }
        TailExtent::Open(end) => end,
    };

    let mut candidate = match end {
        Some(end) => tail[..=end].to_string(),
        None => tail.to_string(),
    };
    candidate.push_str("\n]");
    let candidate = repair_trailing_commas(&candidate);

    match parse_items(&candidate) {
        Ok(items) => {
            let before = report.results.len();
            push_items(report, items, offset);
            report.diagnostic(format!(
                "recovered {} record(s) from unterminated array at byte {offset}",
                report.results.len() - before
            ));
        }
        Err(e) => {
            report.diagnostic(format!(
                "could not recover trailing content at byte {offset}: {e}"
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TailExtent {
    /// Index of the `]` closing the outer array.
    Closed(usize),
    /// The array never closes; index of the `}` ending its last complete
    /// top-level element, if any.
    Open(Option<usize>),
}

/// Walk an array that starts at `tail[0]`. Brackets inside strings are
/// ignored.
fn tail_extent(tail: &str) -> TailExtent {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut last = None;

    for (i, byte) in tail.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return TailExtent::Closed(i);
                }
                if byte == b'}' && depth == 1 {
                    last = Some(i);
                }
            }
            _ => {}
        }
    }

    TailExtent::Open(last)
}

fn parse_items(json: &str) -> serde_json::Result<Vec<Value>> {
    serde_json::from_str(json)
}

fn push_items(report: &mut RecoveryReport, items: Vec<Value>, offset: usize) {
    let mut skipped = 0;
    for item in &items {
        match seed_from_item(item) {
            Some(seed) => report.results.push(seed),
            None => skipped += 1,
        }
    }
    debug!(offset, items = items.len(), skipped, "Parsed seed array");
    if skipped > 0 {
        report.diagnostic(format!(
            "skipped {skipped} item(s) without a website or domain in array at byte {offset}"
        ));
    }
}

/// `company_name` falls back to empty; the domain comes from `website`,
/// then `domain`. Items with neither are not seeds.
fn seed_from_item(item: &Value) -> Option<SeedRecord> {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let domain = text("website").or_else(|| text("domain"))?;
    Some(SeedRecord::new(text("company_name").unwrap_or_default(), domain))
}
