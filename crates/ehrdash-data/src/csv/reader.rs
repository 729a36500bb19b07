// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CSV reader: a single left-to-right scan with one character of lookahead.
//
// Quoting rules:
//   - `"` enters quoted mode; inside it `""` is a literal quote and a lone
//     `"` leaves quoted mode.
//   - Outside quotes `,` ends a field and `\n` ends a field and a row.
//   - `\r` is dropped everywhere, including inside quotes.
//   - A trailing partial field or row is flushed at end of input.
//
// The default (permissive) mode never fails: an unterminated quote swallows
// the rest of the input as quoted content. `ParseMode::Strict` reports that
// case, and rows wider than the header, as `EhrDashError::Csv`.

use ehrdash_core::error::{EhrDashError, Result};
use ehrdash_core::types::Row;
use tracing::{debug, warn};

/// How malformed input is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Absorb malformed quoting and ragged rows silently.
    #[default]
    Permissive,
    /// Reject unterminated quotes and rows with more fields than the header.
    Strict,
}

/// Raw field rows with the line each row started on.
struct ScannedRow {
    line: usize,
    fields: Vec<String>,
}

/// Split `text` into rows of raw fields.
///
/// Only fails in strict mode, on an unterminated quote.
fn scan(text: &str, mode: ParseMode) -> Result<Vec<ScannedRow>> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut line = 1;
    let mut row_line = 1;
    let mut quote_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\r' => {}
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                other => field.push(other),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\n' => {
                fields.push(std::mem::take(&mut field));
                rows.push(ScannedRow {
                    line: row_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                row_line = line;
            }
            '\r' => {}
            other => field.push(other),
        }
    }

    if in_quotes {
        match mode {
            ParseMode::Strict => {
                return Err(EhrDashError::Csv {
                    line: quote_line,
                    reason: "unterminated quoted field".into(),
                });
            }
            ParseMode::Permissive => {
                warn!(line = quote_line, "unterminated quote; rest of input taken as quoted");
            }
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(ScannedRow {
            line: row_line,
            fields,
        });
    }

    Ok(rows)
}

/// Split `text` into rows of raw fields, permissively.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    match scan(text, ParseMode::Permissive) {
        Ok(rows) => rows.into_iter().map(|r| r.fields).collect(),
        // Permissive scanning has no failure path.
        Err(_) => Vec::new(),
    }
}

/// Parse CSV text into records keyed by the first row's column names.
///
/// Rows with fewer fields than the header map the missing keys to `""`;
/// surplus fields are ignored; rows whose fields are all blank are dropped.
pub fn parse_records(text: &str) -> Vec<Row> {
    parse_records_with(text, ParseMode::Permissive).unwrap_or_default()
}

/// Parse CSV text into records using the given mode.
pub fn parse_records_with(text: &str, mode: ParseMode) -> Result<Vec<Row>> {
    let mut rows = scan(text, mode)?.into_iter();
    let header = match rows.next() {
        Some(first) => first.fields,
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for scanned in rows {
        if scanned.fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if mode == ParseMode::Strict && scanned.fields.len() > header.len() {
            return Err(EhrDashError::Csv {
                line: scanned.line,
                reason: format!(
                    "row has {} fields but the header has {}",
                    scanned.fields.len(),
                    header.len()
                ),
            });
        }

        let mut fields = scanned.fields.into_iter();
        let record: Row = header
            .iter()
            .map(|key| (key.clone(), fields.next().unwrap_or_default()))
            .collect();
        records.push(record);
    }

    debug!(columns = header.len(), records = records.len(), "parsed CSV");
    Ok(records)
}
