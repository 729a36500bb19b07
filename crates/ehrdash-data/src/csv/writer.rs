// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CSV writer: the inverse of the permissive reader.
//
// Fields containing a comma, quote, newline or carriage return are wrapped in
// quotes with internal quotes doubled. Every row, including the last, ends
// with `\n`.

use ehrdash_core::types::Row;

/// Serialize `records` under `header`.
///
/// Keys absent from a record, `Null` cells and non-scalar cells are written
/// as empty fields.
///
/// Parsing the output gives back every record that has at least one
/// non-blank field and no `\r` in any field. The reader drops all-blank rows
/// and strips `\r` everywhere, so those two cases do not survive.
pub fn write_records(header: &[String], records: &[Row]) -> String {
    let mut out = String::new();
    write_line(&mut out, header.iter().map(String::as_str));
    for record in records {
        let fields: Vec<String> = header
            .iter()
            .map(|key| record.get(key).scalar_text().unwrap_or_default())
            .collect();
        write_line(&mut out, fields.iter().map(String::as_str));
    }
    out
}

/// Column order of the first record, for callers without an explicit header.
pub fn header_of(records: &[Row]) -> Vec<String> {
    records
        .first()
        .map(|r| r.keys().map(str::to_owned).collect())
        .unwrap_or_default()
}

fn write_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Quote `field` if it needs it.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::reader::parse_records;
    use ehrdash_core::row;

    #[test]
    fn escape_only_when_needed() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("1,2"), "\"1,2\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn writes_header_then_rows() {
        let records = vec![row! { "name" => "a", "val" => "1,2" }];
        let text = write_records(&header_of(&records), &records);
        assert_eq!(text, "name,val\na,\"1,2\"\n");
    }

    /// Field values built from every pair of awkward fragments.
    fn generated_fields() -> Vec<String> {
        const FRAGMENTS: [&str; 8] = ["", "a", " ", ",", "\"", "\n", "x y", "\"\""];
        FRAGMENTS
            .iter()
            .flat_map(|a| FRAGMENTS.iter().map(move |b| format!("{a}{b}")))
            .collect()
    }

    #[test]
    fn generated_records_survive_a_round_trip() {
        let fields = generated_fields();
        let records: Vec<Row> = fields
            .iter()
            .enumerate()
            .map(|(i, value)| {
                row! {
                    "value" => value.as_str(),
                    "other" => fields[(i * 7 + 3) % fields.len()].as_str(),
                    "id" => format!("r{i}"),
                }
            })
            .collect();
        let header = header_of(&records);
        let parsed = parse_records(&write_records(&header, &records));
        assert_eq!(parsed.len(), fields.len());
        assert_eq!(parsed, records);
    }

    #[test]
    fn blank_fields_survive_beside_a_non_blank_one() {
        let records = vec![
            row! { "a" => "", "b" => " ", "c" => "x" },
            row! { "a" => "x", "b" => "", "c" => "  " },
        ];
        let parsed = parse_records(&write_records(&header_of(&records), &records));
        assert_eq!(parsed, records);
    }

    #[test]
    fn all_blank_record_does_not_survive() {
        let records = vec![row! { "a" => "x", "b" => "1" }, row! { "a" => "", "b" => " " }];
        let text = write_records(&header_of(&records), &records);
        assert_eq!(text, "a,b\nx,1\n, \n");
        assert_eq!(parse_records(&text), vec![row! { "a" => "x", "b" => "1" }]);
    }

    #[test]
    fn carriage_return_does_not_survive() {
        let records = vec![row! { "a" => "x\r\ny" }];
        let text = write_records(&header_of(&records), &records);
        assert_eq!(text, "a\n\"x\r\ny\"\n");
        assert_eq!(parse_records(&text), vec![row! { "a" => "x\ny" }]);
    }

    #[test]
    fn numbers_are_written_in_display_form() {
        let records = vec![row! { "tat" => 6.5, "count" => 12 }];
        let text = write_records(&header_of(&records), &records);
        assert_eq!(text, "tat,count\n6.5,12\n");
    }
}
