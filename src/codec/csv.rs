//! CSV codec: header row plus one flattened row per record.
//!
//! The nested address is flattened into sibling columns, giving the fixed
//! column order `id,email,city,country,zip_code,created_at`. Quoting
//! follows RFC 4180: fields containing a comma, quote, CR, or LF are
//! quoted, embedded quotes are doubled, and quoted fields may span lines.

use crate::codec::Codec;
use crate::error::{Result, StoreError};
use crate::record::{Address, Record};
use crate::types::Timestamp;

/// CSV transport codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvCodec;

/// Column names in output order: identity and email first, the flattened
/// address fields, creation timestamp last.
fn columns() -> Vec<&'static str> {
    let mut cols = vec!["id", "email"];
    cols.extend(Address::FIELDS);
    cols.push("created_at");
    cols
}

impl Codec for CsvCodec {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut out = String::new();
        write_row(&mut out, columns().into_iter());

        for record in records {
            let address = record.address();
            let fields = [
                record.id().to_string(),
                record.email().to_string(),
                address.city().to_string(),
                address.country().to_string(),
                address.zip_code().to_string(),
                record.created_at().to_rfc3339(),
            ];
            write_row(&mut out, fields.iter().map(String::as_str));
        }

        Ok(out.into_bytes())
    }

    fn decode(&self, transport: &[u8]) -> Result<Vec<Record>> {
        let text = std::str::from_utf8(transport)
            .map_err(|_| StoreError::Decode("CSV transport is not valid UTF-8".into()))?;

        let mut rows = parse_rows(text)?.into_iter();

        let header = rows
            .next()
            .ok_or_else(|| StoreError::Decode("empty CSV: missing header row".into()))?;
        let expected = columns();
        if header != expected {
            return Err(StoreError::Decode(format!(
                "unexpected CSV header: expected '{}', got '{}'",
                expected.join(","),
                header.join(","),
            )));
        }

        let mut records = Vec::new();
        for (i, row) in rows.enumerate() {
            let row_number = i + 1;
            if row.len() != expected.len() {
                return Err(StoreError::Decode(format!(
                    "row {row_number}: expected {} columns, got {}",
                    expected.len(),
                    row.len(),
                )));
            }

            let mut fields = row.into_iter();
            let id_raw = fields.next().unwrap_or_default();
            let email = fields.next().unwrap_or_default();
            let city = fields.next().unwrap_or_default();
            let country = fields.next().unwrap_or_default();
            let zip_code = fields.next().unwrap_or_default();
            let created_raw = fields.next().unwrap_or_default();

            let id: i64 = id_raw.parse().map_err(|_| {
                StoreError::validation("id", format!("row {row_number}: not an integer: '{id_raw}'"))
            })?;
            let created_at = Timestamp::parse(&created_raw)?;

            records.push(Record::with_created_at(
                id,
                email,
                Address::new(city, country, zip_code),
                created_at,
            )?);
        }

        Ok(records)
    }
}

fn write_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        write_field(out, field);
    }
    out.push('\n');
}

fn write_field(out: &mut String, field: &str) {
    let needs_quoting = field.contains(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if !needs_quoting {
        out.push_str(field);
        return;
    }

    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Split CSV text into rows of fields, honoring RFC 4180 quoting.
///
/// Accepts both `\n` and `\r\n` row terminators; a quoted field may
/// contain either. A lone `"` inside an unquoted field is kept literally.
fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_was_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {
                // Swallow the CR of a CRLF; the LF that follows ends the row.
            }
            '\n' => {
                line += 1;
                row.push(std::mem::take(&mut field));
                field_was_quoted = false;
                rows.push(std::mem::take(&mut row));
            }
            _ if field_was_quoted => {
                return Err(StoreError::Decode(format!(
                    "line {line}: unexpected character {c:?} after closing quote"
                )));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(StoreError::Decode(format!(
            "line {line}: unterminated quoted field"
        )));
    }

    // Final row without a trailing newline.
    if !field.is_empty() || field_was_quoted || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
