//! Plain `source,destination[,weight]` rows.

use crate::table::DataTable;
use crate::{Error, Result};
use serde_json::Value;

/// Parses CSV text into a [`DataTable`].
///
/// When every record has exactly two fields the table is unweighted; otherwise a missing or
/// empty third field is a missing weight.
pub fn parse_csv_table(text: &str) -> Result<DataTable> {
    let records = parse_csv_records(text)?;
    let unweighted = !records.is_empty() && records.iter().all(|r| r.len() == 2);

    let mut source = Vec::with_capacity(records.len());
    let mut destination = Vec::with_capacity(records.len());
    let mut weight = Vec::with_capacity(records.len());
    for fields in records {
        let mut it = fields.into_iter();
        source.push(Value::String(normalize_field_value(&it.next().unwrap_or_default())));
        destination.push(Value::String(normalize_field_value(
            &it.next().unwrap_or_default(),
        )));
        let raw = it.next().unwrap_or_default();
        let raw = raw.trim();
        weight.push(if raw.is_empty() {
            Value::Null
        } else {
            Value::String(raw.to_string())
        });
    }

    Ok(DataTable {
        source: Some(source),
        destination: Some(destination),
        weight: if unweighted { None } else { Some(weight) },
        ..Default::default()
    })
}

fn normalize_field_value(s: &str) -> String {
    s.trim().to_string()
}

fn parse_csv_records(input: &str) -> Result<Vec<Vec<String>>> {
    let mut p = CsvParser::new(input);
    let mut records = Vec::new();
    p.consume_blank_lines();
    while !p.eof() {
        let record_line = p.line;
        let mut fields = vec![p.parse_field()?];
        while p.try_consume_char(',') {
            fields.push(p.parse_field()?);
        }

        if fields.len() < 2 || fields.len() > 3 {
            return Err(Error::Csv {
                line: record_line,
                message: format!("expected 2 or 3 fields, found {}", fields.len()),
            });
        }

        if !p.try_consume_newline() && !p.eof() {
            return Err(p.error("expected end of record"));
        }
        p.consume_blank_lines();

        records.push(fields);
    }
    Ok(records)
}

struct CsvParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> CsvParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::Csv {
            line: self.line,
            message: message.to_string(),
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn try_consume_char(&mut self, ch: char) -> bool {
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skips empty and whitespace-only lines.
    fn consume_blank_lines(&mut self) {
        loop {
            let line_end = self.rest().find(['\n', '\r']).unwrap_or(self.rest().len());
            if !self.rest()[..line_end].trim().is_empty() {
                return;
            }
            self.pos += line_end;
            if !self.try_consume_newline() {
                return;
            }
        }
    }

    fn try_consume_newline(&mut self) -> bool {
        match self.peek_char() {
            Some('\n') => {
                self.pos += 1;
                self.line += 1;
                true
            }
            Some('\r') => {
                self.pos += 1;
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn parse_field(&mut self) -> Result<String> {
        let leading = self.rest().len() - self.rest().trim_start_matches([' ', '\t']).len();
        if self.rest()[leading..].starts_with('"') {
            self.pos += leading;
            let out = self.parse_quoted_field()?;
            let trailing = self.rest().len() - self.rest().trim_start_matches([' ', '\t']).len();
            self.pos += trailing;
            return Ok(out);
        }
        Ok(self.parse_unquoted_field())
    }

    fn parse_unquoted_field(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == ',' || ch == '\n' || ch == '\r' {
                break;
            }
            out.push(ch);
            self.pos += ch.len_utf8();
        }
        out
    }

    fn parse_quoted_field(&mut self) -> Result<String> {
        let start_line = self.line;
        self.pos += 1;
        let mut out = String::new();
        while let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
            match ch {
                '"' if self.peek_char() == Some('"') => {
                    self.pos += 1;
                    out.push('"');
                }
                '"' => return Ok(out),
                '\n' => {
                    self.line += 1;
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        Err(Error::Csv {
            line: start_line,
            message: "unterminated quoted field".to_string(),
        })
    }
}
