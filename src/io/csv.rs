//! Minimal CSV record handling.
//!
//! Fields are comma-separated; a field wrapped in double quotes may contain
//! commas, and `""` inside quotes is a literal quote. Records are written
//! with `\r\n` terminators and only the fields that need it are quoted.

use std::io::{self, Write};

/// Splits one line into trimmed fields.
///
/// # Examples
///
/// ```
/// use u_allowables::io::csv::split_record;
///
/// assert_eq!(split_record(r#"1, "a,b" ,"say ""hi""""#), vec!["1", "a,b", r#"say "hi""#]);
/// ```
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

/// Writes one record, quoting fields that contain separators or quotes.
pub fn write_record<W, S>(out: &mut W, fields: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        let field = field.as_ref();
        if needs_quotes(field) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\r\n")
}
