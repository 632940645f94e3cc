//! Delimiter-separated row encoding with minimal quoting.
//!
//! The flat-file sink and the query engine must agree byte-for-byte on this
//! format: quote character `'`, a field quoted only when it contains the
//! delimiter, the quote character, or a line break, and embedded quotes
//! doubled. Quoted fields may span lines, so parsing works on whole file
//! content rather than line-by-line.

/// Quote character for flat-file rows.
pub const QUOTE: char = '\'';

/// Encodes one row, minimally quoted, without a trailing newline.
#[must_use]
pub fn write_row(fields: &[String], delimiter: char) -> String {
    fields
        .iter()
        .map(|f| quote_field(f, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

fn quote_field(field: &str, delimiter: char) -> String {
    let needs_quoting = field.contains(delimiter)
        || field.contains(QUOTE)
        || field.contains('\n')
        || field.contains('\r');
    if !needs_quoting {
        return field.to_string();
    }

    let mut out = String::with_capacity(field.len() + 2);
    out.push(QUOTE);
    for ch in field.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
    out
}

/// Decodes whole file content into rows of fields.
///
/// A quote opens a quoted field only at the start of a field; inside quotes,
/// a doubled quote is a literal quote and line breaks belong to the field.
/// Blank lines are skipped.
#[must_use]
pub fn parse_rows(input: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    // A delimiter was seen, so the (possibly empty) field after it counts.
    let mut field_pending = false;
    // The current field was opened with a quote; blocks re-opening.
    let mut quoted = false;
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == QUOTE && field.is_empty() && !quoted {
            in_quotes = true;
            quoted = true;
        } else if ch == delimiter {
            row.push(std::mem::take(&mut field));
            field_pending = true;
            quoted = false;
        } else if ch == '\n' || ch == '\r' {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            if field_pending || quoted || !field.is_empty() || !row.is_empty() {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            field_pending = false;
            quoted = false;
        } else {
            field.push(ch);
        }
    }

    if field_pending || quoted || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
