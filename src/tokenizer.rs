//! Delimiter detection and quoted-field tokenization.
//!
//! Quoted fields may contain the delimiter and doubled quotes, but not line
//! breaks: every physical line is one row.

use crate::models::RawRow;

/// Number of leading lines inspected by [`detect_separator`].
const SAMPLE_LINES: usize = 5;

/// Pick `;` or `,` by counting both in the first few lines.
///
/// Semicolon wins only with a strictly higher count. Descriptions full of
/// literal commas or semicolons can tip the balance the wrong way.
pub fn detect_separator(text: &str) -> char {
    let (semicolons, commas) = text
        .lines()
        .take(SAMPLE_LINES)
        .fold((0usize, 0usize), |(s, c), line| {
            (s + line.matches(';').count(), c + line.matches(',').count())
        });
    log::debug!("separator detection: semicolons={semicolons}, commas={commas}");
    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

/// Split `text` into rows of trimmed fields.
///
/// Blank lines and lines whose fields are all empty are dropped. An
/// unterminated quote swallows the rest of its line; quote state never
/// carries over to the next line.
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<RawRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_line(line, delimiter))
        .filter(|row| row.iter().any(|field| !field.is_empty()))
        .collect()
}

fn split_line(line: &str, delimiter: char) -> RawRow {
    let mut row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == delimiter && !in_quotes {
            row.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    row.push(current.trim().to_string());
    row
}
