//! Locale-aware amount parsing for European and US formatted numbers.

/// Cells that mean "no amount" rather than zero.
const NULL_EQUIVALENTS: &[&str] = &["", "0", "0,00", "0.00", "-"];

/// Parse a free-form amount into an unsigned magnitude.
///
/// Handles `1.234,56`, `1,234.56`, `1234,5`, `1,234`, currency symbols and
/// sign markers. The sign is dropped; callers decide which bucket the
/// magnitude belongs to. Returns `None` for null-equivalents and anything that
/// is not a finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if NULL_EQUIVALENTS.contains(&trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '£') && !c.is_whitespace())
        .collect();
    let unsigned = strip_sign(&cleaned);
    if NULL_EQUIVALENTS.contains(&unsigned) {
        return None;
    }

    let normalized = normalize_separators(unsigned);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.abs()),
        _ => {
            log::debug!("could not parse amount {raw:?} (normalized {normalized:?})");
            None
        }
    }
}

/// True when the raw cell marks a negative amount (`-12,50`, `12,50-`, `(12.50)`).
pub fn is_negative_marked(raw: &str) -> bool {
    let s = raw.trim();
    s.contains('-') || s.starts_with('(')
}

fn strip_sign(s: &str) -> &str {
    let s = s
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(s);
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    s.strip_suffix('-').unwrap_or(s)
}

fn normalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // Whichever separator comes last is the decimal point.
        (Some(comma), Some(dot)) => with_decimal_at(s, Some(comma.max(dot))),
        (Some(comma), None) => {
            let after = &s[comma + 1..];
            if (1..=2).contains(&after.len()) && after.bytes().all(|b| b.is_ascii_digit()) {
                with_decimal_at(s, Some(comma))
            } else {
                with_decimal_at(s, None)
            }
        }
        _ => s.to_string(),
    }
}

/// Rebuild `s` with the separator at byte `decimal` turned into `.` and every
/// other `,`/`.` removed.
fn with_decimal_at(s: &str, decimal: Option<usize>) -> String {
    s.char_indices()
        .filter_map(|(i, c)| match c {
            _ if Some(i) == decimal => Some('.'),
            ',' | '.' => None,
            _ => Some(c),
        })
        .collect()
}
