//! Statement analysis: how many rows survived a conversion, and what the raw
//! date column looks like before a profile is trusted with it.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::RawRow;

/// Share of rows that must survive for a conversion to count as clean.
const SUCCESS_THRESHOLD: f64 = 0.95;
/// Share of lost rows above which a conversion is flagged.
const SIGNIFICANT_LOSS: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingAnalysis {
    /// Data rows handed to the processor (after header and footer trimming).
    pub input_rows: usize,
    pub output_rows: usize,
    pub skipped_rows: usize,
}

impl ProcessingAnalysis {
    pub fn new(input_rows: usize, output_rows: usize) -> Self {
        Self {
            input_rows,
            output_rows,
            skipped_rows: input_rows.saturating_sub(output_rows),
        }
    }

    /// Percentage of input rows that became transactions.
    pub fn success_rate(&self) -> f64 {
        if self.input_rows == 0 {
            return 0.0;
        }
        self.output_rows as f64 / self.input_rows as f64 * 100.0
    }

    pub fn is_success(&self) -> bool {
        self.output_rows as f64 >= self.input_rows as f64 * SUCCESS_THRESHOLD
    }

    pub fn has_significant_loss(&self) -> bool {
        self.skipped_rows as f64 > self.input_rows as f64 * SIGNIFICANT_LOSS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DateShape {
    /// `d/m/yyyy` or `m/d/yyyy`; cannot be told apart from the shape alone.
    Slash,
    Dotted,
    Iso,
    Empty,
    Unknown,
}

impl DateShape {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Slash => "DD/MM/YYYY or MM/DD/YYYY",
            Self::Dotted => "DD.MM.YYYY",
            Self::Iso => "YYYY-MM-DD",
            Self::Empty => "empty",
            Self::Unknown => "unknown",
        }
    }
}

static SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());
static DOTTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").unwrap());
static ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}(?:[ T].*)?$").unwrap());

pub fn classify_date(raw: &str) -> DateShape {
    let s = raw.trim();
    if s.is_empty() {
        DateShape::Empty
    } else if SLASH.is_match(s) {
        DateShape::Slash
    } else if DOTTED.is_match(s) {
        DateShape::Dotted
    } else if ISO.is_match(s) {
        DateShape::Iso
    } else {
        DateShape::Unknown
    }
}

/// Count the date shapes found in `column` across `rows`. Rows too short to
/// have the column count as empty.
pub fn survey_dates(rows: &[RawRow], column: usize) -> Vec<(DateShape, usize)> {
    let mut counts: BTreeMap<DateShape, usize> = BTreeMap::new();
    for row in rows {
        let cell = row.get(column).map(String::as_str).unwrap_or("");
        *counts.entry(classify_date(cell)).or_default() += 1;
    }
    counts.into_iter().collect()
}
