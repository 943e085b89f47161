//! Bank processors: turn trimmed statement rows into normalized transactions.
//!
//! Each bank family is a [`Processor`] variant (enum dispatch instead of trait
//! objects). A variant only extracts date, description and amounts from one
//! row; skipping empty rows, the row policy and the final date sort are shared.

mod amex;
mod generic;
mod postbank;
mod revolut;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::date::{convert_date, DateFormat};
use crate::diagnostics::DiagnosticsSink;
use crate::error::RowError;
use crate::models::{NormalizedTransaction, RawRow};
use crate::profiles::{BankProfile, RowPolicy};

// ---------------------------------------------------------------------------
// Shared cell helpers
// ---------------------------------------------------------------------------

/// Cells that carry no description text.
const PLACEHOLDER_CELLS: &[&str] = &["", "NULL", "null", "0", "0,00"];

/// Bare numbers such as `50,00`, `-12.5`, `1.234,56` or `1,234.56`; dates
/// like `1.3.2025` do not match.
static AMOUNT_SHAPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d+[,.]?\d*|\d{1,3}(?:\.\d{3})+(?:,\d*)?|\d{1,3}(?:,\d{3})+(?:\.\d*)?)$").unwrap()
});

/// Trimmed cell at `index`, or `""` when the row is too short.
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or("")
}

pub(crate) fn is_description_cell(value: &str) -> bool {
    !PLACEHOLDER_CELLS.contains(&value) && !AMOUNT_SHAPED.is_match(value)
}

/// Usable description cells from `columns`, in column order.
pub(crate) fn description_parts<'a>(
    row: &'a [String],
    columns: impl IntoIterator<Item = usize>,
) -> Vec<&'a str> {
    columns
        .into_iter()
        .map(|i| cell(row, i))
        .filter(|v| is_description_cell(v))
        .collect()
}

/// Convert the date cell, reporting empty and unparseable values.
pub(crate) fn date_cell(
    raw: &str,
    format: DateFormat,
    row_no: usize,
    sink: &mut dyn DiagnosticsSink,
) -> String {
    if raw.is_empty() {
        sink.warn(Some(row_no), "Empty date".to_string());
        return String::new();
    }
    let date = convert_date(raw, format);
    if date.is_empty() {
        sink.warn(Some(row_no), format!("Date conversion failed for {raw:?} ({format})"));
    }
    date
}

/// Stable ascending sort by ISO date; undated records go last.
pub(crate) fn sort_by_date(transactions: &mut [NormalizedTransaction]) {
    transactions.sort_by(|a, b| {
        (a.date.is_empty(), a.date.as_str()).cmp(&(b.date.is_empty(), b.date.as_str()))
    });
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

/// What a processor read from one row, before the row policy is applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Extracted {
    pub date: String,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
}

impl Extracted {
    fn has_amount(&self) -> bool {
        self.debit.is_some() || self.credit.is_some()
    }

    fn into_transaction(
        self,
        policy: RowPolicy,
        row_no: usize,
        sink: &mut dyn DiagnosticsSink,
    ) -> Option<NormalizedTransaction> {
        if policy == RowPolicy::Strict {
            if self.date.is_empty() {
                sink.warn(Some(row_no), "Skipped - no valid date".to_string());
                return None;
            }
            if self.description.is_empty() && !self.has_amount() {
                sink.warn(Some(row_no), "Skipped - insufficient data".to_string());
                return None;
            }
        }

        let mut txn = NormalizedTransaction::new(self.date, self.description, self.debit, self.credit);
        if txn.is_blank() {
            sink.warn(Some(row_no), "Skipped - no extractable data".to_string());
            return None;
        }
        if policy == RowPolicy::Lenient && txn.description.is_empty() {
            txn.description = format!("Transaction {row_no}");
        }
        Some(txn)
    }
}

// ---------------------------------------------------------------------------
// Processor kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processor {
    Postbank,
    Amex,
    Revolut,
    /// Configured columns taken at face value (ING, N26).
    Generic,
}

impl Processor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postbank => "postbank",
            Self::Amex => "amex",
            Self::Revolut => "revolut",
            Self::Generic => "generic",
        }
    }

    fn extract(
        &self,
        row: &[String],
        profile: &BankProfile,
        row_no: usize,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Extracted, RowError> {
        if row.len() < profile.min_columns {
            return Err(RowError::TooFewColumns {
                found: row.len(),
                required: profile.min_columns,
            });
        }
        Ok(match self {
            Self::Postbank => postbank::extract(row, profile, row_no, sink),
            Self::Amex => amex::extract(row, profile, row_no, sink),
            Self::Revolut => revolut::extract(row, profile, row_no, sink),
            Self::Generic => generic::extract(row, profile, row_no, sink),
        })
    }

    /// Convert data rows (headers and footers already removed) into
    /// transactions sorted by date.
    pub fn process(
        &self,
        rows: &[RawRow],
        profile: &BankProfile,
        sink: &mut dyn DiagnosticsSink,
    ) -> Vec<NormalizedTransaction> {
        let mut transactions = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let row_no = profile.skip_rows + i + 1;
            if row.iter().all(|c| c.trim().is_empty()) {
                sink.debug(Some(row_no), "Completely empty row".to_string());
                continue;
            }
            sink.debug(Some(row_no), format!("{} columns: {row:?}", row.len()));

            let extracted = match self.extract(row, profile, row_no, sink) {
                Ok(extracted) => extracted,
                Err(e) => {
                    sink.error(Some(row_no), e.to_string());
                    continue;
                }
            };
            if let Some(txn) = extracted.into_transaction(profile.policy, row_no, sink) {
                sink.debug(
                    Some(row_no),
                    format!(
                        "Added transaction - Date: {:?}, Desc: {:?}, D: {:?}, C: {:?}",
                        txn.date, txn.description, txn.debit_unit, txn.credit_unit
                    ),
                );
                transactions.push(txn);
            }
        }

        sort_by_date(&mut transactions);
        sink.info(
            None,
            format!(
                "{} processing complete: {} of {} rows converted",
                profile.name,
                transactions.len(),
                rows.len()
            ),
        );
        transactions
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;
    use crate::diagnostics::{Diagnostics, Level};
    use crate::profiles::ProfileRegistry;

    fn txn(date: &str) -> NormalizedTransaction {
        NormalizedTransaction::new(date.to_string(), date.to_string(), Some(1.0), None)
    }

    #[test]
    fn test_description_cell_filter() {
        for v in ["", "NULL", "null", "0", "0,00", "50,00", "-12.5", "1.234,56", "1,234.56", "2025"] {
            assert!(!is_description_cell(v), "{v:?}");
        }
        for v in ["REWE", "1.3.2025", "7-Eleven", "Miete 03/2025"] {
            assert!(is_description_cell(v), "{v:?}");
        }
    }

    #[test]
    fn test_sort_puts_undated_last_and_is_stable() {
        let mut txns = vec![txn(""), txn("2025-03-01"), txn("2025-01-15"), txn("2025-01-15")];
        txns[2].description = "first".into();
        txns[3].description = "second".into();
        sort_by_date(&mut txns);
        let dates: Vec<&str> = txns.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-15", "2025-01-15", "2025-03-01", ""]);
        assert_eq!(txns[0].description, "first");
        assert_eq!(txns[1].description, "second");
    }

    #[test]
    fn test_strict_policy_drops_undated_rows() {
        let mut sink = Diagnostics::new();
        let extracted = Extracted {
            description: "Coffee".into(),
            debit: Some(4.5),
            ..Default::default()
        };
        assert!(extracted.into_transaction(RowPolicy::Strict, 3, &mut sink).is_none());
        assert_eq!(sink.warnings(), vec!["Row 3: Skipped - no valid date"]);
    }

    #[test]
    fn test_lenient_policy_fills_description() {
        let mut sink = Diagnostics::new();
        let extracted = Extracted { credit: Some(9.0), ..Default::default() };
        let txn = extracted.into_transaction(RowPolicy::Lenient, 7, &mut sink).unwrap();
        assert_eq!(txn.date, "");
        assert_eq!(txn.description, "Transaction 7");
        assert_eq!(txn.credit_unit, Some(9.0));
    }

    #[test]
    fn test_lenient_policy_still_drops_blank_rows() {
        let mut sink = Diagnostics::new();
        assert!(Extracted::default().into_transaction(RowPolicy::Lenient, 2, &mut sink).is_none());
        assert_eq!(sink.warnings(), vec!["Row 2: Skipped - no extractable data"]);
    }

    #[test]
    fn test_lenient_keeps_undated_row_with_description() {
        let mut sink = Diagnostics::new();
        let extracted = Extracted { description: "Annual fee".into(), ..Default::default() };
        let txn = extracted.into_transaction(RowPolicy::Lenient, 5, &mut sink).unwrap();
        assert!(!txn.is_blank());
        assert_eq!(txn.description, "Annual fee");
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_short_rows_are_row_errors() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("revolut").unwrap();
        let rows = vec![
            row(&["x", "y", "2025-01-15"]),
            row(&["", "", "2025-01-16 09:00:00", "", "Bakery", "-2,10"]),
        ];
        let mut sink = Diagnostics::new();
        let txns = profile.processor.process(&rows, profile, &mut sink);
        assert_eq!(txns.len(), 1);
        assert_eq!(
            sink.errors(),
            vec!["Row 2: too few columns (3, need at least 6)"]
        );
        assert!(sink.at_level(Level::Info).any(|d| d.message.contains("1 of 2 rows")));
    }

    #[test]
    fn test_empty_rows_are_skipped_quietly() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("amex").unwrap();
        let rows = vec![row(&["", " ", ""])];
        let mut sink = Diagnostics::new();
        assert!(profile.processor.process(&rows, profile, &mut sink).is_empty());
        assert!(sink.warnings().is_empty());
        assert!(sink.errors().is_empty());
    }
}
