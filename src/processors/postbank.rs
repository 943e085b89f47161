//! Postbank exports: date in column A, description spread over C..O, amounts
//! in P (received) and Q (paid out).

use super::{cell, date_cell, description_parts, Extracted};
use crate::amount::parse_amount;
use crate::diagnostics::DiagnosticsSink;
use crate::profiles::BankProfile;

/// Columns left free for amounts at the end of a row.
const AMOUNT_TAIL: usize = 3;
/// How far back from the end of a row the amount scan looks.
const SCAN_WIDTH: usize = 5;

pub(super) fn extract(
    row: &[String],
    profile: &BankProfile,
    row_no: usize,
    sink: &mut dyn DiagnosticsSink,
) -> Extracted {
    let date = date_cell(cell(row, profile.date_column), profile.date_format, row_no, sink);

    let description_columns = profile
        .description_columns
        .iter()
        .copied()
        .filter(|&i| i + AMOUNT_TAIL <= row.len());
    let description = description_parts(row, description_columns).join(" ");

    // The credit column may be cut off; a missing cell reads as empty.
    let (debit, credit) = if row.len() > profile.debit_column {
        (
            positive_amount(cell(row, profile.debit_column)),
            positive_amount(cell(row, profile.credit_column)),
        )
    } else {
        scan_amounts(row, row_no, sink)
    };

    Extracted { date, description, debit, credit }
}

fn positive_amount(raw: &str) -> Option<f64> {
    parse_amount(raw).filter(|v| *v > 0.0)
}

/// Fallback for rows cut short of the fixed amount columns: walking back from
/// the last cell, the first amount found is paid out and the second received.
fn scan_amounts(row: &[String], row_no: usize, sink: &mut dyn DiagnosticsSink) -> (Option<f64>, Option<f64>) {
    let mut debit = None;
    let mut credit = None;
    let lowest = 2.max(row.len().saturating_sub(SCAN_WIDTH));

    for index in (lowest..row.len()).rev() {
        let Some(amount) = positive_amount(cell(row, index)) else {
            continue;
        };
        if credit.is_none() {
            sink.debug(Some(row_no), format!("Found credit amount in column {index}: {amount}"));
            credit = Some(amount);
        } else {
            sink.debug(Some(row_no), format!("Found debit amount in column {index}: {amount}"));
            debit = Some(amount);
            break;
        }
    }
    (debit, credit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::processors::test_support::sparse_row;
    use crate::profiles::ProfileRegistry;

    fn postbank() -> BankProfile {
        ProfileRegistry::builtin().get("postbank").unwrap().clone()
    }

    #[test]
    fn test_fixed_amount_columns() {
        let profile = postbank();
        let row = sparse_row(18, &[(0, "1.3.2025"), (2, "REWE"), (3, "BERLIN"), (15, "50,00")]);
        let mut sink = Diagnostics::new();
        let got = extract(&row, &profile, 9, &mut sink);
        assert_eq!(got.date, "2025-03-01");
        assert_eq!(got.description, "REWE BERLIN");
        assert_eq!(got.debit, Some(50.0));
        assert_eq!(got.credit, None);
    }

    #[test]
    fn test_row_ending_at_debit_column_keeps_debit() {
        let profile = postbank();
        let row = sparse_row(16, &[(0, "1.3.2025"), (2, "REWE"), (3, "BERLIN"), (15, "50,00")]);
        let got = extract(&row, &profile, 9, &mut Diagnostics::new());
        assert_eq!(got.debit, Some(50.0));
        assert_eq!(got.credit, None);
        assert_eq!(got.description, "REWE BERLIN");
    }

    #[test]
    fn test_credit_column() {
        let profile = postbank();
        let row = sparse_row(17, &[(0, "28.2.2025"), (4, "Miete"), (16, "-1.250,00")]);
        let got = extract(&row, &profile, 9, &mut Diagnostics::new());
        assert_eq!(got.debit, None);
        assert_eq!(got.credit, Some(1250.0));
    }

    #[test]
    fn test_amount_shaped_cells_leave_description() {
        let profile = postbank();
        let row = sparse_row(
            18,
            &[(0, "1.3.2025"), (2, "Gutschrift"), (5, "NULL"), (6, "0,00"), (7, "123,45"), (8, "Ref 7")],
        );
        let got = extract(&row, &profile, 9, &mut Diagnostics::new());
        assert_eq!(got.description, "Gutschrift Ref 7");
    }

    #[test]
    fn test_short_row_scans_from_the_end() {
        let profile = postbank();
        let row = sparse_row(12, &[(0, "5.3.2025"), (2, "Lastschrift"), (9, "20,00"), (11, "7,50")]);
        let mut sink = Diagnostics::new();
        let got = extract(&row, &profile, 9, &mut sink);
        assert_eq!(got.credit, Some(7.5));
        assert_eq!(got.debit, Some(20.0));
        assert_eq!(got.description, "Lastschrift");
    }

    #[test]
    fn test_bad_date_is_reported() {
        let profile = postbank();
        let row = sparse_row(18, &[(0, "31.2.2025"), (2, "X"), (15, "1,00")]);
        let mut sink = Diagnostics::new();
        let got = extract(&row, &profile, 12, &mut sink);
        assert_eq!(got.date, "");
        assert_eq!(
            sink.warnings(),
            vec!["Row 12: Date conversion failed for \"31.2.2025\" (D.M.YYYY)"]
        );
    }
}
