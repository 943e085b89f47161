use super::{cell, date_cell, description_parts, Extracted};
use crate::amount::{is_negative_marked, parse_amount};
use crate::diagnostics::DiagnosticsSink;
use crate::profiles::BankProfile;

/// Revolut rows carry a `YYYY-MM-DD hh:mm:ss` timestamp and one signed
/// amount: money going out is negative.
pub(super) fn extract(
    row: &[String],
    profile: &BankProfile,
    row_no: usize,
    sink: &mut dyn DiagnosticsSink,
) -> Extracted {
    let raw_date = cell(row, profile.date_column);
    let day = raw_date.split(' ').next().unwrap_or(raw_date);
    let date = date_cell(day, profile.date_format, row_no, sink);

    let description = description_parts(row, profile.description_columns.iter().copied()).join(" ");

    let raw_amount = cell(row, profile.debit_column);
    let (mut debit, mut credit) = (None, None);
    if let Some(amount) = parse_amount(raw_amount) {
        if is_negative_marked(raw_amount) {
            debit = Some(amount);
        } else {
            credit = Some(amount);
        }
    }

    Extracted { date, description, debit, credit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::processors::test_support::row;
    use crate::profiles::ProfileRegistry;

    fn revolut() -> BankProfile {
        ProfileRegistry::builtin().get("revolut").unwrap().clone()
    }

    #[test]
    fn test_outgoing_payment_is_debit() {
        let r = row(&["", "", "2025-01-15 10:00:00", "", "Coffee Shop", "-4,50"]);
        let got = extract(&r, &revolut(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-01-15");
        assert_eq!(got.description, "Coffee Shop");
        assert_eq!(got.debit, Some(4.5));
        assert_eq!(got.credit, None);
    }

    #[test]
    fn test_top_up_is_credit() {
        let r = row(&["TOPUP", "Current", "2025-02-01 08:30:12", "2025-02-01 08:30:15", "Top-up by *1234", "100.00"]);
        let got = extract(&r, &revolut(), 3, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-02-01");
        assert_eq!(got.credit, Some(100.0));
        assert_eq!(got.debit, None);
    }

    #[test]
    fn test_unparseable_timestamp() {
        let r = row(&["", "", "15.01.2025 10:00", "", "Shop", "-1,00"]);
        let mut sink = Diagnostics::new();
        let got = extract(&r, &revolut(), 4, &mut sink);
        assert_eq!(got.date, "");
        assert_eq!(sink.warnings().len(), 1);
    }
}
