use super::{cell, date_cell, description_parts, Extracted};
use crate::amount::{is_negative_marked, parse_amount};
use crate::diagnostics::DiagnosticsSink;
use crate::profiles::BankProfile;

/// Read the profile's columns as they are. Separate debit and credit columns
/// are taken at face value; a shared column is split by sign, negative
/// amounts being credits.
pub(super) fn extract(
    row: &[String],
    profile: &BankProfile,
    row_no: usize,
    sink: &mut dyn DiagnosticsSink,
) -> Extracted {
    let date = date_cell(cell(row, profile.date_column), profile.date_format, row_no, sink);
    let description = description_parts(row, profile.description_columns.iter().copied()).join(" ");

    let (debit, credit) = if profile.shares_amount_column() {
        let raw = cell(row, profile.debit_column);
        match parse_amount(raw) {
            Some(amount) if is_negative_marked(raw) => (None, Some(amount)),
            Some(amount) => (Some(amount), None),
            None => (None, None),
        }
    } else {
        (
            parse_amount(cell(row, profile.debit_column)),
            parse_amount(cell(row, profile.credit_column)),
        )
    };

    Extracted { date, description, debit, credit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::processors::test_support::row;
    use crate::profiles::ProfileRegistry;

    fn profile(key: &str) -> BankProfile {
        ProfileRegistry::builtin().get(key).unwrap().clone()
    }

    #[test]
    fn test_ing_separate_columns() {
        let r = row(&["03-02-2025", "Albert Heijn", "Amsterdam", "23,40", ""]);
        let got = extract(&r, &profile("ing"), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-02-03");
        assert_eq!(got.description, "Albert Heijn Amsterdam");
        assert_eq!(got.debit, Some(23.4));
        assert_eq!(got.credit, None);
    }

    #[test]
    fn test_ing_credit_column() {
        let r = row(&["28-02-2025", "Salaris", "", "", "2.500,00"]);
        let got = extract(&r, &profile("ing"), 2, &mut Diagnostics::new());
        assert_eq!(got.debit, None);
        assert_eq!(got.credit, Some(2500.0));
    }

    #[test]
    fn test_n26_shared_column_split_by_sign() {
        let outgoing = row(&["2025-03-04", "Spotify", "", "", "Subscription", "-9.99"]);
        let got = extract(&outgoing, &profile("n26"), 2, &mut Diagnostics::new());
        assert_eq!(got.description, "Spotify Subscription");
        assert_eq!((got.debit, got.credit), (None, Some(9.99)));

        let incoming = row(&["2025-03-05", "Employer GmbH", "", "", "", "1500.00"]);
        let got = extract(&incoming, &profile("n26"), 3, &mut Diagnostics::new());
        assert_eq!((got.debit, got.credit), (Some(1500.0), None));
    }

    #[test]
    fn test_missing_columns_read_as_empty() {
        let r = row(&["2025-03-04", "Short row"]);
        let got = extract(&r, &profile("n26"), 2, &mut Diagnostics::new());
        assert_eq!(got.description, "Short row");
        assert_eq!((got.debit, got.credit), (None, None));
    }
}
