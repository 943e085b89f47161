//! American Express exports: one signed amount column, slash dates whose
//! day/month order has to be guessed.

use super::{cell, date_cell, description_parts, Extracted};
use crate::amount::{is_negative_marked, parse_amount};
use crate::date::DateFormat;
use crate::diagnostics::DiagnosticsSink;
use crate::profiles::BankProfile;

/// Columns searched when none of the configured description columns is usable.
const FALLBACK_DESCRIPTION_COLUMNS: std::ops::RangeInclusive<usize> = 1..=7;
const DESCRIPTION_SEPARATOR: &str = " - ";

pub(super) fn extract(
    row: &[String],
    profile: &BankProfile,
    row_no: usize,
    sink: &mut dyn DiagnosticsSink,
) -> Extracted {
    let raw_date = cell(row, profile.date_column);
    let date = date_cell(raw_date, guess_date_format(raw_date, profile.date_format), row_no, sink);

    let mut parts = description_parts(row, profile.description_columns.iter().copied());
    if parts.is_empty() {
        parts = description_parts(row, FALLBACK_DESCRIPTION_COLUMNS)
            .into_iter()
            .take(1)
            .collect();
    }
    let description = parts.join(DESCRIPTION_SEPARATOR);

    let raw_amount = cell(row, profile.debit_column);
    let (mut debit, mut credit) = (None, None);
    if let Some(amount) = parse_amount(raw_amount).filter(|v| *v > 0.0) {
        if is_negative_marked(raw_amount) {
            credit = Some(amount);
        } else {
            debit = Some(amount);
        }
    }

    Extracted { date, description, debit, credit }
}

/// Pick the slash order from the components themselves: a first component
/// above 12 must be a day, a second component above 12 must be a day too.
/// When both are 12 or less the profile's order wins, so `03/04/2025` is
/// read as 3 April even in a US-formatted export.
pub(super) fn guess_date_format(raw: &str, configured: DateFormat) -> DateFormat {
    if raw.contains('.') {
        return DateFormat::DayMonthYearDotted;
    }
    if !raw.contains('/') {
        return configured;
    }
    let parts: Vec<u32> = raw
        .split('/')
        .map(|p| p.trim().parse().unwrap_or(0))
        .collect();
    match parts.as_slice() {
        [first, _, _] if *first > 12 => DateFormat::DayMonthYearSlash,
        [_, second, _] if *second > 12 => DateFormat::MonthDayYearSlash,
        _ if matches!(configured, DateFormat::DayMonthYearSlash | DateFormat::MonthDayYearSlash) => configured,
        _ => DateFormat::DayMonthYearSlash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::processors::test_support::row;
    use crate::profiles::ProfileRegistry;

    fn amex() -> BankProfile {
        ProfileRegistry::builtin().get("amex").unwrap().clone()
    }

    #[test]
    fn test_positive_amount_is_debit() {
        let r = row(&["15/01/2025", "REFUND STORE", "", "", "25,00", "", "STORE BERLIN"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-01-15");
        assert_eq!(got.description, "REFUND STORE - STORE BERLIN");
        assert_eq!(got.debit, Some(25.0));
        assert_eq!(got.credit, None);
    }

    #[test]
    fn test_negative_amount_is_credit() {
        let r = row(&["02/01/2025", "LIDL", "", "", "-12,34"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-01-02");
        assert_eq!(got.credit, Some(12.34));
        assert_eq!(got.debit, None);
    }

    #[test]
    fn test_us_order_detected_from_large_day() {
        assert_eq!(guess_date_format("01/25/2025", DateFormat::DayMonthYearSlash), DateFormat::MonthDayYearSlash);
        assert_eq!(guess_date_format("25/01/2025", DateFormat::MonthDayYearSlash), DateFormat::DayMonthYearSlash);
        let r = row(&["01/25/2025", "AMAZON", "", "", "9,99"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-01-25");
    }

    #[test]
    fn test_ambiguous_dates_follow_profile_and_can_be_wrong() {
        // Known misread: a US export's 04/03/2025 (April 3rd) comes out as 4 March.
        assert_eq!(guess_date_format("04/03/2025", DateFormat::DayMonthYearSlash), DateFormat::DayMonthYearSlash);
        let r = row(&["04/03/2025", "HOTEL", "", "", "100,00"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-03-04");
    }

    #[test]
    fn test_dotted_dates_are_accepted() {
        let r = row(&["2.5.2025", "CAFE", "", "", "3,20"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.date, "2025-05-02");
    }

    #[test]
    fn test_description_falls_back_to_first_text_column() {
        let r = row(&["15/01/2025", "NULL", "", "4711", "5,00", "", "", "Hauptstr. 1"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!(got.description, "Hauptstr. 1");
    }

    #[test]
    fn test_zero_amount_leaves_both_empty() {
        let r = row(&["15/01/2025", "FEE WAIVED", "", "", "0,00"]);
        let got = extract(&r, &amex(), 2, &mut Diagnostics::new());
        assert_eq!((got.debit, got.credit), (None, None));
    }
}
