use std::io::Write;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::NormalizedTransaction;

pub const HEADER: &str = "Date,Category,Description,Reference No.,QTY,D- Unit,C- Unit";

/// Render transactions as comma-separated text under the fixed header.
///
/// The description is always quoted (internal quotes doubled); amounts have
/// two decimals and are empty when absent. Lines are joined with `\n`, no
/// trailing newline.
pub fn serialize(transactions: &[NormalizedTransaction]) -> String {
    std::iter::once(HEADER.to_string())
        .chain(transactions.iter().map(record_line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stream the [`serialize`] text to `writer`.
pub fn write_csv<W: Write>(transactions: &[NormalizedTransaction], mut writer: W) -> Result<()> {
    writer.write_all(serialize(transactions).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// `converted_<bank>_<YYYY-MM-DD>.csv`
pub fn default_export_name(bank: &str, day: NaiveDate) -> String {
    format!("converted_{}_{}.csv", bank, day.format("%Y-%m-%d"))
}

fn record_line(t: &NormalizedTransaction) -> String {
    [
        t.date.clone(),
        t.category.clone(),
        quote(&t.description),
        t.reference_no.clone(),
        t.qty.clone(),
        unit(t.debit_unit),
        unit(t.credit_unit),
    ]
    .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn unit(amount: Option<f64>) -> String {
    amount.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::parse_delimited;

    fn txn(date: &str, description: &str, debit: Option<f64>, credit: Option<f64>) -> NormalizedTransaction {
        NormalizedTransaction::new(date.to_string(), description.to_string(), debit, credit)
    }

    #[test]
    fn test_header_and_rows() {
        let out = serialize(&[
            txn("2025-03-01", "REWE BERLIN", Some(50.0), None),
            txn("2025-03-03", "EDEKA", None, Some(23.1)),
        ]);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "2025-03-01,,\"REWE BERLIN\",,,50.00,");
        assert_eq!(lines[2], "2025-03-03,,\"EDEKA\",,,,23.10");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_empty_list_is_header_only() {
        assert_eq!(serialize(&[]), HEADER);
    }

    #[test]
    fn test_description_survives_retokenizing() {
        let description = "Say \"hi\", then pay; 3,50 EUR";
        let out = serialize(&[txn("2025-01-15", description, Some(3.5), None)]);
        let rows = parse_delimited(&out, ',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], description);
        assert_eq!(rows[1].len(), 7);
    }

    #[test]
    fn test_output_is_standard_csv() {
        let out = serialize(&[
            txn("", "Transaction 4", Some(1234.5), None),
            txn("2025-01-15", "He said \"no\"", None, Some(0.5)),
        ]);
        let mut reader = csv::ReaderBuilder::new().from_reader(out.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(3), Some("Reference No."));
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(0), Some(""));
        assert_eq!(records[0].get(5), Some("1234.50"));
        assert_eq!(records[1].get(2), Some("He said \"no\""));
        assert_eq!(records[1].get(6), Some("0.50"));
    }

    #[test]
    fn test_default_export_name() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(default_export_name("amex", day), "converted_amex_2025-03-07.csv");
    }

    #[test]
    fn test_write_csv_matches_serialize() {
        let txns = vec![txn("2025-01-15", "Coffee Shop", Some(4.5), None)];
        let mut buf = Vec::new();
        write_csv(&txns, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serialize(&txns));
    }
}
