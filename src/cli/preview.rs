use comfy_table::{Cell, Table};

use bankconv::analysis::survey_dates;
use bankconv::error::Result;
use bankconv::tokenizer::{detect_separator, parse_delimited};

pub fn run(file: &str, rows: usize, date_column: usize) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let text = String::from_utf8_lossy(&bytes);
    let separator = detect_separator(&text);
    let parsed = parse_delimited(&text, separator);

    println!("Separator:  {separator:?}");
    println!("Rows:       {}", parsed.len());

    let shown = &parsed[..rows.min(parsed.len())];
    let width = shown.iter().map(Vec::len).max().unwrap_or(0);
    let mut table = Table::new();
    let mut header = vec!["Row".to_string()];
    header.extend((0..width).map(|i| i.to_string()));
    table.set_header(header);
    for (i, row) in shown.iter().enumerate() {
        let mut cells = vec![Cell::new(i + 1)];
        cells.extend((0..width).map(|c| Cell::new(row.get(c).map(String::as_str).unwrap_or(""))));
        table.add_row(cells);
    }
    println!("{table}");

    let mut survey = Table::new();
    survey.set_header(vec!["Date shape", "Rows"]);
    for (shape, count) in survey_dates(&parsed, date_column) {
        survey.add_row(vec![Cell::new(shape.label()), Cell::new(count)]);
    }
    println!("Column {date_column}\n{survey}");
    Ok(())
}
