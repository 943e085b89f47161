use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};

use bankconv::diagnostics::Diagnostics;
use bankconv::error::{BankconvError, Result};
use bankconv::fmt::amount;
use bankconv::models::{ConversionResult, ProcessingStep, StepStatus};
use bankconv::pipeline::convert_with;
use bankconv::profiles::{ProfileRegistry, RowPolicy};
use bankconv::serializer::{default_export_name, write_csv};
use bankconv::settings::{load_settings, output_dir};

/// Warning and error lines printed before the rest are summarized.
const MAX_LISTED: usize = 10;

pub fn run(file: &str, bank: &str, output: Option<&str>, json: bool, policy: Option<&str>) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let text = String::from_utf8_lossy(&bytes);

    let settings = load_settings();
    let registry = ProfileRegistry::builtin().with_policies(&settings.row_policies);
    let mut profile = registry.require(bank)?.clone();
    if let Some(policy) = policy {
        profile.policy = policy.parse::<RowPolicy>()?;
    }

    let mut sink = Diagnostics::new();
    let conversion = convert_with(&profile, &text, &mut sink, |step| {
        if !json {
            print_step(step);
        }
    });
    let result = conversion.into_result()?;

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| BankconvError::Other(e.to_string()))?;
        println!("{out}");
        if let Some(path) = output {
            write_export(&result, Path::new(path))?;
        }
        return Ok(());
    }

    print_summary(&result, profile.name);
    print_messages(&result);

    let path = output.map(PathBuf::from).unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        output_dir().join(default_export_name(profile.key, today))
    });
    write_export(&result, &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_step(step: &ProcessingStep) {
    let details = step.details.as_deref().unwrap_or("");
    match step.status {
        StepStatus::Completed => println!("{} {} ({details})", "✓".green(), step.description),
        StepStatus::Error => println!("{} {}: {}", "✗".red(), step.description, details.red()),
        StepStatus::Pending | StepStatus::Processing => {}
    }
}

fn print_summary(result: &ConversionResult, bank_name: &str) {
    let summary = &result.summary;
    let analysis = &summary.analysis;

    let mut table = Table::new();
    table.set_header(vec!["", "Value"]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(summary.total_transactions)]);
    table.add_row(vec![Cell::new("Received (D- Unit)"), Cell::new(amount(summary.total_debits))]);
    table.add_row(vec![Cell::new("Paid out (C- Unit)"), Cell::new(amount(summary.total_credits))]);
    table.add_row(vec![
        Cell::new("Date range"),
        Cell::new(format!("{} to {}", summary.date_range.from, summary.date_range.to)),
    ]);
    let converted = format!(
        "{} of {} ({:.1}%)",
        analysis.output_rows,
        analysis.input_rows,
        analysis.success_rate()
    );
    let converted = if analysis.is_success() {
        converted.green()
    } else {
        converted.yellow()
    };
    table.add_row(vec![Cell::new("Rows converted"), Cell::new(converted)]);
    println!("{bank_name}\n{table}");

    if analysis.has_significant_loss() {
        println!(
            "{}",
            format!("{} rows were skipped; check the warnings below.", analysis.skipped_rows).yellow()
        );
    }
}

fn print_messages(result: &ConversionResult) {
    for (label, lines) in [("Warnings", &result.warnings), ("Row errors", &result.errors)] {
        if lines.is_empty() {
            continue;
        }
        println!("{label}: {}", lines.len());
        for line in lines.iter().take(MAX_LISTED) {
            let line = if label == "Warnings" { line.yellow() } else { line.red() };
            println!("  {line}");
        }
        if lines.len() > MAX_LISTED {
            println!("  ... and {} more", lines.len() - MAX_LISTED);
        }
    }
}

fn write_export(result: &ConversionResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_csv(&result.data, BufWriter::new(File::create(path)?))
}
