//! The conversion pipeline: separator detection, tokenization, header and
//! footer trimming, bank processing and the summary, reported step by step.

use crate::analysis::ProcessingAnalysis;
use crate::diagnostics::{Diagnostic, Diagnostics, DiagnosticsSink, Level};
use crate::error::{BankconvError, Result};
use crate::models::{ConversionResult, NormalizedTransaction, ProcessingStep, StepStatus, Summary};
use crate::profiles::{BankProfile, ProfileRegistry};
use crate::tokenizer::{detect_separator, parse_delimited};

const STEPS: [&str; 6] = [
    "Detecting separator",
    "Parsing rows",
    "Removing header rows",
    "Removing footer rows",
    "Normalizing transactions",
    "Building summary",
];

/// The step list of one run and its outcome: either a full result or one
/// error, never both.
#[derive(Debug)]
pub struct Conversion {
    pub steps: Vec<ProcessingStep>,
    pub outcome: Result<ConversionResult>,
}

impl Conversion {
    pub fn result(&self) -> Option<&ConversionResult> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<String> {
        self.outcome.as_ref().err().map(ToString::to_string)
    }

    pub fn into_result(self) -> Result<ConversionResult> {
        self.outcome
    }
}

/// Convert `text` with the built-in profile for `bank_id`.
pub fn convert(bank_id: &str, text: &str) -> Conversion {
    let registry = ProfileRegistry::builtin();
    match registry.require(bank_id) {
        Ok(profile) => convert_with(profile, text, &mut Diagnostics::new(), |_| {}),
        Err(e) => Conversion {
            steps: pending_steps(),
            outcome: Err(e),
        },
    }
}

/// Convert `text` with `profile`, passing every row diagnostic to `sink` and
/// every step transition to `on_step`.
pub fn convert_with(
    profile: &BankProfile,
    text: &str,
    sink: &mut dyn DiagnosticsSink,
    on_step: impl FnMut(&ProcessingStep),
) -> Conversion {
    log::info!("converting {} statement ({} bytes)", profile.key, text.len());
    let mut tracker = StepTracker::new(on_step);
    let mut recorder = Recorder::new(sink);
    let outcome = run(profile, text, &mut tracker, &mut recorder);

    if let Err(e) = &outcome {
        log::error!("{} conversion failed: {e}", profile.key);
        tracker.fail(e);
    }
    Conversion {
        steps: tracker.steps,
        outcome: outcome.map(|(data, summary)| ConversionResult {
            data,
            summary,
            warnings: recorder.warnings,
            errors: recorder.errors,
        }),
    }
}

fn run<F: FnMut(&ProcessingStep)>(
    profile: &BankProfile,
    text: &str,
    tracker: &mut StepTracker<F>,
    sink: &mut Recorder<'_>,
) -> Result<(Vec<NormalizedTransaction>, Summary)> {
    tracker.begin(0);
    let separator = detect_separator(text);
    tracker.complete(format!("Detected {separator:?}"));

    tracker.begin(1);
    let rows = parse_delimited(text, separator);
    tracker.complete(format!("{} rows", rows.len()));

    tracker.begin(2);
    if rows.len() <= profile.skip_rows {
        return Err(BankconvError::InsufficientData {
            expected: profile.skip_rows,
            found: rows.len(),
        });
    }
    let body = &rows[profile.skip_rows..];
    tracker.complete(format!("Skipped {} header rows", profile.skip_rows));

    tracker.begin(3);
    let footer = profile.trim_footer_rows.min(body.len());
    let data = &body[..body.len() - footer];
    tracker.complete(format!("Removed {footer} footer rows, {} data rows left", data.len()));

    tracker.begin(4);
    let transactions = profile.processor.process(data, profile, sink);
    if transactions.is_empty() {
        return Err(BankconvError::NoTransactions);
    }
    tracker.complete(format!("{} transactions", transactions.len()));

    tracker.begin(5);
    let analysis = ProcessingAnalysis::new(data.len(), transactions.len());
    if analysis.has_significant_loss() {
        sink.warn(
            None,
            format!(
                "{} of {} rows were skipped ({:.1}% converted)",
                analysis.skipped_rows,
                analysis.input_rows,
                analysis.success_rate()
            ),
        );
    }
    let summary = Summary::from_transactions(&transactions, analysis);
    tracker.complete(format!(
        "{} to {}",
        display_date(&summary.date_range.from),
        display_date(&summary.date_range.to)
    ));

    Ok((transactions, summary))
}

fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "?"
    } else {
        date
    }
}

fn pending_steps() -> Vec<ProcessingStep> {
    STEPS
        .iter()
        .enumerate()
        .map(|(i, description)| ProcessingStep::pending(i + 1, *description))
        .collect()
}

struct StepTracker<F> {
    steps: Vec<ProcessingStep>,
    current: Option<usize>,
    on_step: F,
}

impl<F: FnMut(&ProcessingStep)> StepTracker<F> {
    fn new(on_step: F) -> Self {
        Self {
            steps: pending_steps(),
            current: None,
            on_step,
        }
    }

    fn begin(&mut self, index: usize) {
        self.current = Some(index);
        self.set(index, StepStatus::Processing, None);
    }

    fn complete(&mut self, details: String) {
        if let Some(index) = self.current.take() {
            self.set(index, StepStatus::Completed, Some(details));
        }
    }

    fn fail(&mut self, error: &BankconvError) {
        if let Some(index) = self.current.take() {
            self.set(index, StepStatus::Error, Some(error.to_string()));
        }
    }

    fn set(&mut self, index: usize, status: StepStatus, details: Option<String>) {
        let step = &mut self.steps[index];
        step.status = status;
        if details.is_some() {
            step.details = details;
        }
        log::debug!("step {} {}: {}", step.step, status.label(), step.description);
        (self.on_step)(step);
    }
}

/// Forwards to the caller's sink and keeps the warning and error lines for
/// the result.
struct Recorder<'a> {
    inner: &'a mut dyn DiagnosticsSink,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl<'a> Recorder<'a> {
    fn new(inner: &'a mut dyn DiagnosticsSink) -> Self {
        Self {
            inner,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl DiagnosticsSink for Recorder<'_> {
    fn record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            Level::Warn => self.warnings.push(diagnostic.to_string()),
            Level::Error => self.errors.push(diagnostic.to_string()),
            Level::Debug | Level::Info => {}
        }
        self.inner.record(diagnostic);
    }
}
