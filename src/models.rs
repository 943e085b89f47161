use serde::{Deserialize, Serialize};

use crate::analysis::ProcessingAnalysis;

/// One tokenized line of a statement file. Positional; header names are not
/// retained at this layer.
pub type RawRow = Vec<String>;

/// The canonical seven-field output record.
///
/// `debit_unit` is money received and `credit_unit` is money paid out. Both
/// are non-negative magnitudes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransaction {
    /// `YYYY-MM-DD`, or empty when the source date could not be parsed.
    pub date: String,
    pub category: String,
    pub description: String,
    pub reference_no: String,
    pub qty: String,
    pub debit_unit: Option<f64>,
    pub credit_unit: Option<f64>,
}

impl NormalizedTransaction {
    pub fn new(date: String, description: String, debit: Option<f64>, credit: Option<f64>) -> Self {
        Self {
            date,
            description,
            debit_unit: debit,
            credit_unit: credit,
            ..Self::default()
        }
    }

    /// True when the record carries no date, description or amount.
    pub fn is_blank(&self) -> bool {
        self.date.is_empty()
            && self.description.is_empty()
            && self.debit_unit.is_none()
            && self.credit_unit.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_transactions: usize,
    pub total_debits: f64,
    pub total_credits: f64,
    pub date_range: DateRange,
    pub analysis: ProcessingAnalysis,
}

impl Summary {
    pub fn from_transactions(transactions: &[NormalizedTransaction], analysis: ProcessingAnalysis) -> Self {
        let total_debits = transactions.iter().filter_map(|t| t.debit_unit).sum();
        let total_credits = transactions.iter().filter_map(|t| t.credit_unit).sum();
        let dates = transactions
            .iter()
            .map(|t| t.date.as_str())
            .filter(|d| !d.is_empty());
        let from = dates.clone().min().unwrap_or("").to_string();
        let to = dates.max().unwrap_or("").to_string();
        Self {
            total_transactions: transactions.len(),
            total_debits,
            total_credits,
            date_range: DateRange { from, to },
            analysis,
        }
    }
}

/// Outcome of one successful file conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub data: Vec<NormalizedTransaction>,
    pub summary: Summary,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    pub step: usize,
    pub description: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProcessingStep {
    pub fn pending(step: usize, description: impl Into<String>) -> Self {
        Self {
            step,
            description: description.into(),
            status: StepStatus::Pending,
            details: None,
        }
    }
}
