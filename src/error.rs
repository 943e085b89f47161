use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankconvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown bank: {0}")]
    UnknownBank(String),

    #[error("Unknown date format: {0}")]
    UnknownDateFormat(String),

    #[error("Unknown row policy: {0} (expected strict or lenient)")]
    UnknownPolicy(String),

    #[error("File has insufficient data. Expected more than {expected} rows, got {found}")]
    InsufficientData { expected: usize, found: usize },

    #[error("No valid transactions found in the file")]
    NoTransactions,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BankconvError>;

/// A fault confined to a single statement row. Recorded and skipped; never
/// aborts a conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("too few columns ({found}, need at least {required})")]
    TooFewColumns { found: usize, required: usize },
}
