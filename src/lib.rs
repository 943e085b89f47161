//! Normalize bank statement exports (Postbank, American Express, Revolut, ING,
//! N26) into one seven-column, spreadsheet-ready schema.

pub mod amount;
pub mod analysis;
pub mod date;
pub mod diagnostics;
pub mod error;
pub mod fmt;
pub mod models;
pub mod pipeline;
pub mod processors;
pub mod profiles;
pub mod serializer;
pub mod settings;
pub mod tokenizer;

pub use error::{BankconvError, Result};
pub use models::{ConversionResult, NormalizedTransaction, ProcessingStep, RawRow, StepStatus, Summary};
pub use pipeline::{convert, convert_with, Conversion};
pub use profiles::{BankProfile, ProfileRegistry, RowPolicy};
pub use serializer::{serialize, write_csv};
pub use tokenizer::{detect_separator, parse_delimited};
