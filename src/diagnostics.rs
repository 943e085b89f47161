//! Structured row-by-row diagnostics.
//!
//! Processors report what they skip or could not parse through a
//! [`DiagnosticsSink`]. [`Diagnostics`] keeps the events in a list and mirrors
//! them to the `log` facade.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    /// 1-based row in the tokenized file, when the event concerns one row.
    pub row: Option<usize>,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "Row {row}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub trait DiagnosticsSink {
    fn record(&mut self, diagnostic: Diagnostic);

    fn debug(&mut self, row: Option<usize>, message: String) {
        self.record(Diagnostic { level: Level::Debug, row, message });
    }

    fn info(&mut self, row: Option<usize>, message: String) {
        self.record(Diagnostic { level: Level::Info, row, message });
    }

    fn warn(&mut self, row: Option<usize>, message: String) {
        self.record(Diagnostic { level: Level::Warn, row, message });
    }

    fn error(&mut self, row: Option<usize>, message: String) {
        self.record(Diagnostic { level: Level::Error, row, message });
    }
}

/// Collecting sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter(move |d| d.level == level)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at_level(Level::Warn).map(ToString::to_string).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.at_level(Level::Error).map(ToString::to_string).collect()
    }
}

impl DiagnosticsSink for Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        let level: log::Level = diagnostic.level.into();
        log::log!(level, "{diagnostic}");
        self.events.push(diagnostic);
    }
}
