//! Static per-bank column layouts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::DateFormat;
use crate::error::BankconvError;
use crate::processors::Processor;

/// What a processor does with a row that is only partly usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Drop rows without a valid date, or without any description or amount.
    Strict,
    /// Keep any row with data. An unparseable date stays empty and an empty
    /// description becomes `Transaction <row>`.
    Lenient,
}

impl RowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowPolicy {
    type Err = BankconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(BankconvError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub date_format: DateFormat,
    /// Rows dropped from the top (cover pages, headers).
    pub skip_rows: usize,
    /// Rows dropped from the bottom (closing balances, disclaimers).
    pub trim_footer_rows: usize,
    pub date_column: usize,
    pub description_columns: Vec<usize>,
    pub debit_column: usize,
    /// May equal `debit_column`; the amount's sign then picks the bucket.
    pub credit_column: usize,
    /// Rows with fewer fields are reported as row errors and skipped.
    pub min_columns: usize,
    pub policy: RowPolicy,
    pub processor: Processor,
}

impl BankProfile {
    pub fn shares_amount_column(&self) -> bool {
        self.debit_column == self.credit_column
    }
}

/// Immutable lookup of profiles by bank key.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<BankProfile>,
}

impl ProfileRegistry {
    /// The banks this crate knows out of the box.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                BankProfile {
                    key: "postbank",
                    name: "Postbank",
                    date_format: DateFormat::DayMonthYearDotted,
                    skip_rows: 8,
                    trim_footer_rows: 1,
                    date_column: 0,
                    description_columns: (2..=14).collect(),
                    debit_column: 15,
                    credit_column: 16,
                    min_columns: 10,
                    policy: RowPolicy::Strict,
                    processor: Processor::Postbank,
                },
                BankProfile {
                    key: "amex",
                    name: "American Express",
                    date_format: DateFormat::DayMonthYearSlash,
                    skip_rows: 1,
                    trim_footer_rows: 0,
                    date_column: 0,
                    description_columns: vec![1, 6],
                    debit_column: 4,
                    credit_column: 4,
                    min_columns: 0,
                    policy: RowPolicy::Lenient,
                    processor: Processor::Amex,
                },
                BankProfile {
                    key: "revolut",
                    name: "Revolut",
                    date_format: DateFormat::Iso,
                    skip_rows: 1,
                    trim_footer_rows: 0,
                    date_column: 2,
                    description_columns: vec![4],
                    debit_column: 5,
                    credit_column: 5,
                    min_columns: 6,
                    policy: RowPolicy::Strict,
                    processor: Processor::Revolut,
                },
                BankProfile {
                    key: "ing",
                    name: "ING Bank",
                    date_format: DateFormat::DayMonthYearDash,
                    skip_rows: 1,
                    trim_footer_rows: 0,
                    date_column: 0,
                    description_columns: vec![1, 2],
                    debit_column: 3,
                    credit_column: 4,
                    min_columns: 0,
                    policy: RowPolicy::Lenient,
                    processor: Processor::Generic,
                },
                BankProfile {
                    key: "n26",
                    name: "N26",
                    date_format: DateFormat::Iso,
                    skip_rows: 1,
                    trim_footer_rows: 0,
                    date_column: 0,
                    description_columns: vec![1, 4],
                    debit_column: 5,
                    credit_column: 5,
                    min_columns: 0,
                    policy: RowPolicy::Lenient,
                    processor: Processor::Generic,
                },
            ],
        }
    }

    /// Override row policies by bank key. Unknown keys are logged and ignored.
    pub fn with_policies(mut self, policies: &BTreeMap<String, RowPolicy>) -> Self {
        for (key, policy) in policies {
            match self.profiles.iter_mut().find(|p| p.key == key.as_str()) {
                Some(profile) => profile.policy = *policy,
                None => log::warn!("ignoring row policy for unknown bank {key:?}"),
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&BankProfile> {
        let key = key.trim().to_ascii_lowercase();
        self.profiles.iter().find(|p| p.key == key)
    }

    pub fn require(&self, key: &str) -> crate::error::Result<&BankProfile> {
        self.get(key)
            .ok_or_else(|| BankconvError::UnknownBank(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BankProfile> {
        self.profiles.iter()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.profiles.iter().map(|p| p.key).collect()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
