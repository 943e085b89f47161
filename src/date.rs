use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BankconvError;

/// Source layouts a statement date column can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// `2.5.2025` or `02.05.2025`
    #[serde(rename = "D.M.YYYY")]
    DayMonthYearDotted,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYearSlash,
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYearSlash,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYearDash,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

enum Order {
    DayMonthYear,
    MonthDayYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 5] = [
        Self::DayMonthYearDotted,
        Self::DayMonthYearSlash,
        Self::MonthDayYearSlash,
        Self::DayMonthYearDash,
        Self::Iso,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            Self::DayMonthYearDotted => "D.M.YYYY",
            Self::DayMonthYearSlash => "DD/MM/YYYY",
            Self::MonthDayYearSlash => "MM/DD/YYYY",
            Self::DayMonthYearDash => "DD-MM-YYYY",
            Self::Iso => "YYYY-MM-DD",
        }
    }

    fn layout(&self) -> Option<(char, Order)> {
        match self {
            Self::DayMonthYearDotted => Some(('.', Order::DayMonthYear)),
            Self::DayMonthYearSlash => Some(('/', Order::DayMonthYear)),
            Self::MonthDayYearSlash => Some(('/', Order::MonthDayYear)),
            Self::DayMonthYearDash => Some(('-', Order::DayMonthYear)),
            Self::Iso => None,
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for DateFormat {
    type Err = BankconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D.M.YYYY" | "DD.MM.YYYY" => Ok(Self::DayMonthYearDotted),
            "DD/MM/YYYY" => Ok(Self::DayMonthYearSlash),
            "MM/DD/YYYY" => Ok(Self::MonthDayYearSlash),
            "DD-MM-YYYY" => Ok(Self::DayMonthYearDash),
            "YYYY-MM-DD" => Ok(Self::Iso),
            other => Err(BankconvError::UnknownDateFormat(other.to_string())),
        }
    }
}

/// Parse `raw` according to `format`.
///
/// Components are range-checked (day 1-31, month 1-12, year >= 1900) and the
/// result must be a real calendar day: `31/02/2025` is rejected, not rolled
/// over into March.
pub fn parse_date(raw: &str, format: DateFormat) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let Some((separator, order)) = format.layout() else {
        let day_part = s.split(['T', ' ']).next().unwrap_or(s);
        return NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
            .ok()
            .filter(|d| d.year() >= 1900);
    };

    let parts: Vec<&str> = s.split(separator).collect();
    if parts.len() != 3 {
        return None;
    }
    let a: u32 = parts[0].trim().parse().ok()?;
    let b: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    let (day, month) = match order {
        Order::DayMonthYear => (a, b),
        Order::MonthDayYear => (b, a),
    };
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year < 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert `raw` to `YYYY-MM-DD`, or an empty string when it does not parse.
pub fn convert_date(raw: &str, format: DateFormat) -> String {
    parse_date(raw, format)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
