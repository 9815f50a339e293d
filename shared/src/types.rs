//! Common types used across the platform

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{validate_month, validate_year};

/// Reporting period filter.
///
/// A month requires a year; a year alone covers the whole year; neither
/// covers every record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl Period {
    /// Build a validated period
    pub fn new(month: Option<u32>, year: Option<i32>) -> Result<Self, &'static str> {
        if let Some(m) = month {
            validate_month(m)?;
            if year.is_none() {
                return Err("A month filter requires a year");
            }
        }
        if let Some(y) = year {
            validate_year(y)?;
        }
        Ok(Self { month, year })
    }

    /// Period covering every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn month_of(year: i32, month: u32) -> Result<Self, &'static str> {
        Self::new(Some(month), Some(year))
    }

    /// Whether a timestamp falls inside the period
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        if let Some(y) = self.year {
            if at.year() != y {
                return false;
            }
        }
        if let Some(m) = self.month {
            if at.month() != m {
                return false;
            }
        }
        true
    }

    /// Human-readable label, e.g. "2024-03", "2024" or "all"
    pub fn label(&self) -> String {
        match (self.year, self.month) {
            (Some(y), Some(m)) => format!("{}-{:02}", y, m),
            (Some(y), None) => y.to_string(),
            _ => "all".to_string(),
        }
    }
}
