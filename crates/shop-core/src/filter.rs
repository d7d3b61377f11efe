//! Operator filter state and the queries derived from it.
//!
//! The date picker produces `YYYY-MM-DD`; the backend matches rows on
//! `DD-MM-YYYY`. [`input_date_to_query`] is the single place that
//! re-serializes between the two.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::RowLimit;
use crate::errors::CoreError;

/// Calendar format produced by the operator's date input.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Calendar format the backend expects in the `date` query parameter.
pub const DATE_QUERY_FORMAT: &str = "%d-%m-%Y";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse an operator-entered `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] if the input is not a valid calendar date
/// in year-month-day order.
pub fn parse_input_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT).map_err(|_| {
        CoreError::InvalidDate {
            input: input.to_string(),
            expected: "YYYY-MM-DD",
        }
    })
}

/// Format a date the way the backend filters on it.
#[must_use]
pub fn format_query_date(date: NaiveDate) -> String {
    date.format(DATE_QUERY_FORMAT).to_string()
}

/// Re-serialize `YYYY-MM-DD` as `DD-MM-YYYY`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] if the input cannot be parsed.
pub fn input_date_to_query(input: &str) -> Result<String, CoreError> {
    parse_input_date(input).map(format_query_date)
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Date filter and row limit currently chosen by the operator.
///
/// Setters report whether the value actually changed; only a change starts a
/// new read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    date: Option<NaiveDate>,
    row_limit: RowLimit,
}

impl FilterState {
    #[must_use]
    pub const fn new(date: Option<NaiveDate>, row_limit: RowLimit) -> Self {
        Self { date, row_limit }
    }

    /// Session-start state: no date filter and the given row limit.
    #[must_use]
    pub const fn with_row_limit(row_limit: RowLimit) -> Self {
        Self::new(None, row_limit)
    }

    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[must_use]
    pub const fn row_limit(&self) -> RowLimit {
        self.row_limit
    }

    /// Replace the date filter. Returns `true` if it changed.
    pub fn set_date(&mut self, date: Option<NaiveDate>) -> bool {
        let changed = self.date != date;
        self.date = date;
        changed
    }

    /// Apply raw date-picker input. An empty string clears the filter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] and leaves the filter untouched if
    /// the input is neither empty nor a `YYYY-MM-DD` date.
    pub fn set_date_input(&mut self, input: &str) -> Result<bool, CoreError> {
        let date = if input.trim().is_empty() {
            None
        } else {
            Some(parse_input_date(input)?)
        };
        Ok(self.set_date(date))
    }

    /// Replace the row limit. Returns `true` if it changed.
    pub fn set_row_limit(&mut self, row_limit: RowLimit) -> bool {
        let changed = self.row_limit != row_limit;
        self.row_limit = row_limit;
        changed
    }

    /// The `date` query parameter, if a date is selected.
    #[must_use]
    pub fn query_date(&self) -> Option<String> {
        self.date.map(format_query_date)
    }

    #[must_use]
    pub fn inventory_query(&self) -> InventoryQuery {
        InventoryQuery {
            date: self.query_date(),
        }
    }

    #[must_use]
    pub fn transaction_query(&self) -> TransactionQuery {
        TransactionQuery {
            limit: self.row_limit.get(),
            date: self.query_date(),
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Parameters of `GET /data/inventory`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InventoryQuery {
    /// `DD-MM-YYYY`, already re-serialized.
    pub date: Option<String>,
}

impl InventoryQuery {
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        self.date
            .iter()
            .map(|date| ("date", date.clone()))
            .collect()
    }
}

/// Parameters of `GET /data/transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionQuery {
    pub limit: u32,
    /// `DD-MM-YYYY`, already re-serialized.
    pub date: Option<String>,
}

impl TransactionQuery {
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(date) = &self.date {
            params.push(("date", date.clone()));
        }
        params
    }
}

/// Parameters of `GET /data/weekly-summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyQuery {
    month: String,
    week: u8,
}

impl WeeklyQuery {
    /// Build a weekly query from a month name (any case) and a week number.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the month is not a full English
    /// month name or the week is outside `1..=4`.
    pub fn new(month: &str, week: u8) -> Result<Self, CoreError> {
        let month = MONTHS
            .iter()
            .find(|name| name.eq_ignore_ascii_case(month.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown month '{month}'")))?;
        if !(1..=4).contains(&week) {
            return Err(CoreError::Validation(format!(
                "week must be between 1 and 4, got {week}"
            )));
        }
        Ok(Self {
            month: (*month).to_string(),
            week,
        })
    }

    #[must_use]
    pub fn month(&self) -> &str {
        &self.month
    }

    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }

    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![("month", self.month.clone()), ("week", self.week.to_string())]
    }
}
