//! Calendar date helpers for version timestamps
//!
//! Mantis stores version dates as plain `YYYY-MM-DD` strings. "Today" is the local
//! calendar date of the machine running the pipeline step.

use crate::core::error::{RotateError, RotateResult};
use chrono::{Days, Local, NaiveDate};

/// Format used for every timestamp sent to the tracker
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local calendar date
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

/// `date` shifted by `days` (negative moves backwards), formatted as `YYYY-MM-DD`
pub fn add_days(date: NaiveDate, days: i64) -> RotateResult<String> {
  let shifted = if days >= 0 {
    date.checked_add_days(Days::new(days.unsigned_abs()))
  } else {
    date.checked_sub_days(Days::new(days.unsigned_abs()))
  };

  shifted
    .map(format_date)
    .ok_or_else(|| RotateError::message(format!("{} days from {} is outside the supported calendar", days, date)))
}

/// Format a date the way the tracker expects it
pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}
