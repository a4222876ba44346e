//! Reporting window resolution.
//!
//! The window comes from the optional start/end CLI arguments. Dates must be
//! `YYYY-MM-DD`; the shape is checked with a regex before the calendar parse
//! so `2017-1-5` and `05-01-2017` are rejected with the format named in the
//! error. An end date without a start date is refused outright since an
//! unbounded start would pull the site's entire login-event history.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use regex::Regex;

/// Window length used when no dates are given: the trailing 30 days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Resolves the window from the CLI arguments, with `today` supplied by
    /// the caller so the defaults are testable.
    ///
    /// Missing end date falls back to `today` (the caller warns about this
    /// before resolving). Missing both dates selects the trailing
    /// 30-day window ending today.
    pub fn resolve(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<Self> {
        let window = match (start, end) {
            (None, Some(_)) => anyhow::bail!(
                "End date specified but no start date (would pull too many login events)"
            ),
            (None, None) => Self {
                start: today - Duration::days(DEFAULT_WINDOW_DAYS),
                end: today,
            },
            (Some(start), None) => Self {
                start: parse_date("start date", start)?,
                end: today,
            },
            (Some(start), Some(end)) => Self {
                start: parse_date("start date", start)?,
                end: parse_date("end date", end)?,
            },
        };
        Ok(window)
    }

    /// Human-readable range, e.g. `2017-05-01 and 2017-05-31`, used in the
    /// report and in log lines that read "between {label}".
    pub fn label(&self) -> String {
        format!(
            "{} and {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }

    /// UTC midnight at the start date, bounding the event window from below.
    pub fn start_timestamp(&self) -> String {
        format!("{}T00:00:00Z", self.start.format(DATE_FORMAT))
    }

    /// UTC midnight at the end date, bounding the event window from above.
    pub fn end_timestamp(&self) -> String {
        format!("{}T00:00:00Z", self.end.format(DATE_FORMAT))
    }
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("literal date pattern compiles")
    })
}

fn parse_date(which: &str, value: &str) -> Result<NaiveDate> {
    if !date_pattern().is_match(value) {
        anyhow::bail!("{} {:?} does not match YYYY-MM-DD", which, value);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("{} {:?} is not a valid calendar date", which, value))
}

#[cfg(test)]
#[path = "date_window_tests.rs"]
mod tests;
