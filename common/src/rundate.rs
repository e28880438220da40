//! Reference date of a scraping run.
//!
//! Every adapter works "as of" one day: either the one given on the command line (re-running
//! history) or today.  Format selection and some conditional extraction depend on it.
//!

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::trace;

/// ISO format used everywhere for days.
const ISO: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum ErrRunDate {
    #[error("bad date: {0}")]
    BadDate(String),
}

/// The day a run is scraping for.
///
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct RunDate {
    date: NaiveDate,
    /// Was the date given explicitly or is it "today"
    explicit: bool,
}

impl RunDate {
    /// Today (UTC)
    ///
    pub fn today() -> Self {
        RunDate {
            date: Utc::now().date_naive(),
            explicit: false,
        }
    }

    /// Use the given date if any, today otherwise.
    ///
    pub fn or_today(date: Option<&str>) -> Result<Self, ErrRunDate> {
        match date {
            Some(date) => RunDate::parse(date),
            None => Ok(RunDate::today()),
        }
    }

    /// Parse a date, `YYYY-MM-DD` first then anything `dateparser` understands.
    ///
    #[tracing::instrument]
    pub fn parse(date: &str) -> Result<Self, ErrRunDate> {
        let date = date.trim();
        let day = match NaiveDate::parse_from_str(date, ISO) {
            Ok(day) => day,
            Err(_) => match dateparser::parse(date) {
                Ok(dt) => dt.date_naive(),
                Err(_) => return Err(ErrRunDate::BadDate(date.to_string())),
            },
        };
        trace!("run date = {day}");
        Ok(RunDate {
            date: day,
            explicit: true,
        })
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Is the run date strictly after `threshold` (`YYYY-MM-DD`)?
    ///
    pub fn is_after(&self, threshold: &str) -> Result<bool, ErrRunDate> {
        let threshold = NaiveDate::parse_from_str(threshold, ISO)
            .map_err(|_| ErrRunDate::BadDate(threshold.to_string()))?;
        Ok(self.date > threshold)
    }

    /// `YYYY-MM-DD`
    ///
    #[inline]
    pub fn iso(&self) -> String {
        iso_date(self.date)
    }
}

impl From<NaiveDate> for RunDate {
    fn from(date: NaiveDate) -> Self {
        RunDate {
            date,
            explicit: true,
        }
    }
}

impl FromStr for RunDate {
    type Err = ErrRunDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunDate::parse(s)
    }
}

impl Display for RunDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iso())
    }
}

/// Format a day as `YYYY-MM-DD`.
///
#[inline]
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO).to_string()
}
