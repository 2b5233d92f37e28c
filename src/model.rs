//! Flat per-day contribution records and the caller-side date range.

use chrono::{Months, NaiveDate};

use crate::error::{SkylineError, SkylineResult};

/// Days in a calendar week; the series is chunked by this.
pub const DAYS_PER_WEEK: usize = 7;

/// Longest span the caller may request: `to` must fall before the same
/// calendar day this many months after `from`.
pub const MAX_RANGE_MONTHS: u32 = 12;

/// One calendar day of activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Quartile bucket 0..=4 as assigned by the API
    pub level: u8,
}

/// Map the API's symbolic quartile to 0..=4. Anything unrecognised is 0.
pub fn contribution_level(symbol: &str) -> u8 {
    match symbol {
        "NONE" => 0,
        "FIRST_QUARTILE" => 1,
        "SECOND_QUARTILE" => 2,
        "THIRD_QUARTILE" => 3,
        "FOURTH_QUARTILE" => 4,
        _ => 0,
    }
}

/// Days in API order: weeks chronologically, Sunday first within a week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionSeries {
    pub days: Vec<ContributionDay>,
    /// `totalContributions` as reported by the calendar
    pub total_contributions: u32,
}

impl ContributionSeries {
    pub fn new(days: Vec<ContributionDay>, total_contributions: u32) -> Self {
        Self {
            days,
            total_contributions,
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Consecutive groups of seven. The last group may be short.
    pub fn weeks(&self) -> std::slice::Chunks<'_, ContributionDay> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    pub fn week_count(&self) -> usize {
        self.days.len().div_ceil(DAYS_PER_WEEK)
    }

    pub fn max_count(&self) -> u32 {
        self.days.iter().map(|d| d.count).max().unwrap_or(0)
    }

    /// The busiest day, earliest one on ties.
    pub fn busiest_day(&self) -> Option<&ContributionDay> {
        self.days
            .iter()
            .fold(None, |best: Option<&ContributionDay>, d| match best {
                Some(b) if b.count >= d.count => Some(b),
                _ => Some(d),
            })
    }
}

/// Inclusive calendar range for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> SkylineResult<Self> {
        if from > to {
            return Err(SkylineError::InvalidRange(format!(
                "{} is after {}",
                from, to
            )));
        }
        let within_year = from
            .checked_add_months(Months::new(MAX_RANGE_MONTHS))
            .map_or(true, |limit| to < limit);
        if !within_year {
            return Err(SkylineError::InvalidRange(format!(
                "{} .. {} spans more than one year",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// Parse two `YYYY-MM-DD` strings.
    pub fn parse(from: &str, to: &str) -> SkylineResult<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|e| SkylineError::InvalidRange(format!("{:?}: {}", s, e)))
        };
        Self::new(parse(from)?, parse(to)?)
    }

    /// The year ending on `today`.
    pub fn trailing_year(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_signed(chrono::Duration::days(364))
            .unwrap_or(today);
        Self { from, to: today }
    }
}
