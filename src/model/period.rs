//! Report period - a (year, month) pair and its calendar shape

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// The month a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    /// 1-based month, always in 1..=12
    pub month: u32,
}

impl Period {
    /// Period for the current local month
    pub fn current() -> Self {
        let now = Local::now().date_naive();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// First calendar day of the period
    pub fn first_day(&self) -> NaiveDate {
        // Month is clamped at construction, so this only fails for years
        // outside chrono's range.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last calendar day of the period
    pub fn last_day(&self) -> NaiveDate {
        let (ny, nm) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_else(|| self.first_day())
    }

    /// Number of days in the month
    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Date of the given 1-based day, clamped into the month
    pub fn date(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.day_count());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.first_day())
    }

    /// Whether the given day falls on a Saturday or Sunday
    pub fn is_weekend(&self, day: u32) -> bool {
        matches!(self.date(day).weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Two-letter weekday name for the given day
    pub fn weekday_short(&self, day: u32) -> &'static str {
        match self.date(day).weekday() {
            Weekday::Sun => "Su",
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
        }
    }

    pub fn next_month(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev_month(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next_year(&self) -> Self {
        Self::new(self.year + 1, self.month)
    }

    pub fn prev_year(&self) -> Self {
        Self::new(self.year - 1, self.month)
    }

    /// Display label, e.g. "2026-08"
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
