//! Report model - the employees × days grid for one period
//!
//! Aggregates snapshot records into per-day cells and per-employee summary
//! totals. Formatting mirrors what payroll clerks expect from the legacy
//! reports: zero hours render as an empty cell, integral values drop the
//! fraction, day counts never show more than two decimals.

use crate::model::period::Period;
use crate::model::snapshot::{LeaveKind, Snapshot};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("leading-number pattern"));

/// First numeric run in a leave symbol, e.g. "1.5d annual" -> 1.5
pub fn extract_leading_number(s: &str) -> f64 {
    LEADING_NUMBER
        .find(s)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Hour values: zero hides, integral values drop the fraction
pub fn format_hours(v: f64) -> String {
    if v == 0.0 {
        return String::new();
    }
    if v == v.trunc() {
        return format!("{}", v as i64);
    }
    v.to_string()
}

/// Whole-number counts (overtime days, late minutes); zero renders as "0"
pub fn format_count(v: f64) -> String {
    format!("{:.0}", v)
}

/// Day totals: zero renders as "0", fractions longer than two decimals are
/// truncated to the whole number
pub fn format_days(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v == v.trunc() {
        return format!("{}", v as i64);
    }
    let s = v.to_string();
    if let Some(dot) = s.find('.') {
        if s.len() - dot - 1 > 2 {
            return format!("{}", v as i64);
        }
    }
    s
}

/// Formatted work/overtime values for one employee-day; empty strings mean
/// nothing was clocked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayCell {
    pub work: String,
    pub over: String,
}

/// Per-employee monthly totals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub present_days: f64,
    pub over_hours: f64,
    pub over_days: f64,
    pub late_mins: f64,
    pub early_mins: f64,
    pub weekday_ot: f64,
    pub weekend_ot: f64,
    pub holiday_ot: f64,
    pub leave_days: f64,
    pub leave_hours: f64,
    pub business_trip: f64,
    pub sick: f64,
    pub personal: f64,
    pub home_visit: f64,
    pub annual: f64,
}

/// An employee row with its department resolved
#[derive(Debug, Clone)]
pub struct ReportEmployee {
    pub id: u32,
    pub badge: String,
    pub name: String,
    pub dept_name: String,
}

/// One month of attendance for the filtered employee set
#[derive(Debug, Clone)]
pub struct ReportModel {
    pub period: Period,
    pub employees: Vec<ReportEmployee>,
    /// employee id -> day of month -> cell
    pub daily: HashMap<u32, HashMap<u32, DayCell>>,
    pub summary: HashMap<u32, Summary>,
    /// Days of the month marked as holidays
    pub holidays: Vec<bool>,
}

impl ReportModel {
    /// Aggregate the snapshot into a report for `period`, restricted to the
    /// given employees (already filtered and ordered by the caller)
    pub fn build(snapshot: &Snapshot, period: Period, employees: Vec<ReportEmployee>) -> Self {
        let first = period.first_day();
        let last = period.last_day();
        let ids: Vec<u32> = employees.iter().map(|e| e.id).collect();

        // Raw hour sums per employee-day; formatted once at the end so that
        // split shifts on one day collapse into a single cell.
        let mut raw: HashMap<u32, HashMap<u32, (f64, f64)>> = HashMap::new();
        let mut summary: HashMap<u32, Summary> = HashMap::new();

        for rec in &snapshot.attendance {
            if rec.date < first || rec.date > last || !ids.contains(&rec.employee_id) {
                continue;
            }
            let day = chrono::Datelike::day(&rec.date);
            let cell = raw
                .entry(rec.employee_id)
                .or_default()
                .entry(day)
                .or_insert((0.0, 0.0));
            cell.0 += rec.work;
            cell.1 += rec.overtime;

            let s = summary.entry(rec.employee_id).or_default();
            if rec.required > 0.0 {
                s.present_days += rec.work / rec.required;
            }
            if rec.overtime > 0.0 {
                s.over_days += 1.0;
            }
            s.over_hours += rec.overtime;
            s.late_mins += rec.late_mins;
            s.early_mins += rec.early_mins;
            s.weekday_ot += rec.weekday_ot;
            s.weekend_ot += rec.weekend_ot;
            s.holiday_ot += rec.holiday_ot;
        }

        for leave in &snapshot.leaves {
            if leave.date < first || leave.date > last || !ids.contains(&leave.employee_id) {
                continue;
            }
            let days = extract_leading_number(&leave.symbol);
            let s = summary.entry(leave.employee_id).or_default();
            s.leave_days += days;
            s.leave_hours += leave.hours.unwrap_or(0.0);
            match LeaveKind::from_code(leave.kind) {
                Some(LeaveKind::BusinessTrip) => s.business_trip += days,
                Some(LeaveKind::Sick) => s.sick += days,
                Some(LeaveKind::Personal) => s.personal += days,
                Some(LeaveKind::HomeVisit) => s.home_visit += days,
                Some(LeaveKind::Annual) => s.annual += days,
                None => {}
            }
        }

        let daily = raw
            .into_iter()
            .map(|(id, days)| {
                let cells = days
                    .into_iter()
                    .map(|(day, (work, over))| {
                        (
                            day,
                            DayCell {
                                work: format_hours(work),
                                over: format_hours(over),
                            },
                        )
                    })
                    .collect();
                (id, cells)
            })
            .collect();

        let mut holidays = vec![false; period.day_count() as usize + 1];
        for h in &snapshot.holidays {
            let span = h.days.max(1);
            for i in 0..span {
                if let Some(d) = h.start.checked_add_days(chrono::Days::new(i as u64)) {
                    if d >= first && d <= last {
                        holidays[chrono::Datelike::day(&d) as usize] = true;
                    }
                }
            }
        }

        Self {
            period,
            employees,
            daily,
            summary,
            holidays,
        }
    }

    pub fn cell(&self, employee_id: u32, day: u32) -> DayCell {
        self.daily
            .get(&employee_id)
            .and_then(|m| m.get(&day))
            .cloned()
            .unwrap_or_default()
    }

    pub fn summary_for(&self, employee_id: u32) -> Summary {
        self.summary.get(&employee_id).copied().unwrap_or_default()
    }

    pub fn is_holiday(&self, day: u32) -> bool {
        self.holidays.get(day as usize).copied().unwrap_or(false)
    }
}
