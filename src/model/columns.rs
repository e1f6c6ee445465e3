//! Summary column registry and selection
//!
//! The report always shows the identity columns (badge, name, department)
//! and the per-day grid; the summary columns on the right are configurable.
//! Columns render grouped: general first, then overtime, then leave.

use crate::model::report::{format_count, format_days, format_hours, Summary};
use crate::model::snapshot::LeaveKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    General,
    Overtime,
    Leave,
}

impl ColumnGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Overtime => "Overtime",
            Self::Leave => "Leave",
        }
    }
}

/// A selectable summary column
pub struct ColumnDef {
    pub key: &'static str,
    pub title: &'static str,
    pub group: ColumnGroup,
    pub default_on: bool,
    value: fn(&Summary) -> String,
}

impl ColumnDef {
    pub fn value(&self, s: &Summary) -> String {
        (self.value)(s)
    }
}

/// All summary columns in display order within their groups
pub fn all_columns() -> &'static [ColumnDef] {
    use ColumnGroup::*;
    static COLUMNS: &[ColumnDef] = &[
        ColumnDef { key: "present", title: "Present Days", group: General, default_on: true, value: |s| format_days(s.present_days) },
        ColumnDef { key: "overhours", title: "OT Hours", group: Overtime, default_on: false, value: |s| format_hours(s.over_hours) },
        ColumnDef { key: "overdays", title: "OT Days", group: General, default_on: true, value: |s| format_count(s.over_days) },
        ColumnDef { key: "weekdayot", title: "Weekday OT", group: Overtime, default_on: true, value: |s| format_hours(s.weekday_ot) },
        ColumnDef { key: "weekendot", title: "Weekend OT", group: Overtime, default_on: true, value: |s| format_hours(s.weekend_ot) },
        ColumnDef { key: "holidayot", title: "Holiday OT", group: Overtime, default_on: true, value: |s| format_hours(s.holiday_ot) },
        ColumnDef { key: "latemins", title: "Late Min", group: General, default_on: true, value: |s| format_count(s.late_mins) },
        ColumnDef { key: "earlymins", title: "Early Min", group: General, default_on: true, value: |s| format_count(s.early_mins) },
        ColumnDef { key: "leavedays", title: "Leave Days", group: Leave, default_on: true, value: |s| format_days(s.leave_days) },
        ColumnDef { key: "leavehours", title: "Leave Hours", group: Leave, default_on: false, value: |s| format_hours(s.leave_hours) },
        ColumnDef { key: "trip", title: LeaveKind::BusinessTrip.label(), group: Leave, default_on: true, value: |s| format_days(s.business_trip) },
        ColumnDef { key: "sick", title: LeaveKind::Sick.label(), group: Leave, default_on: true, value: |s| format_days(s.sick) },
        ColumnDef { key: "personal", title: LeaveKind::Personal.label(), group: Leave, default_on: true, value: |s| format_days(s.personal) },
        ColumnDef { key: "homevisit", title: LeaveKind::HomeVisit.label(), group: Leave, default_on: true, value: |s| format_days(s.home_visit) },
        ColumnDef { key: "annual", title: LeaveKind::Annual.label(), group: Leave, default_on: true, value: |s| format_days(s.annual) },
    ];
    COLUMNS
}

/// The set of enabled summary columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    enabled: Vec<&'static str>,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            enabled: all_columns()
                .iter()
                .filter(|c| c.default_on)
                .map(|c| c.key)
                .collect(),
        }
    }
}

impl ColumnSelection {
    /// Selection containing exactly the given keys; unknown keys are dropped
    pub fn from_keys<I: IntoIterator<Item = String>>(keys: I) -> Self {
        let wanted: Vec<String> = keys.into_iter().collect();
        Self {
            enabled: all_columns()
                .iter()
                .filter(|c| wanted.iter().any(|k| k == c.key))
                .map(|c| c.key)
                .collect(),
        }
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.enabled.contains(&key)
    }

    pub fn toggle(&mut self, key: &'static str) {
        if let Some(pos) = self.enabled.iter().position(|k| *k == key) {
            self.enabled.remove(pos);
        } else if all_columns().iter().any(|c| c.key == key) {
            self.enabled.push(key);
        }
    }

    /// Enabled columns split by group, in registry order
    pub fn grouped(&self) -> (Vec<&'static ColumnDef>, Vec<&'static ColumnDef>, Vec<&'static ColumnDef>) {
        let mut general = Vec::new();
        let mut overtime = Vec::new();
        let mut leave = Vec::new();
        for col in all_columns() {
            if !self.is_enabled(col.key) {
                continue;
            }
            match col.group {
                ColumnGroup::General => general.push(col),
                ColumnGroup::Overtime => overtime.push(col),
                ColumnGroup::Leave => leave.push(col),
            }
        }
        (general, overtime, leave)
    }

    /// Enabled columns in export order: general, overtime, leave
    pub fn ordered(&self) -> Vec<&'static ColumnDef> {
        let (general, overtime, leave) = self.grouped();
        general.into_iter().chain(overtime).chain(leave).collect()
    }
}
