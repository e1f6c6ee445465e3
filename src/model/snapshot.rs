//! Snapshot data model
//!
//! A snapshot is a JSON export of the attendance database for one or more
//! months: departments, employees, per-day attendance records, leave records
//! and holidays. The app never talks to the device database directly; it
//! renders whatever the snapshot contains.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    /// Badge number as printed on the card, kept as a string to preserve
    /// leading zeros
    pub badge: String,
    pub name: String,
    #[serde(default)]
    pub dept_id: u32,
}

/// One employee-day of clocked attendance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: u32,
    pub date: NaiveDate,
    /// Hours actually worked
    pub work: f64,
    /// Overtime hours
    #[serde(default)]
    pub overtime: f64,
    /// Scheduled hours for the day; zero when unscheduled
    #[serde(default)]
    pub required: f64,
    #[serde(default)]
    pub late_mins: f64,
    #[serde(default)]
    pub early_mins: f64,
    #[serde(default)]
    pub weekday_ot: f64,
    #[serde(default)]
    pub weekend_ot: f64,
    #[serde(default)]
    pub holiday_ot: f64,
}

/// Leave categories as coded by the attendance device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveKind {
    BusinessTrip,
    Sick,
    Personal,
    HomeVisit,
    Annual,
}

impl LeaveKind {
    /// Map the device's numeric exception code; unknown codes carry no bucket
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::BusinessTrip),
            2 => Some(Self::Sick),
            3 => Some(Self::Personal),
            4 => Some(Self::HomeVisit),
            5 => Some(Self::Annual),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::BusinessTrip => "Business Trip",
            Self::Sick => "Sick Leave",
            Self::Personal => "Personal Leave",
            Self::HomeVisit => "Home Visit",
            Self::Annual => "Annual Leave",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub employee_id: u32,
    pub date: NaiveDate,
    /// Device exception code, 1..=5
    pub kind: u8,
    /// Device symbol, e.g. "1.5d annual"; the leading number is the day count
    pub symbol: String,
    /// Hour-denominated duration when the device provides one
    #[serde(default)]
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub start: NaiveDate,
    /// Number of days covered; zero is treated as one
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub name: String,
}

/// Full snapshot file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl Snapshot {
    /// Department name for an id, empty string when unknown
    pub fn dept_name(&self, dept_id: u32) -> &str {
        self.departments
            .iter()
            .find(|d| d.id == dept_id)
            .map(|d| d.name.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_kind_codes() {
        assert_eq!(LeaveKind::from_code(1), Some(LeaveKind::BusinessTrip));
        assert_eq!(LeaveKind::from_code(5), Some(LeaveKind::Annual));
        assert_eq!(LeaveKind::from_code(0), None);
        assert_eq!(LeaveKind::from_code(9), None);
    }

    #[test]
    fn test_snapshot_deserializes_with_defaults() {
        let json = r#"{
            "employees": [{"id": 1, "badge": "0007", "name": "Li Lei"}],
            "attendance": [{"employee_id": 1, "date": "2026-08-03", "work": 8.0}]
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.employees[0].badge, "0007");
        assert_eq!(snap.employees[0].dept_id, 0);
        assert_eq!(snap.attendance[0].overtime, 0.0);
        assert!(snap.departments.is_empty());
        assert_eq!(snap.dept_name(42), "");
    }
}
