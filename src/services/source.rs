//! Snapshot loading and employee filtering

use crate::model::report::ReportEmployee;
use crate::model::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Load and parse a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Employees matching the department filter and badge/name query, with
/// department names resolved, ordered by (department, badge)
pub fn filter_employees(
    snapshot: &Snapshot,
    dept_id: Option<u32>,
    query: &str,
) -> Vec<ReportEmployee> {
    let needle = query.trim().to_lowercase();
    let mut out: Vec<(u32, ReportEmployee)> = snapshot
        .employees
        .iter()
        .filter(|e| dept_id.map(|d| e.dept_id == d).unwrap_or(true))
        .filter(|e| {
            needle.is_empty()
                || e.badge.to_lowercase().contains(&needle)
                || e.name.to_lowercase().contains(&needle)
        })
        .map(|e| {
            (
                e.dept_id,
                ReportEmployee {
                    id: e.id,
                    badge: e.badge.clone(),
                    name: e.name.clone(),
                    dept_name: snapshot.dept_name(e.dept_id).to_string(),
                },
            )
        })
        .collect();
    out.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.badge.cmp(&b.badge)));
    out.into_iter().map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot::{Department, Employee};
    use std::io::Write;

    fn snapshot() -> Snapshot {
        Snapshot {
            departments: vec![
                Department { id: 1, name: "Assembly".into() },
                Department { id: 2, name: "Packing".into() },
            ],
            employees: vec![
                Employee { id: 10, badge: "0205".into(), name: "Zhou Yun".into(), dept_id: 2 },
                Employee { id: 11, badge: "0101".into(), name: "Li Lei".into(), dept_id: 1 },
                Employee { id: 12, badge: "0102".into(), name: "Han Mei".into(), dept_id: 1 },
            ],
            attendance: vec![],
            leaves: vec![],
            holidays: vec![],
        }
    }

    #[test]
    fn test_filter_orders_by_dept_then_badge() {
        let list = filter_employees(&snapshot(), None, "");
        let badges: Vec<&str> = list.iter().map(|e| e.badge.as_str()).collect();
        assert_eq!(badges, vec!["0101", "0102", "0205"]);
        assert_eq!(list[0].dept_name, "Assembly");
        assert_eq!(list[2].dept_name, "Packing");
    }

    #[test]
    fn test_filter_by_department() {
        let list = filter_employees(&snapshot(), Some(2), "");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Zhou Yun");
    }

    #[test]
    fn test_query_matches_badge_or_name_case_insensitive() {
        let by_badge = filter_employees(&snapshot(), None, "0102");
        assert_eq!(by_badge.len(), 1);
        assert_eq!(by_badge[0].name, "Han Mei");

        let by_name = filter_employees(&snapshot(), None, "li");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].badge, "0101");
    }

    #[test]
    fn test_query_and_dept_combine() {
        let list = filter_employees(&snapshot(), Some(1), "zhou");
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"employees": [{{"id": 1, "badge": "7", "name": "A", "dept_id": 0}}]}}"#
        )
        .unwrap();

        let snap = load_snapshot(&path).unwrap();
        assert_eq!(snap.employees.len(), 1);
    }

    #[test]
    fn test_load_snapshot_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
