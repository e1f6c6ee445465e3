//! HTML table rendering shared by the XLS and HTML exports

use crate::model::columns::ColumnSelection;
use crate::model::export::ExportScope;
use crate::model::report::ReportModel;
use std::fmt::Write;

pub fn identity_headers() -> [&'static str; 3] {
    ["Badge", "Name", "Department"]
}

/// Flat per-day headers honoring the export scope, e.g. "D3 Work", "D3 OT"
pub fn daily_header_titles(report: &ReportModel, scope: ExportScope) -> Vec<String> {
    let mut titles = Vec::new();
    for day in 1..=report.period.day_count() {
        if scope.includes_work() {
            titles.push(format!("D{} Work", day));
        }
        if scope.includes_overtime() {
            titles.push(format!("D{} OT", day));
        }
    }
    titles
}

/// Flat per-day values for one employee, aligned with `daily_header_titles`
pub fn daily_row_values(report: &ReportModel, employee_id: u32, scope: ExportScope) -> Vec<String> {
    let mut values = Vec::new();
    for day in 1..=report.period.day_count() {
        let cell = report.cell(employee_id, day);
        if scope.includes_work() {
            values.push(cell.work.clone());
        }
        if scope.includes_overtime() {
            values.push(cell.over);
        }
    }
    values
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn day_class(report: &ReportModel, day: u32) -> &'static str {
    if report.is_holiday(day) {
        "holiday"
    } else if report.period.is_weekend(day) {
        "weekend"
    } else {
        ""
    }
}

/// Number of per-day sub-columns the scope produces
fn day_span(scope: ExportScope) -> usize {
    scope.includes_work() as usize + scope.includes_overtime() as usize
}

/// The report grid as an HTML table with a grouped two-row header:
/// identity columns span both rows, each day spans its sub-columns, general
/// summary columns span both rows, overtime and leave columns sit under
/// group headers.
pub fn render_grid_table(
    report: &ReportModel,
    columns: &ColumnSelection,
    scope: ExportScope,
) -> String {
    let mut b = String::new();
    let (general, overtime, leave) = columns.grouped();
    let span = day_span(scope);

    b.push_str("<table class=\"grid\">\n<tr>\n");
    for title in identity_headers() {
        let _ = write!(b, "<th rowspan=\"2\">{}</th>", title);
    }
    for day in 1..=report.period.day_count() {
        let _ = write!(
            b,
            "<th class=\"{}\" colspan=\"{}\">{}<br><span class=\"wk\">{}</span></th>",
            day_class(report, day),
            span.max(1),
            day,
            report.period.weekday_short(day)
        );
    }
    for col in &general {
        let _ = write!(b, "<th class=\"sum-col\" rowspan=\"2\">{}</th>", escape(col.title));
    }
    if !overtime.is_empty() {
        let _ = write!(b, "<th class=\"sum-col\" colspan=\"{}\">Overtime</th>", overtime.len());
    }
    if !leave.is_empty() {
        let _ = write!(b, "<th class=\"sum-col\" colspan=\"{}\">Leave</th>", leave.len());
    }
    b.push_str("</tr>\n<tr>\n");
    for _ in 1..=report.period.day_count() {
        if scope.includes_work() {
            b.push_str("<th>W</th>");
        }
        if scope.includes_overtime() {
            b.push_str("<th>OT</th>");
        }
    }
    for col in overtime.iter().chain(&leave) {
        let _ = write!(b, "<th class=\"sum-col\">{}</th>", escape(col.title));
    }
    b.push_str("</tr>\n");

    for emp in &report.employees {
        b.push_str("<tr>");
        for val in [&emp.badge, &emp.name, &emp.dept_name] {
            let _ = write!(b, "<td>{}</td>", escape(val));
        }
        for day in 1..=report.period.day_count() {
            let cell = report.cell(emp.id, day);
            let wk = day_class(report, day);
            if scope.includes_work() {
                let filled = if cell.work.is_empty() { "empty" } else { "hasval" };
                let _ = write!(b, "<td class=\"work {} {}\">{}</td>", wk, filled, escape(&cell.work));
            }
            if scope.includes_overtime() {
                let filled = if cell.over.is_empty() { "empty" } else { "hasval" };
                let _ = write!(b, "<td class=\"over {} {}\">{}</td>", wk, filled, escape(&cell.over));
            }
        }
        let summary = report.summary_for(emp.id);
        for col in general.iter().chain(&overtime).chain(&leave) {
            let _ = write!(b, "<td class=\"sum-col\">{}</td>", escape(&col.value(&summary)));
        }
        b.push_str("</tr>\n");
    }

    b.push_str("</table>");
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::period::Period;
    use crate::model::report::ReportEmployee;
    use crate::model::snapshot::{AttendanceRecord, Employee, Snapshot};
    use chrono::NaiveDate;

    fn report() -> ReportModel {
        let snapshot = Snapshot {
            departments: vec![],
            employees: vec![Employee { id: 1, badge: "0001".into(), name: "Li & Co".into(), dept_id: 0 }],
            attendance: vec![AttendanceRecord {
                employee_id: 1,
                date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
                work: 8.0,
                overtime: 1.5,
                required: 8.0,
                late_mins: 0.0,
                early_mins: 0.0,
                weekday_ot: 0.0,
                weekend_ot: 0.0,
                holiday_ot: 0.0,
            }],
            leaves: vec![],
            holidays: vec![],
        };
        let employees = vec![ReportEmployee {
            id: 1,
            badge: "0001".into(),
            name: "Li & Co".into(),
            dept_name: String::new(),
        }];
        ReportModel::build(&snapshot, Period::new(2026, 8), employees)
    }

    #[test]
    fn test_daily_titles_follow_scope() {
        let r = report();
        let all = daily_header_titles(&r, ExportScope::All);
        assert_eq!(all.len(), 62);
        assert_eq!(all[0], "D1 Work");
        assert_eq!(all[1], "D1 OT");

        let work = daily_header_titles(&r, ExportScope::WorkOnly);
        assert_eq!(work.len(), 31);
        assert_eq!(work[2], "D3 Work");
    }

    #[test]
    fn test_daily_values_align_with_titles() {
        let r = report();
        let vals = daily_row_values(&r, 1, ExportScope::All);
        assert_eq!(vals.len(), 62);
        // Day 3 occupies indices 4 and 5
        assert_eq!(vals[4], "8");
        assert_eq!(vals[5], "1.5");

        let ot = daily_row_values(&r, 1, ExportScope::OvertimeOnly);
        assert_eq!(ot[2], "1.5");
    }

    #[test]
    fn test_grid_table_marks_weekend_and_escapes() {
        let r = report();
        let html = render_grid_table(&r, &ColumnSelection::default(), ExportScope::All);
        // 2026-08-01 is a Saturday
        assert!(html.contains("class=\"weekend\""));
        assert!(html.contains("Li &amp; Co"));
        assert!(html.contains("colspan=\"2\">1<br>"));
        assert!(html.contains(">Overtime</th>"));
        assert!(html.contains(">Leave</th>"));
    }

    #[test]
    fn test_grid_table_scope_drops_subcolumns() {
        let r = report();
        let html = render_grid_table(&r, &ColumnSelection::default(), ExportScope::WorkOnly);
        assert!(html.contains("colspan=\"1\""));
        assert!(!html.contains("<th>OT</th>"));
    }
}
