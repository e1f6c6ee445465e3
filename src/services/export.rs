//! Report export writers
//!
//! Each writer produces the same artifact the legacy download endpoints
//! served: CSV with a UTF-8 BOM so Excel detects the encoding, an HTML table
//! behind an .xls extension, or a standalone HTML document.

use crate::model::columns::ColumnSelection;
use crate::model::export::{export_target, ExportFormat, ExportScope};
use crate::model::report::ReportModel;
use crate::services::render::{
    daily_header_titles, daily_row_values, identity_headers, render_grid_table,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

/// UTF-8 byte order mark, written first so Excel opens the files correctly
const BOM: &[u8] = b"\xEF\xBB\xBF";

const HTML_STYLE: &str = "table{border-collapse:collapse}td,th{border:1px solid #999;\
padding:4px;font-size:12px;text-align:center}th{background:#f1f5f9}\
tr:nth-child(even){background:#f9fafb}.weekend{background:#fef3c7}\
.holiday{background:#fde2e2}";

pub fn write_csv(
    w: &mut dyn Write,
    report: &ReportModel,
    columns: &ColumnSelection,
    scope: ExportScope,
) -> Result<()> {
    w.write_all(BOM)?;
    let mut csv = csv::Writer::from_writer(w);

    let mut header: Vec<String> = identity_headers().iter().map(|s| s.to_string()).collect();
    header.extend(daily_header_titles(report, scope));
    for col in columns.ordered() {
        header.push(col.title.to_string());
    }
    csv.write_record(&header)?;

    for emp in &report.employees {
        let mut row = vec![emp.badge.clone(), emp.name.clone(), emp.dept_name.clone()];
        row.extend(daily_row_values(report, emp.id, scope));
        let summary = report.summary_for(emp.id);
        for col in columns.ordered() {
            row.push(col.value(&summary));
        }
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_xls(
    w: &mut dyn Write,
    report: &ReportModel,
    columns: &ColumnSelection,
    scope: ExportScope,
) -> Result<()> {
    w.write_all(BOM)?;
    write!(
        w,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>att {}</title></head><body>",
        report.period.label()
    )?;
    w.write_all(render_grid_table(report, columns, scope).as_bytes())?;
    write!(w, "</body></html>")?;
    Ok(())
}

pub fn write_html(
    w: &mut dyn Write,
    report: &ReportModel,
    columns: &ColumnSelection,
    scope: ExportScope,
) -> Result<()> {
    write!(
        w,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Attendance {}</title>\
         <style>{}</style></head><body>",
        report.period.label(),
        HTML_STYLE
    )?;
    w.write_all(render_grid_table(report, columns, scope).as_bytes())?;
    write!(w, "</body></html>")?;
    Ok(())
}

/// Write the report to `dir` in the given format; the target file name is
/// derived from the format and timestamp alone
pub fn export_report(
    report: &ReportModel,
    columns: &ColumnSelection,
    scope: ExportScope,
    format: ExportFormat,
    dir: &Path,
    when: DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let target = export_target(dir, format, when);
    let mut file = std::fs::File::create(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    match format {
        ExportFormat::Csv => write_csv(&mut file, report, columns, scope)?,
        ExportFormat::Xls => write_xls(&mut file, report, columns, scope)?,
        ExportFormat::Html => write_html(&mut file, report, columns, scope)?,
    }
    Ok(target)
}
