//! Export formats, scopes and job status

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Output format for a report export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain CSV, Excel-friendly via a UTF-8 BOM
    #[default]
    Csv,
    /// HTML table served with an .xls extension, the trick the legacy
    /// reports used so Excel opens it with merged headers intact
    Xls,
    /// Standalone HTML document with the styled grid
    Html,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Xls, Self::Html];

    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xls => "Excel",
            Self::Html => "HTML",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Html => "html",
        }
    }
}

/// Which per-day columns an export includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Work and overtime per day
    #[default]
    All,
    WorkOnly,
    OvertimeOnly,
}

impl ExportScope {
    pub const ALL: [Self; 3] = [Self::All, Self::WorkOnly, Self::OvertimeOnly];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Work + overtime",
            Self::WorkOnly => "Work only",
            Self::OvertimeOnly => "Overtime only",
        }
    }

    pub fn includes_work(self) -> bool {
        matches!(self, Self::All | Self::WorkOnly)
    }

    pub fn includes_overtime(self) -> bool {
        matches!(self, Self::All | Self::OvertimeOnly)
    }
}

/// Output path for an export started at `when`: the format alone decides the
/// target, e.g. att_20260806_143000.xls
pub fn export_target(dir: &Path, format: ExportFormat, when: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "att_{}.{}",
        when.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// State of the background export job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Running,
    Done(PathBuf),
    Failed(String),
}

/// A submitted export being tracked by the app
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub format: ExportFormat,
    pub target: PathBuf,
    pub status: ExportStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn when() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_default_format_is_csv() {
        assert_eq!(ExportFormat::default(), ExportFormat::Csv);
    }

    #[test]
    fn test_target_follows_format() {
        let dir = Path::new("/tmp/exports");
        let csv = export_target(dir, ExportFormat::Csv, when());
        let xls = export_target(dir, ExportFormat::Xls, when());
        let html = export_target(dir, ExportFormat::Html, when());
        assert_eq!(csv, PathBuf::from("/tmp/exports/att_20260806_143000.csv"));
        assert!(xls.to_string_lossy().ends_with(".xls"));
        assert!(html.to_string_lossy().ends_with(".html"));
    }

    #[test]
    fn test_scope_column_inclusion() {
        assert!(ExportScope::All.includes_work());
        assert!(ExportScope::All.includes_overtime());
        assert!(ExportScope::WorkOnly.includes_work());
        assert!(!ExportScope::WorkOnly.includes_overtime());
        assert!(!ExportScope::OvertimeOnly.includes_work());
        assert!(ExportScope::OvertimeOnly.includes_overtime());
    }
}
