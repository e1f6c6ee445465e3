//! Background export runner
//!
//! Writing an export is handed to a worker thread so the UI keeps ticking;
//! the app polls for the outcome on each tick. Submitting is fire-and-forget:
//! nothing in the UI waits on or cancels a running export.

use crate::model::columns::ColumnSelection;
use crate::model::export::{ExportFormat, ExportJob, ExportScope, ExportStatus};
use crate::model::report::ReportModel;
use crate::services::export::export_report;
use chrono::Local;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

enum ExportMessage {
    Done(PathBuf),
    Error(String),
}

/// Runs one export at a time on a background thread
pub struct ExportRunner {
    receiver: Option<Receiver<ExportMessage>>,
}

impl Default for ExportRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportRunner {
    pub fn new() -> Self {
        Self { receiver: None }
    }

    /// Spawn an export of the given report and return its tracking state
    pub fn spawn(
        &mut self,
        report: ReportModel,
        columns: ColumnSelection,
        scope: ExportScope,
        format: ExportFormat,
        dir: PathBuf,
    ) -> ExportJob {
        let when = Local::now();
        let target = crate::model::export::export_target(&dir, format, when);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let msg = match export_report(&report, &columns, scope, format, &dir, when) {
                Ok(path) => ExportMessage::Done(path),
                Err(e) => ExportMessage::Error(e.to_string()),
            };
            let _ = tx.send(msg);
        });

        self.receiver = Some(rx);
        ExportJob {
            format,
            target,
            status: ExportStatus::Running,
        }
    }

    /// Poll the running export, updating `job` in place; returns true when
    /// the job reached a terminal state this call
    pub fn poll(&mut self, job: &mut ExportJob) -> bool {
        let Some(ref rx) = self.receiver else {
            return false;
        };
        match rx.try_recv() {
            Ok(ExportMessage::Done(path)) => {
                job.status = ExportStatus::Done(path);
                self.receiver = None;
                true
            }
            Ok(ExportMessage::Error(err)) => {
                job.status = ExportStatus::Failed(err);
                self.receiver = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                if job.status == ExportStatus::Running {
                    job.status = ExportStatus::Failed("export worker exited".to_string());
                }
                self.receiver = None;
                true
            }
        }
    }

    /// Drop tracking of the current job
    pub fn clear(&mut self) {
        self.receiver = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::period::Period;
    use crate::model::report::ReportEmployee;
    use crate::model::snapshot::{Employee, Snapshot};
    use std::time::Duration;

    fn report() -> ReportModel {
        let snapshot = Snapshot {
            departments: vec![],
            employees: vec![Employee { id: 1, badge: "1".into(), name: "A".into(), dept_id: 0 }],
            attendance: vec![],
            leaves: vec![],
            holidays: vec![],
        };
        let employees = vec![ReportEmployee {
            id: 1,
            badge: "1".into(),
            name: "A".into(),
            dept_name: String::new(),
        }];
        ReportModel::build(&snapshot, Period::new(2026, 8), employees)
    }

    #[test]
    fn test_spawn_and_poll_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ExportRunner::new();
        let mut job = runner.spawn(
            report(),
            ColumnSelection::default(),
            ExportScope::All,
            ExportFormat::Csv,
            dir.path().to_path_buf(),
        );
        assert_eq!(job.status, ExportStatus::Running);
        assert!(job.target.to_string_lossy().ends_with(".csv"));

        let mut done = false;
        for _ in 0..100 {
            if runner.poll(&mut job) {
                done = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(done);
        match job.status {
            ExportStatus::Done(ref path) => assert!(path.exists()),
            ref other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_poll_without_job_is_noop() {
        let mut runner = ExportRunner::new();
        let mut job = ExportJob {
            format: ExportFormat::Csv,
            target: PathBuf::from("x.csv"),
            status: ExportStatus::Running,
        };
        assert!(!runner.poll(&mut job));
        assert_eq!(job.status, ExportStatus::Running);
    }
}
