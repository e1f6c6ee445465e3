//! Root application component
//!
//! The App coordinates the child components and owns the shared state:
//! the loaded snapshot, the derived report, the modal stack, the loading
//! overlay and the background export job. Every operation degrades to a
//! silent no-op when its target state is absent - no snapshot means period
//! changes, exports and the column picker simply do nothing.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    contains, draw_home_screen, ColumnPickerDialog, DeptFilterDialog, ExportDialog, GridComponent,
    HelpDialog, HomeComponent, HomeRenderContext, LoadingOverlay, QuitDialog, SetupComponent,
};
use crate::config::Config;
use crate::model::columns::ColumnSelection;
use crate::model::export::{ExportJob, ExportStatus};
use crate::model::modal::{Modal, ModalStack};
use crate::model::period::Period;
use crate::model::report::ReportModel;
use crate::model::snapshot::Snapshot;
use crate::model::ui::AppMode;
use crate::services::{self, ExportRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub config: Option<Config>,

    /// Loaded snapshot; None until a config points at a readable file
    pub snapshot: Option<Snapshot>,
    /// Report derived from snapshot + period + filters
    pub report: Option<ReportModel>,
    pub period: Period,
    pub dept_filter: Option<u32>,
    pub columns: ColumnSelection,

    /// Modal overlay stack
    pub modals: ModalStack,
    /// Loading indicator with timed auto-hide
    pub loading: LoadingOverlay,
    /// Background export runner and the job it is tracking
    pub export_runner: ExportRunner,
    pub export_job: Option<ExportJob>,

    pub should_quit: bool,
    pub error: Option<String>,
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub grid: GridComponent,
    pub export_dialog: ExportDialog,
    pub columns_dialog: ColumnPickerDialog,
    pub dept_dialog: DeptFilterDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub setup: SetupComponent,

    /// Frame area from the last draw, for mouse hit-testing
    last_area: Rect,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App instance, loading the config if one exists
    pub fn new() -> App {
        match Config::load() {
            Some(config) => {
                let mut app = Self::create_app(AppMode::Running);
                app.load_from_config(config);
                app
            }
            None => Self::create_app(AppMode::Setup),
        }
    }

    fn create_app(mode: AppMode) -> App {
        App {
            mode,
            config: None,
            snapshot: None,
            report: None,
            period: Period::current(),
            dept_filter: None,
            columns: ColumnSelection::default(),
            modals: ModalStack::new(),
            loading: LoadingOverlay::new(),
            export_runner: ExportRunner::new(),
            export_job: None,
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(),
            grid: GridComponent::new(),
            export_dialog: ExportDialog::default(),
            columns_dialog: ColumnPickerDialog::new(),
            dept_dialog: DeptFilterDialog::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            setup: SetupComponent::new(),
            last_area: Rect::default(),
        }
    }

    /// Load the snapshot named by `config` and derive the first report
    fn load_from_config(&mut self, config: Config) {
        let path = PathBuf::from(&config.snapshot_path);
        self.config = Some(config);
        match services::load_snapshot(&path) {
            Ok(snapshot) => {
                self.error = None;
                self.snapshot = Some(snapshot);
                self.rebuild_report();
            }
            Err(e) => {
                self.snapshot = None;
                self.report = None;
                self.error = Some(format!(
                    "Could not load snapshot:\n{:#}\n\nPress 'r' to retry.",
                    e
                ));
            }
        }
    }

    /// Re-derive the report from the current snapshot, period and filters.
    /// No-op (clearing the report) when no snapshot is loaded.
    fn rebuild_report(&mut self) {
        let Some(ref snapshot) = self.snapshot else {
            self.report = None;
            return;
        };
        let employees = services::filter_employees(snapshot, self.dept_filter, &self.home.query);
        self.report = Some(ReportModel::build(snapshot, self.period, employees));
        self.grid.row_offset = 0;
    }

    /// Submit the export described by the export dialog. The actual write
    /// runs on a background thread; the UI only shows the loading overlay
    /// and never waits for the job.
    fn submit_export(&mut self) {
        let Some(report) = self.report.clone() else {
            return;
        };
        let dir = self
            .config
            .as_ref()
            .map(|c| PathBuf::from(&c.export_dir))
            .unwrap_or_else(|| PathBuf::from("exports"));
        let format = self.export_dialog.selected_format();
        let scope = self.export_dialog.selected_scope();

        let job = self
            .export_runner
            .spawn(report, self.columns.clone(), scope, format, dir);
        self.export_job = Some(job);
        self.status_message = None;
        self.modals.pop();
        self.loading.show();
    }

    fn apply_dept_filter(&mut self, dept_id: Option<u32>) {
        if self.snapshot.is_none() {
            return;
        }
        self.dept_filter = dept_id;
        self.rebuild_report();
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ExportOptions => self.export_dialog.handle_key_event(key),
            Modal::ColumnPicker => self.columns_dialog.handle_key_event(key),
            Modal::DeptFilter => self.dept_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    /// Popup rect of the given modal; clicks outside it land on the backdrop
    fn modal_popup_area(&self, modal: &Modal, area: Rect) -> Rect {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.popup_area(area),
            Modal::ExportOptions => self.export_dialog.popup_area(area),
            Modal::ColumnPicker => self.columns_dialog.popup_area(area),
            Modal::DeptFilter => self.dept_dialog.popup_area(area),
            Modal::Help => self.help_dialog.popup_area(area),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::ExportOptions => self.export_dialog.draw(frame, area),
            Modal::ColumnPicker => self.columns_dialog.draw(frame, area),
            Modal::DeptFilter => self.dept_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Setup => self.setup.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else if self.home.search_mode {
                    self.handle_search_key_event(key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.mode != AppMode::Running {
            return Ok(None);
        }
        // A click on the backdrop (outside the dialog itself) dismisses the
        // top modal; clicks inside the dialog are left to it.
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(modal) = self.modals.top() {
                let popup = self.modal_popup_area(modal, self.last_area);
                if !contains(popup, mouse.column, mouse.row) {
                    return Ok(Some(Action::CloseModal));
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.loading.is_expired() {
                    self.loading.hide();
                }
                if let Some(mut job) = self.export_job.take() {
                    if self.export_runner.poll(&mut job) {
                        match job.status {
                            ExportStatus::Done(ref path) => {
                                self.status_message = Some(format!(
                                    "Exported {} report to {}",
                                    job.format.label(),
                                    path.display()
                                ));
                            }
                            ExportStatus::Failed(ref e) => {
                                self.status_message = Some(format!("Export failed: {}", e));
                            }
                            ExportStatus::Running => {}
                        }
                        self.export_runner.clear();
                    } else {
                        self.export_job = Some(job);
                    }
                }
            }
            Action::FocusGained => {
                // The terminal came back to the foreground; whatever was in
                // flight has either landed or will re-show the overlay itself.
                self.loading.hide();
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Period & Filters - every change re-derives the report at once
            // ─────────────────────────────────────────────────────────────────
            Action::NextMonth => {
                if self.snapshot.is_some() {
                    self.period = self.period.next_month();
                    self.rebuild_report();
                }
            }
            Action::PrevMonth => {
                if self.snapshot.is_some() {
                    self.period = self.period.prev_month();
                    self.rebuild_report();
                }
            }
            Action::NextYear => {
                if self.snapshot.is_some() {
                    self.period = self.period.next_year();
                    self.rebuild_report();
                }
            }
            Action::PrevYear => {
                if self.snapshot.is_some() {
                    self.period = self.period.prev_year();
                    self.rebuild_report();
                }
            }
            Action::Reload => {
                if let Some(config) = self.config.clone() {
                    self.load_from_config(config);
                    self.status_message = Some("Snapshot reloaded".to_string());
                }
            }
            Action::SetDeptFilter(dept_id) => {
                self.apply_dept_filter(dept_id);
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Search - input re-filters immediately
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => {
                if self.snapshot.is_some() {
                    self.home.enter_search_mode();
                }
            }
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => {
                self.home.search_input(c);
                self.rebuild_report();
            }
            Action::SearchBackspace => {
                self.home.search_backspace();
                self.rebuild_report();
            }

            // ─────────────────────────────────────────────────────────────────
            // Grid Navigation (delegate to GridComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::DaysLeft
            | Action::DaysRight => {
                self.grid.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenExportDialog => {
                if self.report.is_some() {
                    self.export_dialog.reset();
                    self.modals.push(Modal::ExportOptions);
                }
            }
            Action::OpenColumnPicker => {
                if self.report.is_some() {
                    self.columns_dialog.set_selection(&self.columns);
                    self.modals.push(Modal::ColumnPicker);
                }
            }
            Action::OpenDeptFilter => {
                if let Some(ref snapshot) = self.snapshot {
                    self.dept_dialog
                        .set_departments(&snapshot.departments, self.dept_filter);
                    self.modals.push(Modal::DeptFilter);
                }
            }
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(modal) = self.modals.top().cloned() {
                    match modal {
                        Modal::QuitConfirm => {
                            self.should_quit = true;
                        }
                        Modal::ExportOptions => {
                            self.submit_export();
                        }
                        Modal::ColumnPicker => {
                            self.columns = self.columns_dialog.selection();
                            self.modals.pop();
                            self.rebuild_report();
                            self.loading.show();
                        }
                        Modal::DeptFilter => {
                            self.apply_dept_filter(self.dept_dialog.selected_dept());
                            self.modals.pop();
                        }
                        Modal::Help => {
                            self.modals.pop();
                        }
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Setup
            // ─────────────────────────────────────────────────────────────────
            Action::SetupConfirm => {
                if let Some(config) = self.setup.get_config() {
                    self.load_from_config(config.clone());
                    self.mode = AppMode::Running;
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.last_area = area;
        match self.mode {
            AppMode::Setup => self.setup.draw(frame, area)?,
            AppMode::Running => {
                let dept_name = match (self.dept_filter, &self.snapshot) {
                    (Some(id), Some(snapshot)) => Some(snapshot.dept_name(id)),
                    _ => None,
                };
                let ctx = HomeRenderContext {
                    report: self.report.as_ref(),
                    columns: &self.columns,
                    period: self.period,
                    dept_name,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_home_screen(frame, area, &self.home, &mut self.grid, &ctx)?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }

                // Loading sits above everything, modal included
                self.loading.draw(frame, area);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::export::ExportFormat;
    use crate::model::snapshot::{AttendanceRecord, Department, Employee};
    use chrono::NaiveDate;
    use crossterm::event::{KeyModifiers, MouseButton};
    use std::time::Duration;

    fn snapshot() -> Snapshot {
        Snapshot {
            departments: vec![Department { id: 1, name: "Assembly".into() }],
            employees: vec![
                Employee { id: 1, badge: "0001".into(), name: "Li Lei".into(), dept_id: 1 },
                Employee { id: 2, badge: "0002".into(), name: "Han Mei".into(), dept_id: 1 },
            ],
            attendance: vec![AttendanceRecord {
                employee_id: 1,
                date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
                work: 8.0,
                overtime: 0.0,
                required: 8.0,
                late_mins: 0.0,
                early_mins: 0.0,
                weekday_ot: 0.0,
                weekend_ot: 0.0,
                holiday_ot: 0.0,
            }],
            leaves: vec![],
            holidays: vec![],
        }
    }

    /// A running app with a loaded snapshot and a temp export directory
    fn loaded_app(export_dir: &std::path::Path) -> App {
        let mut app = App::create_app(AppMode::Running);
        app.config = Some(Config {
            snapshot_path: String::new(),
            export_dir: export_dir.to_string_lossy().to_string(),
        });
        app.period = Period::new(2026, 8);
        app.snapshot = Some(snapshot());
        app.rebuild_report();
        app
    }

    fn bare_app() -> App {
        let mut app = App::create_app(AppMode::Running);
        app.period = Period::new(2026, 8);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_period_change_rebuilds_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        assert_eq!(app.report.as_ref().unwrap().period, Period::new(2026, 8));

        app.update(Action::NextMonth).unwrap();
        assert_eq!(app.period, Period::new(2026, 9));
        assert_eq!(app.report.as_ref().unwrap().period, Period::new(2026, 9));

        app.update(Action::PrevYear).unwrap();
        assert_eq!(app.period, Period::new(2025, 9));
    }

    #[test]
    fn test_period_change_without_snapshot_is_noop() {
        let mut app = bare_app();
        let before = app.period;
        app.update(Action::NextMonth).unwrap();
        app.update(Action::PrevMonth).unwrap();
        app.update(Action::NextYear).unwrap();
        assert_eq!(app.period, before);
        assert!(app.report.is_none());
    }

    #[test]
    fn test_open_dialogs_require_state() {
        let mut app = bare_app();
        app.update(Action::OpenExportDialog).unwrap();
        app.update(Action::OpenColumnPicker).unwrap();
        app.update(Action::OpenDeptFilter).unwrap();
        assert!(app.modals.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::OpenExportDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::ExportOptions));
    }

    #[test]
    fn test_close_modal_on_empty_stack_is_noop() {
        let mut app = bare_app();
        app.update(Action::CloseModal).unwrap();
        app.update(Action::ConfirmModal).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_export_confirm_targets_format_and_shows_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::OpenExportDialog).unwrap();
        // Move the format radio from CSV to XLS
        app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.export_dialog.selected_format(), ExportFormat::Xls);

        app.update(Action::ConfirmModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(app.loading.is_visible());
        let job = app.export_job.as_ref().unwrap();
        assert!(job.target.to_string_lossy().ends_with(".xls"));
    }

    #[test]
    fn test_export_defaults_to_csv_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::OpenExportDialog).unwrap();
        app.update(Action::ConfirmModal).unwrap();
        let job = app.export_job.as_ref().unwrap();
        assert!(job.target.to_string_lossy().ends_with(".csv"));
    }

    #[test]
    fn test_export_job_completion_reported_on_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::OpenExportDialog).unwrap();
        app.update(Action::ConfirmModal).unwrap();

        let mut reported = false;
        for _ in 0..100 {
            app.update(Action::Tick).unwrap();
            if app.export_job.is_none() {
                reported = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(reported);
        assert!(app.status_message.as_ref().unwrap().starts_with("Exported"));
    }

    #[test]
    fn test_loading_auto_hides_after_delay() {
        let mut app = bare_app();
        app.loading.show();
        app.update(Action::Tick).unwrap();
        assert!(app.loading.is_visible());

        app.loading.backdate(Duration::from_millis(2001));
        app.update(Action::Tick).unwrap();
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn test_focus_gained_hides_loading() {
        let mut app = bare_app();
        app.loading.show();
        app.update(Action::FocusGained).unwrap();
        assert!(!app.loading.is_visible());
        // Idempotent on an already-hidden overlay
        app.update(Action::FocusGained).unwrap();
        assert!(!app.loading.is_visible());
    }

    #[test]
    fn test_backdrop_click_closes_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.last_area = Rect::new(0, 0, 100, 40);
        app.update(Action::OpenExportDialog).unwrap();

        // Top-left corner is outside the centered popup
        let action = app.handle_mouse_event(click(0, 0)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));

        // A click inside the popup is not a dismissal
        let popup = app.export_dialog.popup_area(app.last_area);
        let action = app.handle_mouse_event(click(popup.x + 1, popup.y + 1)).unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn test_backdrop_click_without_modal_is_noop() {
        let mut app = bare_app();
        app.last_area = Rect::new(0, 0, 100, 40);
        let action = app.handle_mouse_event(click(0, 0)).unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn test_column_picker_apply_rebuilds_and_shows_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::OpenColumnPicker).unwrap();
        // Uncheck the first registry entry ("present")
        app.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        app.update(Action::ConfirmModal).unwrap();

        assert!(app.modals.is_empty());
        assert!(app.loading.is_visible());
        assert!(!app.columns.is_enabled("present"));
    }

    #[test]
    fn test_dept_filter_narrows_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        assert_eq!(app.report.as_ref().unwrap().employees.len(), 2);

        app.update(Action::SetDeptFilter(Some(99))).unwrap();
        assert_eq!(app.report.as_ref().unwrap().employees.len(), 0);

        app.update(Action::SetDeptFilter(None)).unwrap();
        assert_eq!(app.report.as_ref().unwrap().employees.len(), 2);
    }

    #[test]
    fn test_search_filters_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(dir.path());
        app.update(Action::EnterSearchMode).unwrap();
        app.update(Action::SearchInput('h')).unwrap();
        app.update(Action::SearchInput('a')).unwrap();
        app.update(Action::SearchInput('n')).unwrap();
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.employees.len(), 1);
        assert_eq!(report.employees[0].name, "Han Mei");

        app.update(Action::SearchBackspace).unwrap();
        app.update(Action::ExitSearchMode).unwrap();
        assert_eq!(app.report.as_ref().unwrap().employees.len(), 1);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = bare_app();
        app.update(Action::OpenQuitDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        app.update(Action::ConfirmModal).unwrap();
        assert!(app.should_quit);
    }
}
