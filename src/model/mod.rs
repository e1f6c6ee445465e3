//! Model layer
//!
//! State and domain types:
//! - `Period` / `Snapshot` / `ReportModel` - the attendance data
//! - `ColumnSelection` - which summary columns are shown
//! - `ExportFormat` / `ExportJob` - export configuration and tracking
//! - `ModalStack` - modal overlay management

pub mod columns;
pub mod export;
pub mod modal;
pub mod period;
pub mod report;
pub mod snapshot;
pub mod ui;

// Re-export commonly used types
pub use columns::{all_columns, ColumnDef, ColumnSelection};
pub use export::{ExportFormat, ExportJob, ExportScope, ExportStatus};
pub use modal::{Modal, ModalStack};
pub use period::Period;
pub use report::{DayCell, ReportEmployee, ReportModel, Summary};
pub use snapshot::{Department, Employee, LeaveKind, Snapshot};
pub use ui::AppMode;
