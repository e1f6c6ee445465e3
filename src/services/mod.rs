//! External-world interactions
//!
//! - Snapshot loading and filtering
//! - Report export writers and the background export runner
//! - License verification

pub mod export;
pub mod job;
pub mod license;
pub mod render;
pub mod source;

pub use export::export_report;
pub use job::ExportRunner;
pub use license::{check as check_license, LicenseStatus};
pub use source::{filter_employees, load_snapshot};
