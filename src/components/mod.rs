//! UI components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod columns_dialog;
pub mod dept_dialog;
pub mod export_dialog;
pub mod grid;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod loading;
pub mod quit_dialog;
pub mod setup;

pub use columns_dialog::ColumnPickerDialog;
pub use dept_dialog::DeptFilterDialog;
pub use export_dialog::ExportDialog;
pub use grid::GridComponent;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{centered_popup, contains};
pub use loading::LoadingOverlay;
pub use quit_dialog::QuitDialog;
pub use setup::SetupComponent;
