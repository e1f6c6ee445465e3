//! Action enum - all possible application actions
//!
//! Components emit Actions in response to events; the App processes them to
//! update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Terminal regained focus
    FocusGained,
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Period & Filters
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the report to the next month and rebuild immediately
    NextMonth,
    /// Move the report to the previous month and rebuild immediately
    PrevMonth,
    /// Same month one year later
    NextYear,
    /// Same month one year earlier
    PrevYear,
    /// Reload the snapshot from disk
    Reload,
    /// Apply a department filter; None clears it
    SetDeptFilter(Option<u32>),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Grid Navigation
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Shift the visible day window left
    DaysLeft,
    /// Shift the visible day window right
    DaysRight,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenExportDialog,
    OpenColumnPicker,
    OpenDeptFilter,
    OpenQuitDialog,
    OpenHelp,
    /// Close the top modal
    CloseModal,
    /// Confirm the top modal
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Setup Wizard
    // ─────────────────────────────────────────────────────────────────────────
    SetupConfirm,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::FocusGained => write!(f, "FocusGained"),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextMonth => write!(f, "NextMonth"),
            Action::PrevMonth => write!(f, "PrevMonth"),
            Action::NextYear => write!(f, "NextYear"),
            Action::PrevYear => write!(f, "PrevYear"),
            Action::Reload => write!(f, "Reload"),
            Action::SetDeptFilter(id) => write!(f, "SetDeptFilter({:?})", id),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::DaysLeft => write!(f, "DaysLeft"),
            Action::DaysRight => write!(f, "DaysRight"),
            Action::OpenExportDialog => write!(f, "OpenExportDialog"),
            Action::OpenColumnPicker => write!(f, "OpenColumnPicker"),
            Action::OpenDeptFilter => write!(f, "OpenDeptFilter"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::SetupConfirm => write!(f, "SetupConfirm"),
        }
    }
}
