//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App
//! processes them to update the shared state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drains finished requests
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Login
    // ─────────────────────────────────────────────────────────────────────────
    /// Submit the login form
    SubmitLogin { name: String, email: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next dog in the focused list
    NextItem,
    /// Move to previous dog in the focused list
    PrevItem,
    /// Jump to first dog
    FirstItem,
    /// Jump to last dog
    LastItem,
    /// Move focus between favorites and results
    SwitchPane,

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────
    /// Add or remove the selected dog from favorites
    ToggleFavorite,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Jump to a 1-based page
    GoToPage(usize),
    /// Re-issue the catalog fetch for the current query
    RefreshCatalog,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter & Sort
    // ─────────────────────────────────────────────────────────────────────────
    /// Open breed filter dialog
    OpenBreedFilter,
    /// Add or remove a breed from the filter
    ToggleBreed(String),
    /// Clear the breed filter
    ClearBreeds,
    /// Flip between A to Z and Z to A
    ToggleSortOrder,

    // ─────────────────────────────────────────────────────────────────────────
    // Match
    // ─────────────────────────────────────────────────────────────────────────
    /// Ask the service to pick one of the favorites
    GenerateMatch,
    /// Forget the match and return to search
    ClearMatch,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal (e.g., previous option)
    ModalUp,
    /// Navigate down in modal (e.g., next option)
    ModalDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            // Email stays out of logs
            Action::SubmitLogin { name, .. } => write!(f, "SubmitLogin({})", name),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::SwitchPane => write!(f, "SwitchPane"),
            Action::ToggleFavorite => write!(f, "ToggleFavorite"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::GoToPage(page) => write!(f, "GoToPage({})", page),
            Action::RefreshCatalog => write!(f, "RefreshCatalog"),
            Action::OpenBreedFilter => write!(f, "OpenBreedFilter"),
            Action::ToggleBreed(breed) => write!(f, "ToggleBreed({})", breed),
            Action::ClearBreeds => write!(f, "ClearBreeds"),
            Action::ToggleSortOrder => write!(f, "ToggleSortOrder"),
            Action::GenerateMatch => write!(f, "GenerateMatch"),
            Action::ClearMatch => write!(f, "ClearMatch"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
        }
    }
}
