//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod breed_filter_dialog;
pub mod help_dialog;
pub mod layout;
pub mod login;
pub mod match_view;
pub mod quit_dialog;
pub mod search;

pub use breed_filter_dialog::BreedFilterDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_search_layout, centered_popup};
pub use login::LoginComponent;
pub use match_view::MatchComponent;
pub use quit_dialog::QuitDialog;
pub use search::{draw_search_screen, SearchComponent, SearchRenderContext};
