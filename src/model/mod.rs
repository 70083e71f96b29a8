//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `AppState` - the shared store every screen reads from
//! - `CatalogQuery` / `PageState` - filter, sort and pagination
//! - `Favorites` - the user's picks, fed to the match call
//! - `ModalStack` - Modal overlay management

pub mod dog;
pub mod favorites;
pub mod modal;
pub mod query;
pub mod state;
pub mod ui;

