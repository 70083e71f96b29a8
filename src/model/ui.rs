//! Session and view routing

/// Client-local authentication flag. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub authenticated: bool,
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Search,
    Match,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Search => "Search",
            View::Match => "Match",
        }
    }
}

/// Apply the access rules to a requested view.
///
/// - login while authenticated goes to search
/// - search or match while unauthenticated goes to login
/// - match without a matched dog goes to search
pub fn resolve_view(requested: View, session: &Session, has_match: bool) -> View {
    match (requested, session.authenticated) {
        (View::Login, true) => View::Search,
        (View::Login, false) => View::Login,
        (_, false) => View::Login,
        (View::Search, true) => View::Search,
        (View::Match, true) if has_match => View::Match,
        (View::Match, true) => View::Search,
    }
}

/// Which list on the search screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Favorites,
    #[default]
    Results,
}

impl Pane {
    pub fn other(&self) -> Pane {
        match self {
            Pane::Favorites => Pane::Results,
            Pane::Results => Pane::Favorites,
        }
    }
}
