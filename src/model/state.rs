//! Application state store
//!
//! One owned object holds every piece of state shared between screens.
//! Components borrow from it while drawing and request changes through
//! `Action`s; the mutation methods below are the only entry points.

use super::dog::Dog;
use super::favorites::Favorites;
use super::query::{CatalogQuery, PageState, SortOrder};
use super::ui::Session;

/// Progress of a remote fetch backing part of a view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchStatus::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State of the login form submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStatus {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

impl LoginStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginStatus::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoginStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of the two-phase catalog fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Page the fetch was issued for
    pub page: usize,
    /// Total matching dogs across all pages
    pub total: usize,
    pub dogs: Vec<Dog>,
}

/// All shared application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub query: CatalogQuery,
    pub page: PageState,
    /// Dogs on the current page, favorites included
    pub catalog: FetchStatus<Vec<Dog>>,
    pub breeds: FetchStatus<Vec<String>>,
    pub favorites: Favorites,
    pub matched: Option<Dog>,
    pub login: LoginStatus,
    /// A match request is in flight
    pub match_pending: bool,
}

impl AppState {
    pub fn new(sort_order: SortOrder) -> Self {
        Self {
            query: CatalogQuery::new(sort_order),
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark the session authenticated. Returns true on the transition.
    pub fn set_authenticated(&mut self) -> bool {
        let changed = !self.session.authenticated;
        self.session.authenticated = true;
        self.login = LoginStatus::Idle;
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter & Sort
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle a breed in the filter and go back to the first page
    pub fn toggle_breed(&mut self, breed: &str) {
        self.query.toggle_breed(breed);
        self.query.current_page = 1;
    }

    /// Returns true if a filter was active
    pub fn clear_breeds(&mut self) -> bool {
        if self.query.selected_breeds.is_empty() {
            return false;
        }
        self.query.selected_breeds.clear();
        self.query.current_page = 1;
        true
    }

    /// Returns true if the order changed
    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        if self.query.sort_order == order {
            return false;
        }
        self.query.sort_order = order;
        self.query.current_page = 1;
        true
    }

    pub fn toggle_sort_order(&mut self) {
        let order = self.query.sort_order.toggled();
        self.set_sort_order(order);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to `page` if it is a different, valid page. Returns true if moved.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.page.last_page() || page == self.query.current_page {
            return false;
        }
        self.query.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.query.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.query.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.page.last_page())
    }

    /// Record a successful catalog fetch.
    ///
    /// Returns true when the requested page lies beyond the last page; the
    /// query is then moved to the last page and the caller must fetch again.
    pub fn apply_search_page(&mut self, result: CatalogPage) -> bool {
        let page = PageState::new(result.page, result.total);
        if result.page > page.last_page() {
            self.query.current_page = page.last_page();
            self.page = PageState::new(self.query.current_page, result.total);
            return true;
        }
        self.page = page;
        self.catalog = FetchStatus::Ready(result.dogs);
        false
    }

    /// Dogs on the current page that are not favorites
    pub fn visible_results(&self) -> Vec<&Dog> {
        match self.catalog.ready() {
            Some(dogs) => dogs
                .iter()
                .filter(|d| !self.favorites.contains(&d.id))
                .collect(),
            None => Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Favorites & Match
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_favorite(&mut self, dog: &Dog) -> bool {
        self.favorites.toggle(dog)
    }

    pub fn set_matched(&mut self, dog: Dog) {
        self.matched = Some(dog);
    }

    pub fn clear_match(&mut self) {
        self.matched = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str, breed: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: format!("dog-{}", id),
            age: 2,
            zip_code: "02139".to_string(),
            breed: breed.to_string(),
        }
    }

    fn ready_state(total: usize, ids: &[&str]) -> AppState {
        let mut state = AppState::new(SortOrder::Asc);
        state.apply_search_page(CatalogPage {
            page: 1,
            total,
            dogs: ids.iter().map(|id| dog(id, "Pug")).collect(),
        });
        state
    }

    #[test]
    fn test_set_authenticated_transitions_once() {
        let mut state = AppState::default();
        state.login = LoginStatus::Submitting;
        assert!(state.set_authenticated());
        assert!(state.session.authenticated);
        assert_eq!(state.login, LoginStatus::Idle);
        assert!(!state.set_authenticated());
    }

    #[test]
    fn test_visible_results_exclude_favorites() {
        let mut state = ready_state(3, &["a", "b", "c"]);
        state.toggle_favorite(&dog("b", "Pug"));

        let ids: Vec<&str> = state.visible_results().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        state.toggle_favorite(&dog("b", "Pug"));
        assert_eq!(state.visible_results().len(), 3);
    }

    #[test]
    fn test_visible_results_empty_while_loading() {
        let mut state = ready_state(3, &["a"]);
        state.catalog = FetchStatus::Loading;
        assert!(state.visible_results().is_empty());
    }

    #[test]
    fn test_filter_and_sort_changes_reset_page() {
        let mut state = ready_state(100, &["a"]);
        assert!(state.go_to_page(3));
        state.toggle_breed("Pug");
        assert_eq!(state.query.current_page, 1);

        assert!(state.go_to_page(2));
        state.toggle_sort_order();
        assert_eq!(state.query.sort_order, SortOrder::Desc);
        assert_eq!(state.query.current_page, 1);

        assert!(state.go_to_page(4));
        assert!(state.clear_breeds());
        assert_eq!(state.query.current_page, 1);
        assert!(!state.clear_breeds());
    }

    #[test]
    fn test_set_same_sort_order_is_noop() {
        let mut state = ready_state(100, &["a"]);
        state.go_to_page(2);
        assert!(!state.set_sort_order(SortOrder::Asc));
        assert_eq!(state.query.current_page, 2);
    }

    #[test]
    fn test_page_navigation_stays_in_range() {
        let mut state = ready_state(60, &["a"]);
        assert_eq!(state.page.total_pages, 3);
        assert!(!state.prev_page());
        assert!(state.next_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.query.current_page, 3);
        assert!(state.first_page());
        assert!(state.last_page());
        assert!(!state.go_to_page(0));
        assert!(!state.go_to_page(4));
    }

    #[test]
    fn test_apply_search_page_recomputes_pages() {
        let mut state = AppState::new(SortOrder::Desc);
        state.catalog = FetchStatus::Loading;
        let refetch = state.apply_search_page(CatalogPage {
            page: 1,
            total: 30,
            dogs: vec![dog("a", "Pug")],
        });
        assert!(!refetch);
        assert_eq!(state.page.total_pages, 2);
        assert_eq!(state.page.total_results, 30);
        assert!(state.catalog.ready().is_some());
    }

    #[test]
    fn test_apply_search_page_clamps_out_of_range_page() {
        let mut state = ready_state(100, &["a"]);
        state.go_to_page(4);
        state.catalog = FetchStatus::Loading;

        // Fewer results arrived than expected, page 4 no longer exists
        let refetch = state.apply_search_page(CatalogPage {
            page: 4,
            total: 30,
            dogs: Vec::new(),
        });
        assert!(refetch);
        assert_eq!(state.query.current_page, 2);
        assert!(state.catalog.is_loading());
    }

    #[test]
    fn test_match_set_and_clear() {
        let mut state = AppState::default();
        state.set_matched(dog("a", "Pug"));
        assert_eq!(state.matched.as_ref().map(|d| d.id.as_str()), Some("a"));
        state.clear_match();
        assert!(state.matched.is_none());
    }
}
