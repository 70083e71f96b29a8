//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the shared `AppState`, applies the view access rules and turns finished
//! requests into state changes.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_search_screen, BreedFilterDialog, HelpDialog, LoginComponent, MatchComponent,
    QuitDialog, SearchComponent, SearchRenderContext,
};
use crate::config::Config;
use crate::error::ShelterError;
use crate::model::modal::{Modal, ModalStack};
use crate::model::state::{AppState, FetchStatus, LoginStatus};
use crate::model::ui::{resolve_view, View};
use crate::services::{Reply, RequestRunner, ShelterApi};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current screen
    pub view: View,

    /// Shared state read by every screen
    pub state: AppState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background request runner
    pub runner: RequestRunner,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub login: LoginComponent,
    pub search: SearchComponent,
    pub match_view: MatchComponent,
    pub quit_dialog: QuitDialog,
    pub breed_filter_dialog: BreedFilterDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: &Config, api: Arc<dyn ShelterApi>) -> App {
        App {
            view: View::Login,
            state: AppState::new(config.default_sort_order),
            modals: ModalStack::new(),
            runner: RequestRunner::new(api),
            should_quit: false,
            error: None,
            status_message: None,
            // Components
            login: LoginComponent::new(),
            search: SearchComponent::new(),
            match_view: MatchComponent::new(),
            quit_dialog: QuitDialog::default(),
            breed_filter_dialog: BreedFilterDialog::new(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Switch screens, applying the access rules.
    ///
    /// Entering search from another screen mounts it: the breed catalog and
    /// the current catalog page are fetched.
    pub fn navigate(&mut self, requested: View) {
        let resolved = resolve_view(
            requested,
            &self.state.session,
            self.state.matched.is_some(),
        );
        if resolved != requested {
            tracing::debug!(
                requested = requested.name(),
                resolved = resolved.name(),
                "redirected"
            );
        }

        if resolved == self.view {
            return;
        }

        tracing::debug!(from = self.view.name(), to = resolved.name(), "changing view");
        self.modals.clear();
        self.view = resolved;

        if resolved == View::Search {
            self.mount_search();
        }
    }

    fn mount_search(&mut self) {
        self.state.breeds = FetchStatus::Loading;
        self.runner.spawn_breeds();
        self.fetch_catalog();
    }

    /// Issue a catalog fetch for the current query
    fn fetch_catalog(&mut self) {
        self.state.catalog = FetchStatus::Loading;
        let ticket = self.runner.spawn_catalog(self.state.query.clone());
        tracing::debug!(
            generation = ticket.generation,
            page = self.state.query.current_page,
            sort = self.state.query.sort_order.as_str(),
            breeds = self.state.query.selected_breeds.len(),
            "fetching catalog"
        );
    }

    fn generate_match(&mut self) {
        if self.state.favorites.is_empty() {
            self.status_message = Some("Add some favorites to generate a match".to_string());
            return;
        }
        if self.state.match_pending {
            return;
        }

        self.error = None;
        self.state.match_pending = true;
        self.runner.spawn_match(self.state.favorites.ids());
    }

    /// Apply a finished request to the shared state
    fn apply_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Login(Ok(())) => {
                if self.state.set_authenticated() {
                    tracing::info!("login succeeded");
                }
                self.navigate(View::Search);
            }
            Reply::Login(Err(e)) => {
                tracing::warn!(error = %e, "login failed");
                self.state.login = LoginStatus::Failed(ShelterError::Auth.to_string());
            }
            Reply::Breeds(Ok(breeds)) => {
                tracing::debug!(count = breeds.len(), "breeds loaded");
                self.state.breeds = FetchStatus::Ready(breeds);
            }
            Reply::Breeds(Err(e)) => {
                tracing::warn!(error = %e, "breed fetch failed");
                self.state.breeds = FetchStatus::Failed(ShelterError::fetch(&e).to_string());
            }
            Reply::Catalog(Ok(page)) => {
                tracing::debug!(page = page.page, total = page.total, "catalog loaded");
                if self.state.apply_search_page(page) {
                    tracing::debug!(
                        page = self.state.query.current_page,
                        "requested page out of range, fetching last page"
                    );
                    self.fetch_catalog();
                } else {
                    self.search.clamp_selection(&self.state);
                }
            }
            Reply::Catalog(Err(e)) => {
                tracing::warn!(error = %e, "catalog fetch failed");
                self.state.catalog = FetchStatus::Failed(ShelterError::fetch(&e).to_string());
            }
            Reply::Match(result) => {
                self.state.match_pending = false;
                let matched = match result {
                    Ok(id) => self
                        .state
                        .favorites
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| ShelterError::unknown_match(&id)),
                    Err(e) => {
                        tracing::error!(error = %e, "match request failed");
                        Err(ShelterError::matching(&e))
                    }
                };

                match matched {
                    Ok(dog) => {
                        tracing::info!(id = %dog.id, name = %dog.name, "matched");
                        self.state.set_matched(dog);
                        self.navigate(View::Match);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "could not resolve match");
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::BreedFilter => self.breed_filter_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => {
                self.quit_dialog.set_favorite_count(self.state.favorites.len());
                self.quit_dialog.draw(frame, area)?;
            }
            Modal::BreedFilter => {
                self.breed_filter_dialog.sync(&self.state);
                self.breed_filter_dialog.draw(frame, area)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // Notices last until the next key press
        self.status_message = None;

        if let Some(modal) = self.modals.top().copied() {
            return self.handle_modal_key_event(modal, key);
        }

        match self.view {
            View::Login => self.login.handle_key_event(key),
            View::Search => self.search.handle_key_event(key),
            View::Match => self.match_view.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::trace!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                for reply in self.runner.poll() {
                    self.apply_reply(reply);
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Login
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitLogin { name, email } => {
                if !self.state.login.is_submitting() {
                    tracing::info!(%name, "submitting login");
                    self.state.login = LoginStatus::Submitting;
                    self.runner.spawn_login(name, email);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to SearchComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.search.next(&self.state),
            Action::PrevItem => self.search.previous(&self.state),
            Action::FirstItem => self.search.select_first(&self.state),
            Action::LastItem => self.search.select_last(&self.state),
            Action::SwitchPane => self.search.switch_pane(&self.state),

            // ─────────────────────────────────────────────────────────────────
            // Catalog
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleFavorite => {
                if let Some(dog) = self.search.selected_dog(&self.state).cloned() {
                    let added = self.state.toggle_favorite(&dog);
                    self.status_message = Some(if added {
                        format!("Added {} to favorites", dog.name)
                    } else {
                        format!("Removed {} from favorites", dog.name)
                    });
                    self.search.clamp_selection(&self.state);
                }
            }
            Action::NextPage => {
                if self.state.next_page() {
                    self.fetch_catalog();
                }
            }
            Action::PrevPage => {
                if self.state.prev_page() {
                    self.fetch_catalog();
                }
            }
            Action::FirstPage => {
                if self.state.first_page() {
                    self.fetch_catalog();
                }
            }
            Action::LastPage => {
                if self.state.last_page() {
                    self.fetch_catalog();
                }
            }
            Action::GoToPage(page) => {
                if self.state.go_to_page(page) {
                    self.fetch_catalog();
                }
            }
            Action::RefreshCatalog => {
                if self.state.breeds.error().is_some() {
                    self.state.breeds = FetchStatus::Loading;
                    self.runner.spawn_breeds();
                }
                self.fetch_catalog();
            }

            // ─────────────────────────────────────────────────────────────────
            // Filter & Sort
            // ─────────────────────────────────────────────────────────────────
            Action::OpenBreedFilter => {
                self.breed_filter_dialog.reset();
                self.modals.push(Modal::BreedFilter);
            }
            Action::ToggleBreed(breed) => {
                self.state.toggle_breed(&breed);
                self.fetch_catalog();
            }
            Action::ClearBreeds => {
                if self.state.clear_breeds() {
                    self.fetch_catalog();
                }
            }
            Action::ToggleSortOrder => {
                self.state.toggle_sort_order();
                self.fetch_catalog();
            }

            // ─────────────────────────────────────────────────────────────────
            // Match
            // ─────────────────────────────────────────────────────────────────
            Action::GenerateMatch => self.generate_match(),
            Action::ClearMatch => {
                self.state.clear_match();
                self.navigate(View::Search);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
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
                if self.modals.top() == Some(&Modal::QuitConfirm) {
                    self.should_quit = true;
                }
            }
            // Cursor movement is local to the dialog
            Action::ModalUp | Action::ModalDown => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.view {
            View::Login => {
                self.login.set_status(&self.state.login);
                self.login.draw(frame, area)?;
            }
            View::Search => {
                let ctx = SearchRenderContext {
                    state: &self.state,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_search_screen(frame, area, &mut self.search, &ctx)?;
            }
            View::Match => {
                self.match_view.set_dog(self.state.matched.as_ref());
                self.match_view.draw(frame, area)?;
            }
        }

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().copied() {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::endpoint;
    use crate::model::dog::Dog;
    use crate::model::query::SortOrder;
    use crate::services::api::fake::{dog, ApiCall, FakeShelterApi};
    use std::time::Duration;

    fn app_with(api: FakeShelterApi) -> (App, Arc<FakeShelterApi>) {
        let api = Arc::new(api);
        let config = Config {
            default_sort_order: SortOrder::Desc,
            ..Config::default()
        };
        let app = App::new(&config, api.clone());
        (app, api)
    }

    /// Apply replies until no request is in flight; replies may issue more
    fn settle(app: &mut App) {
        for _ in 0..10 {
            for reply in app.runner.wait(Duration::from_secs(5)) {
                app.apply_reply(reply);
            }
            if app.runner.in_flight() == 0 {
                return;
            }
        }
        panic!("requests never settled");
    }

    fn logged_in(api: FakeShelterApi) -> (App, Arc<FakeShelterApi>) {
        let (mut app, api) = app_with(api);
        app.update(Action::SubmitLogin {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .unwrap();
        settle(&mut app);
        (app, api)
    }

    fn numbered_dogs(count: usize) -> Vec<Dog> {
        (0..count)
            .map(|i| dog(&format!("d{:02}", i), &format!("Dog {}", i), "Boxer"))
            .collect()
    }

    fn last_search(api: &FakeShelterApi) -> Option<crate::services::api::SearchParams> {
        api.calls().into_iter().rev().find_map(|call| match call {
            ApiCall::Search(params) => Some(params),
            _ => None,
        })
    }

    fn count(api: &FakeShelterApi, pred: impl Fn(&ApiCall) -> bool) -> usize {
        api.calls().iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_login_transitions_once_and_mounts_search() {
        let (mut app, api) = app_with(FakeShelterApi::new(numbered_dogs(3)));
        let submit = Action::SubmitLogin {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        app.update(submit.clone()).unwrap();
        // Resubmission is ignored while the first request is in flight
        app.update(submit).unwrap();
        assert!(app.state.login.is_submitting());
        settle(&mut app);

        assert!(app.state.session.authenticated);
        assert_eq!(app.view, View::Search);
        assert_eq!(app.state.login, LoginStatus::Idle);
        assert_eq!(count(&api, |c| matches!(c, ApiCall::Login { .. })), 1);
        assert_eq!(count(&api, |c| matches!(c, ApiCall::Breeds)), 1);
        assert_eq!(app.state.breeds.ready().map(|b| b.len()), Some(1));
        assert_eq!(app.state.visible_results().len(), 3);
    }

    #[test]
    fn test_login_failure_keeps_session_closed() {
        let mut api = FakeShelterApi::new(Vec::new());
        api.accept_login = false;
        let (app, _) = logged_in(api);

        assert!(!app.state.session.authenticated);
        assert_eq!(app.view, View::Login);
        assert_eq!(
            app.state.login.error(),
            Some("Login failed. Please check your name and email.")
        );
    }

    #[test]
    fn test_protected_views_redirect_to_login() {
        let (mut app, api) = app_with(FakeShelterApi::new(Vec::new()));
        app.navigate(View::Search);
        assert_eq!(app.view, View::Login);
        app.navigate(View::Match);
        assert_eq!(app.view, View::Login);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_match_view_without_match_redirects_to_search() {
        let (mut app, _) = logged_in(FakeShelterApi::new(numbered_dogs(2)));
        app.navigate(View::Match);
        assert_eq!(app.view, View::Search);
        assert!(app.state.matched.is_none());

        app.navigate(View::Login);
        assert_eq!(app.view, View::Search);
    }

    #[test]
    fn test_total_30_gives_two_pages_and_second_page_offset() {
        let (mut app, api) = logged_in(FakeShelterApi::new(numbered_dogs(30)));

        let first = last_search(&api).unwrap();
        assert!(first.breeds.is_empty());
        assert_eq!(first.sort, SortOrder::Desc);
        assert_eq!(first.from, 0);
        assert_eq!(app.state.page.total_pages, 2);
        assert_eq!(app.state.page.total_results, 30);

        app.update(Action::NextPage).unwrap();
        settle(&mut app);
        assert_eq!(last_search(&api).unwrap().from, 25);
        assert_eq!(app.state.page.current_page, 2);
        assert_eq!(app.state.visible_results().len(), 5);

        // Already on the last page: no new fetch
        let searches = count(&api, |c| matches!(c, ApiCall::Search(_)));
        app.update(Action::NextPage).unwrap();
        assert_eq!(count(&api, |c| matches!(c, ApiCall::Search(_))), searches);
    }

    #[test]
    fn test_results_never_contain_favorites() {
        let (mut app, _) = logged_in(FakeShelterApi::new(numbered_dogs(4)));
        let first = app.search.selected_dog(&app.state).cloned().unwrap();

        app.update(Action::ToggleFavorite).unwrap();
        assert!(app.state.favorites.contains(&first.id));
        assert!(app.state.visible_results().iter().all(|d| d.id != first.id));
        assert_eq!(app.state.visible_results().len(), 3);

        // Removing it from the favorites pane puts it back in the grid
        app.update(Action::SwitchPane).unwrap();
        app.update(Action::ToggleFavorite).unwrap();
        assert!(app.state.favorites.is_empty());
        assert_eq!(app.state.visible_results().len(), 4);
    }

    #[test]
    fn test_generate_match_without_favorites_makes_no_call() {
        let (mut app, api) = logged_in(FakeShelterApi::new(numbered_dogs(2)));
        app.update(Action::GenerateMatch).unwrap();

        assert_eq!(app.runner.in_flight(), 0);
        assert_eq!(count(&api, |c| matches!(c, ApiCall::Match(_))), 0);
        assert!(app.state.matched.is_none());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_match_resolves_against_favorites() {
        let mut api = FakeShelterApi::new(vec![
            dog("a", "Rex", "Beagle"),
            dog("b", "Fido", "Collie"),
        ]);
        api.match_id = Some("a".to_string());
        let (mut app, api) = logged_in(api);

        // Sorted Z to A, so Fido comes first
        app.update(Action::ToggleFavorite).unwrap();
        app.update(Action::ToggleFavorite).unwrap();
        assert_eq!(app.state.favorites.ids(), vec!["b", "a"]);

        app.update(Action::GenerateMatch).unwrap();
        assert!(app.state.match_pending);
        settle(&mut app);

        assert!(!app.state.match_pending);
        assert_eq!(app.view, View::Match);
        assert_eq!(app.state.matched.as_ref().map(|d| d.name.as_str()), Some("Rex"));
        assert!(api
            .calls()
            .contains(&ApiCall::Match(vec!["b".to_string(), "a".to_string()])));
    }

    #[test]
    fn test_clear_match_returns_to_search() {
        let (mut app, api) = logged_in(FakeShelterApi::new(numbered_dogs(2)));
        app.update(Action::ToggleFavorite).unwrap();
        app.update(Action::GenerateMatch).unwrap();
        settle(&mut app);
        assert_eq!(app.view, View::Match);

        let breed_calls = count(&api, |c| matches!(c, ApiCall::Breeds));
        app.update(Action::ClearMatch).unwrap();
        settle(&mut app);

        assert_eq!(app.view, View::Search);
        assert!(app.state.matched.is_none());
        // Coming back to search is a fresh mount
        assert_eq!(count(&api, |c| matches!(c, ApiCall::Breeds)), breed_calls + 1);
    }

    #[test]
    fn test_unknown_match_id_is_surfaced() {
        let mut api = FakeShelterApi::new(numbered_dogs(2));
        api.match_id = Some("stranger".to_string());
        let (mut app, _) = logged_in(api);
        app.update(Action::ToggleFavorite).unwrap();
        app.update(Action::GenerateMatch).unwrap();
        settle(&mut app);

        assert_eq!(app.view, View::Search);
        assert!(app.state.matched.is_none());
        let error = app.error.as_deref().unwrap();
        assert!(error.starts_with("Could not generate a match"));
        assert!(error.contains("stranger"));
    }

    #[test]
    fn test_match_failure_is_surfaced() {
        let mut api = FakeShelterApi::new(numbered_dogs(2));
        api.failing.push(endpoint::MATCH);
        let (mut app, _) = logged_in(api);
        app.update(Action::ToggleFavorite).unwrap();
        app.update(Action::GenerateMatch).unwrap();
        settle(&mut app);

        assert!(app.state.matched.is_none());
        assert!(app.error.as_deref().unwrap().contains("HTTP 500"));
    }

    #[test]
    fn test_filter_and_sort_changes_reset_to_first_page() {
        let (mut app, api) = logged_in(FakeShelterApi::new(numbered_dogs(60)));
        app.update(Action::GoToPage(3)).unwrap();
        settle(&mut app);
        assert_eq!(last_search(&api).unwrap().from, 50);

        app.update(Action::ToggleBreed("Boxer".to_string())).unwrap();
        settle(&mut app);
        let params = last_search(&api).unwrap();
        assert_eq!(params.from, 0);
        assert_eq!(params.breeds, vec!["Boxer".to_string()]);

        app.update(Action::GoToPage(2)).unwrap();
        app.update(Action::ToggleSortOrder).unwrap();
        settle(&mut app);
        let params = last_search(&api).unwrap();
        assert_eq!(params.from, 0);
        assert_eq!(params.sort, SortOrder::Asc);
        assert_eq!(app.state.page.current_page, 1);
    }

    #[test]
    fn test_catalog_failure_leaves_breeds_alone() {
        let mut api = FakeShelterApi::new(numbered_dogs(3));
        api.failing.push(endpoint::SEARCH);
        let (app, _) = logged_in(api);

        assert_eq!(app.state.catalog.error(), Some("Failed to fetch dog IDs"));
        assert!(app.state.visible_results().is_empty());
        assert!(app.state.breeds.ready().is_some());
    }

    #[test]
    fn test_breed_failure_leaves_catalog_alone() {
        let mut api = FakeShelterApi::new(numbered_dogs(3));
        api.failing.push(endpoint::BREEDS);
        let (app, _) = logged_in(api);

        assert_eq!(app.state.breeds.error(), Some("Failed to fetch breeds"));
        assert_eq!(app.state.visible_results().len(), 3);
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let (mut app, _) = app_with(FakeShelterApi::new(Vec::new()));
        app.update(Action::OpenQuitDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        assert!(!app.should_quit);

        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());

        app.update(Action::OpenQuitDialog).unwrap();
        app.update(Action::ConfirmModal).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let (mut app, _) = app_with(FakeShelterApi::new(Vec::new()));
        app.update(Action::OpenHelp).unwrap();
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }
}
