use super::error::StateError;
use super::form::AuthForm;
use super::navigation::{DashboardFocus, ViewEvent, ViewState};
use crate::api::{MarketItem, WeatherError, WeatherSnapshot, DEFAULT_QUERY};
use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::session::TokenStore;
use crate::ui::panels::{
    self, Link, NewsPanel, WeatherCard, NO_LOCATION_ACCESS, WEATHER_ERROR,
};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::collections::VecDeque;

pub const MARKET_DATA_FAILED: &str = "Failed to load market data";
pub const REGISTRATION_CONFIRMED: &str = "Registration successful! Please log in.";
pub const EMPTY_SEARCH: &str = "Enter a keyword to search.";

/// Houses data representative of application state.
///
/// The active view and everything drawn for it live here. Network results
/// are applied through the setters below; the session generation lets
/// results dispatched before a logout or a fresh login be recognised and
/// dropped.
pub struct State {
    net_sender: Option<NetworkEventSender>,
    token_store: TokenStore,
    view: ViewState,
    generation: u64,
    default_query: String,
    login_form: AuthForm,
    register_form: AuthForm,
    welcome_label: String,
    dashboard_focus: DashboardFocus,
    search_input: String,
    news: NewsPanel,
    news_list_state: ListState,
    weather: WeatherCard,
    alerts: VecDeque<String>,
    log_buffer: LogBuffer,
    log_visible: bool,
    terminal_size: Rect,
    spinner_index: usize,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            token_store: TokenStore::in_memory(),
            view: ViewState::Login,
            generation: 0,
            default_query: DEFAULT_QUERY.to_string(),
            login_form: AuthForm::default(),
            register_form: AuthForm::default(),
            welcome_label: String::new(),
            dashboard_focus: DashboardFocus::News,
            search_input: String::new(),
            news: NewsPanel::default(),
            news_list_state: ListState::default(),
            weather: WeatherCard::default(),
            alerts: VecDeque::new(),
            log_buffer: LogBuffer::default(),
            log_visible: false,
            terminal_size: Rect::default(),
            spinner_index: 0,
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        token_store: TokenStore,
        default_query: &str,
        log_buffer: LogBuffer,
        theme: Theme,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            token_store,
            default_query: default_query.to_owned(),
            log_buffer,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the active view.
    ///
    pub fn current_view(&self) -> ViewState {
        self.view
    }

    /// Return the current session generation.
    ///
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether results dispatched under `generation` still belong on screen.
    ///
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.view == ViewState::Dashboard
    }

    pub fn is_logged_in(&self) -> bool {
        self.token_store.is_logged_in()
    }

    /// Return a copy of the session token for an outgoing request.
    ///
    pub fn token(&self) -> Option<String> {
        self.token_store.get().map(str::to_owned)
    }

    /// Store a freshly issued token. A storage failure only costs
    /// persistence across restarts, so it is logged.
    ///
    pub fn save_token(&mut self, token: &str) -> &mut Self {
        if let Err(e) = self.token_store.save(token) {
            error!("Failed to persist session token: {}", e);
        }
        self
    }

    fn switch(&mut self, event: ViewEvent) -> bool {
        let previous = self.view;
        self.view = previous.transition(event);
        self.login_form.clear_error();
        self.register_form.clear_error();
        if previous != self.view {
            debug!("Switched view from {:?} to {:?}", previous, self.view);
        }
        previous != self.view
    }

    /// Show the registration form.
    ///
    pub fn show_register(&mut self) -> &mut Self {
        self.switch(ViewEvent::ShowRegister);
        self
    }

    /// Show the login form.
    ///
    pub fn show_login(&mut self) -> &mut Self {
        self.switch(ViewEvent::ShowLogin);
        self
    }

    /// Enter the dashboard for `username`, starting a new session generation
    /// and both data fetches. Does nothing when the dashboard is already up.
    ///
    pub fn show_dashboard(&mut self, username: &str) -> &mut Self {
        if !self.switch(ViewEvent::ShowDashboard) {
            return self;
        }
        self.generation += 1;
        self.welcome_label = format!("Welcome, {}!", username);
        self.login_form.clear_password();
        self.register_form.clear_password();
        self.search_input.clear();
        self.dashboard_focus = DashboardFocus::News;
        let query = self.default_query.to_owned();
        self.request_market_data(&query);
        self.request_weather();
        self
    }

    /// Leave the dashboard, forgetting the session token. Results still in
    /// flight belong to the old generation and will be dropped.
    ///
    pub fn logout(&mut self) -> &mut Self {
        if !self.switch(ViewEvent::Logout) {
            return self;
        }
        info!("Logging out...");
        self.generation += 1;
        if let Err(e) = self.token_store.clear() {
            error!("Failed to remove session token: {}", e);
        }
        self.welcome_label.clear();
        self.search_input.clear();
        self.news = NewsPanel::default();
        self.news_list_state.select(None);
        self.weather = WeatherCard::default();
        self
    }

    pub fn login_form(&self) -> &AuthForm {
        &self.login_form
    }

    pub fn login_form_mut(&mut self) -> &mut AuthForm {
        &mut self.login_form
    }

    pub fn register_form(&self) -> &AuthForm {
        &self.register_form
    }

    pub fn register_form_mut(&mut self) -> &mut AuthForm {
        &mut self.register_form
    }

    /// Return the form of the active view, if it has one.
    ///
    pub fn active_form_mut(&mut self) -> Option<&mut AuthForm> {
        match self.view {
            ViewState::Login => Some(&mut self.login_form),
            ViewState::Register => Some(&mut self.register_form),
            ViewState::Dashboard => None,
        }
    }

    /// Submit the login form unless a submission is already pending.
    ///
    pub fn submit_login(&mut self) -> &mut Self {
        if self.view != ViewState::Login || self.login_form.is_pending() {
            return self;
        }
        let credentials = self.login_form.credentials();
        self.login_form.clear_error().set_pending(true);
        self.dispatch_or_log(NetworkEvent::Login { credentials });
        self
    }

    /// Submit the registration form unless a submission is already pending.
    ///
    pub fn submit_register(&mut self) -> &mut Self {
        if self.view != ViewState::Register || self.register_form.is_pending() {
            return self;
        }
        let credentials = self.register_form.credentials();
        self.register_form.clear_error().set_pending(true);
        self.dispatch_or_log(NetworkEvent::Register { credentials });
        self
    }

    pub fn welcome_label(&self) -> &str {
        &self.welcome_label
    }

    /// Mark the news panel as loading and request the feed for `query`.
    ///
    pub fn request_market_data(&mut self, query: &str) -> &mut Self {
        self.news.set_loading();
        self.dispatch_or_log(NetworkEvent::MarketData {
            query: query.to_owned(),
            generation: self.generation,
        });
        self
    }

    /// Mark the weather card as loading and request the current weather.
    ///
    pub fn request_weather(&mut self) -> &mut Self {
        self.weather.set_loading();
        self.dispatch_or_log(NetworkEvent::Weather {
            generation: self.generation,
        });
        self
    }

    /// Render a fetched feed, selecting its first entry.
    ///
    pub fn set_market_data(&mut self, items: &[MarketItem]) -> &mut Self {
        panels::render_market_data(&mut self.news, Some(items));
        let selected = if self.news.entries.is_empty() {
            None
        } else {
            Some(0)
        };
        self.news_list_state.select(selected);
        self
    }

    /// Stop the news spinner and tell the user the feed could not be loaded.
    /// A feed already on screen is kept; an empty panel gets the placeholder.
    ///
    pub fn market_data_failed(&mut self) -> &mut Self {
        self.news.loading = false;
        if self.news.entries.is_empty() {
            panels::render_market_data(&mut self.news, None);
        }
        self.push_alert(MARKET_DATA_FAILED)
    }

    pub fn set_weather(&mut self, snapshot: Option<&WeatherSnapshot>) -> &mut Self {
        panels::render_weather(&mut self.weather, snapshot, None);
        self
    }

    /// Show a weather failure inside the card.
    ///
    pub fn weather_failed(&mut self, error: &WeatherError) -> &mut Self {
        let message = if error.is_permission_denied() {
            NO_LOCATION_ACCESS
        } else {
            WEATHER_ERROR
        };
        panels::render_weather(&mut self.weather, None, Some(message));
        self
    }

    pub fn news_panel(&self) -> &NewsPanel {
        &self.news
    }

    pub fn news_list_state(&mut self) -> &mut ListState {
        &mut self.news_list_state
    }

    pub fn weather_card(&self) -> &WeatherCard {
        &self.weather
    }

    /// Select the next news entry, wrapping around.
    ///
    pub fn next_news(&mut self) -> &mut Self {
        let count = self.news.entries.len();
        if count == 0 {
            self.news_list_state.select(None);
            return self;
        }
        let next = match self.news_list_state.selected() {
            Some(index) if index + 1 < count => index + 1,
            _ => 0,
        };
        self.news_list_state.select(Some(next));
        self
    }

    /// Select the previous news entry, wrapping around.
    ///
    pub fn previous_news(&mut self) -> &mut Self {
        let count = self.news.entries.len();
        if count == 0 {
            self.news_list_state.select(None);
            return self;
        }
        let previous = match self.news_list_state.selected() {
            Some(index) if index > 0 && index < count => index - 1,
            _ => count - 1,
        };
        self.news_list_state.select(Some(previous));
        self
    }

    /// Return the link of the selected news entry.
    ///
    pub fn selected_link(&self) -> Result<&Link, StateError> {
        self.news_list_state
            .selected()
            .and_then(|index| self.news.entries.get(index))
            .map(|entry| &entry.link)
            .ok_or(StateError::NoLinkSelected)
    }

    pub fn dashboard_focus(&self) -> DashboardFocus {
        self.dashboard_focus
    }

    pub fn focus_search(&mut self) -> &mut Self {
        self.dashboard_focus = DashboardFocus::Search;
        self
    }

    pub fn focus_news(&mut self) -> &mut Self {
        self.dashboard_focus = DashboardFocus::News;
        self
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        self.search_input.push(c);
        self
    }

    pub fn remove_search_char(&mut self) -> &mut Self {
        self.search_input.pop();
        self
    }

    /// Search the feed for the typed keyword. An empty keyword only raises
    /// an alert.
    ///
    pub fn submit_search(&mut self) -> &mut Self {
        let keyword = self.search_input.trim().to_owned();
        if keyword.is_empty() {
            return self.push_alert(EMPTY_SEARCH);
        }
        self.focus_news();
        self.request_market_data(&keyword)
    }

    /// Queue a blocking alert behind any already showing.
    ///
    pub fn push_alert(&mut self, message: &str) -> &mut Self {
        debug!("Raising alert '{}'", message);
        self.alerts.push_back(message.to_owned());
        self
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) -> &mut Self {
        self.alerts.pop_front();
        self
    }

    pub fn alerts(&self) -> &VecDeque<String> {
        &self.alerts
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    /// Return up to `count` of the newest log entries, oldest first.
    ///
    pub fn recent_log_entries(&self, count: usize) -> Vec<String> {
        match self.log_buffer.lock() {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(count);
                entries.iter().skip(skip).cloned().collect()
            }
            Err(_) => vec![],
        }
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) -> Result<(), StateError> {
        match &self.net_sender {
            Some(net_sender) => net_sender
                .send(event)
                .map_err(|_| StateError::ChannelClosed),
            None => Ok(()),
        }
    }

    fn dispatch_or_log(&self, event: NetworkEvent) {
        if let Err(err) = self.dispatch(event) {
            error!("Received error from network dispatch: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Credentials};
    use crate::ui::panels::{NO_NEWS, TEMPERATURE_PLACEHOLDER};
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
    use uuid::Uuid;

    fn state_with_channel() -> (State, UnboundedReceiver<NetworkEvent>) {
        let (tx, rx) = unbounded_channel();
        (
            State {
                net_sender: Some(tx),
                ..State::default()
            },
            rx,
        )
    }

    fn drain(rx: &mut UnboundedReceiver<NetworkEvent>) -> Vec<NetworkEvent> {
        let mut events = vec![];
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn items(count: usize) -> Vec<MarketItem> {
        (0..count).map(|_| Faker.fake::<MarketItem>()).collect()
    }

    #[test]
    fn starts_on_login() {
        let state = State::default();
        assert_eq!(state.current_view(), ViewState::Login);
        assert!(!state.is_logged_in());
    }

    #[test]
    fn every_switch_clears_both_error_slots() {
        let mut state = State::default();
        let steps = [
            ViewEvent::ShowRegister,
            ViewEvent::ShowLogin,
            ViewEvent::ShowDashboard,
            ViewEvent::ShowRegister,
            ViewEvent::ShowRegister,
            ViewEvent::ShowDashboard,
            ViewEvent::ShowLogin,
        ];
        let expected = [
            ViewState::Register,
            ViewState::Login,
            ViewState::Dashboard,
            ViewState::Register,
            ViewState::Register,
            ViewState::Dashboard,
            ViewState::Login,
        ];
        for (step, view) in steps.into_iter().zip(expected) {
            state.login_form_mut().set_error("stale login error");
            state.register_form_mut().set_error("stale register error");
            match step {
                ViewEvent::ShowRegister => state.show_register(),
                ViewEvent::ShowLogin => state.show_login(),
                ViewEvent::ShowDashboard => state.show_dashboard("alice"),
                ViewEvent::Logout => state.logout(),
            };
            assert_eq!(state.current_view(), view);
            assert_eq!(state.login_form().error(), "");
            assert_eq!(state.register_form().error(), "");
        }
    }

    #[test]
    fn show_dashboard_dispatches_both_fetches_once() {
        let (mut state, mut rx) = state_with_channel();
        state.show_dashboard("alice");

        assert_eq!(state.welcome_label(), "Welcome, alice!");
        assert!(state.news_panel().loading);
        assert!(state.weather_card().loading);
        assert_eq!(
            drain(&mut rx),
            vec![
                NetworkEvent::MarketData {
                    query: DEFAULT_QUERY.to_string(),
                    generation: 1,
                },
                NetworkEvent::Weather { generation: 1 },
            ]
        );

        state.show_dashboard("alice");
        assert!(drain(&mut rx).is_empty());
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn show_dashboard_uses_configured_query() {
        let (mut state, mut rx) = state_with_channel();
        state.default_query = "stocks".to_string();
        state.show_dashboard("User");
        assert!(matches!(
            drain(&mut rx).first(),
            Some(NetworkEvent::MarketData { query, .. }) if query == "stocks"
        ));
    }

    #[test]
    fn logout_clears_token_and_supersedes_generation() {
        let mut state = State::default();
        let token = UUIDv4.fake::<Uuid>().to_string();
        state.save_token(&token);
        state.show_dashboard("alice");
        let generation = state.generation();
        assert!(state.is_current(generation));

        state.logout();
        assert_eq!(state.current_view(), ViewState::Login);
        assert!(!state.is_logged_in());
        assert_eq!(state.token(), None);
        assert_eq!(state.welcome_label(), "");
        assert!(!state.is_current(generation));

        state.show_dashboard("alice");
        assert!(!state.is_current(generation));
        assert!(state.is_current(state.generation()));
    }

    #[test]
    fn logout_outside_dashboard_keeps_token() {
        let mut state = State::default();
        state.save_token("abc");
        state.show_register().logout();
        assert_eq!(state.current_view(), ViewState::Register);
        assert_eq!(state.token().as_deref(), Some("abc"));
    }

    #[test]
    fn submit_login_dispatches_trimmed_credentials_once() {
        let (mut state, mut rx) = state_with_channel();
        for c in " alice ".chars() {
            state.login_form_mut().push_char(c);
        }
        state.login_form_mut().toggle_field().push_char('x');
        state.submit_login();
        state.submit_login();

        assert!(state.login_form().is_pending());
        assert_eq!(
            drain(&mut rx),
            vec![NetworkEvent::Login {
                credentials: Credentials::new("alice", "x"),
            }]
        );
    }

    #[test]
    fn submit_register_only_from_register_view() {
        let (mut state, mut rx) = state_with_channel();
        state.submit_register();
        assert!(drain(&mut rx).is_empty());

        state.show_register().submit_register();
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [NetworkEvent::Register { .. }]
        ));
    }

    #[test]
    fn empty_search_raises_alert() {
        let (mut state, mut rx) = state_with_channel();
        state.show_dashboard("alice");
        drain(&mut rx);

        state.add_search_char(' ').submit_search();
        assert_eq!(state.current_alert(), Some(EMPTY_SEARCH));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn search_requests_keyword() {
        let (mut state, mut rx) = state_with_channel();
        state.show_dashboard("alice");
        drain(&mut rx);

        state.focus_search();
        for c in "bitcoin".chars() {
            state.add_search_char(c);
        }
        state.remove_search_char().add_search_char('n').submit_search();
        assert_eq!(state.dashboard_focus(), DashboardFocus::News);
        assert_eq!(
            drain(&mut rx),
            vec![NetworkEvent::MarketData {
                query: "bitcoin".to_string(),
                generation: 1,
            }]
        );
    }

    #[test]
    fn alerts_are_shown_in_order() {
        let mut state = State::default();
        assert_eq!(state.current_alert(), None);
        state.push_alert("first").push_alert("second");
        assert_eq!(state.current_alert(), Some("first"));
        state.dismiss_alert();
        assert_eq!(state.current_alert(), Some("second"));
        state.dismiss_alert().dismiss_alert();
        assert_eq!(state.current_alert(), None);
    }

    #[test]
    fn market_data_selects_first_entry() {
        let mut state = State::default();
        let items = items(3);
        state.set_market_data(&items);
        assert_eq!(state.news_list_state().selected(), Some(0));
        assert_eq!(state.selected_link().unwrap().href, items[0].url);

        state.set_market_data(&[]);
        assert_eq!(state.news_panel().placeholder.as_deref(), Some(NO_NEWS));
        assert!(matches!(
            state.selected_link(),
            Err(StateError::NoLinkSelected)
        ));
    }

    #[test]
    fn news_selection_wraps() {
        let mut state = State::default();
        state.set_market_data(&items(3));
        state.next_news().next_news();
        assert_eq!(state.news_list_state().selected(), Some(2));
        state.next_news();
        assert_eq!(state.news_list_state().selected(), Some(0));
        state.previous_news();
        assert_eq!(state.news_list_state().selected(), Some(2));
    }

    #[test]
    fn market_data_failure_raises_alert() {
        let mut state = State::default();
        state.request_market_data("finance").market_data_failed();
        assert!(!state.news_panel().loading);
        assert_eq!(state.news_panel().placeholder.as_deref(), Some(NO_NEWS));
        assert_eq!(state.current_alert(), Some(MARKET_DATA_FAILED));
    }

    #[test]
    fn failed_refresh_keeps_feed_on_screen() {
        let mut state = State::default();
        let items = items(3);
        state.set_market_data(&items).next_news();
        state.request_market_data("bitcoin");
        assert!(state.news_panel().loading);
        assert_eq!(state.news_panel().entries.len(), 3);

        state.market_data_failed();
        assert!(!state.news_panel().loading);
        assert_eq!(state.news_panel().entries.len(), 3);
        assert_eq!(state.news_panel().placeholder, None);
        assert_eq!(state.news_list_state().selected(), Some(1));
        assert_eq!(state.selected_link().unwrap().href, items[1].url);
        assert_eq!(state.current_alert(), Some(MARKET_DATA_FAILED));
    }

    #[test]
    fn weather_failures_render_inline() {
        let mut state = State::default();
        state.weather_failed(&WeatherError::PermissionDenied(
            "User denied Geolocation".to_string(),
        ));
        assert_eq!(state.weather_card().temperature, TEMPERATURE_PLACEHOLDER);
        assert_eq!(state.weather_card().condition, NO_LOCATION_ACCESS);

        state.weather_failed(&WeatherError::Api(ApiError::Status(500)));
        assert_eq!(state.weather_card().condition, WEATHER_ERROR);
        assert!(state.alerts().is_empty());
    }

    #[test]
    fn set_terminal_size() {
        let mut state = State::default();
        let size = Rect::new(0, 0, 80, 24);
        state.set_terminal_size(size);
        assert_eq!(state.terminal_size, size);
    }

    #[test]
    fn advance_spinner_index() {
        let mut state = State::default();
        state.advance_spinner_index();
        assert_eq!(*state.get_spinner_index(), 1);
        state.spinner_index = SPINNER_FRAME_COUNT - 1;
        state.advance_spinner_index();
        assert_eq!(*state.get_spinner_index(), 0);
    }

    #[test]
    fn recent_log_entries_keeps_newest() {
        let state = State::default();
        if let Ok(mut entries) = state.log_buffer.lock() {
            entries.extend(["a", "b", "c"].iter().map(|s| s.to_string()));
        }
        assert_eq!(state.recent_log_entries(2), vec!["b", "c"]);
        assert_eq!(state.recent_log_entries(10).len(), 3);
    }

    #[test]
    fn dispatch_reports_closed_channel() {
        let (state, rx) = state_with_channel();
        drop(rx);
        assert!(matches!(
            state.dispatch(NetworkEvent::Weather { generation: 0 }),
            Err(StateError::ChannelClosed)
        ));
    }
}
