use crate::api::{Api, Credentials};
use crate::geo::Locator;
use crate::state::{State, REGISTRATION_CONFIRMED};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Login { credentials: Credentials },
    Register { credentials: Credentials },
    MarketData { query: String, generation: u64 },
    Weather { generation: u64 },
}

/// Specify struct for managing state with network events.
///
/// Cheap to clone so that every event can be handled on its own task.
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    api: Api,
    locator: Arc<dyn Locator>,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &Arc<Mutex<State>>, api: Api, locator: Arc<dyn Locator>) -> Self {
        Handler {
            state: Arc::clone(state),
            api,
            locator,
        }
    }

    /// Handle network events by type. Failures end up in the state, never
    /// here.
    ///
    pub async fn handle(&self, event: Event) {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Login { credentials } => self.login(credentials).await,
            Event::Register { credentials } => self.register(credentials).await,
            Event::MarketData { query, generation } => self.market_data(query, generation).await,
            Event::Weather { generation } => self.weather(generation).await,
        }
    }

    /// Store the issued token and enter the dashboard, or show the rejection
    /// in the login form.
    ///
    async fn login(&self, credentials: Credentials) {
        info!("Logging in as '{}'...", credentials.username);
        let result = self.api.login(&credentials).await;
        let mut state = self.state.lock().await;
        state.login_form_mut().set_pending(false);
        match result {
            Ok(token) => {
                info!("Logged in as '{}'.", credentials.username);
                state.save_token(&token);
                state.show_dashboard(&credentials.username);
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                state.login_form_mut().set_error(e.to_string());
            }
        }
    }

    /// Confirm a new account and return to the login form, or show the
    /// rejection in the registration form.
    ///
    async fn register(&self, credentials: Credentials) {
        info!("Registering '{}'...", credentials.username);
        let result = self.api.register(&credentials).await;
        let mut state = self.state.lock().await;
        state.register_form_mut().set_pending(false);
        match result {
            Ok(()) => {
                info!("Registered '{}'.", credentials.username);
                state.register_form_mut().clear_password();
                state.push_alert(REGISTRATION_CONFIRMED);
                state.show_login();
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                state.register_form_mut().set_error(e.to_string());
            }
        }
    }

    /// Update state with the market feed for the query.
    ///
    async fn market_data(&self, query: String, generation: u64) {
        let token = self.state.lock().await.token();
        let result = self.api.market_data(token.as_deref(), &query).await;
        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            debug!("Dropping market data of superseded session {}", generation);
            return;
        }
        match result {
            Ok(items) => {
                info!("Loaded {} market items for '{}'.", items.len(), query);
                state.set_market_data(&items);
            }
            Err(e) => {
                error!("Failed to load market data: {}", e);
                state.market_data_failed();
            }
        }
    }

    /// Update state with the weather at the current position.
    ///
    async fn weather(&self, generation: u64) {
        let token = self.state.lock().await.token();
        let result = self.api.weather(token.as_deref(), self.locator.as_ref()).await;
        let mut state = self.state.lock().await;
        if !state.is_current(generation) {
            debug!("Dropping weather of superseded session {}", generation);
            return;
        }
        match result {
            Ok(snapshot) => {
                state.set_weather(snapshot.as_ref());
            }
            Err(e) => {
                warn!("Failed to load weather: {}", e);
                state.weather_failed(&e);
            }
        }
    }
}
