//! Market pulse API integration.
//!
//! Authentication (login/registration) and the two data fetchers (market
//! feed and current weather). Responses are normalised into the types in
//! `resource` at this boundary; nothing here touches application state.

mod client;
mod error;
mod models;
mod resource;

pub use error::{ApiError, WeatherError};
pub use resource::*;

use crate::geo::Locator;
use client::Client;
use log::*;
use models::{ErrorModel, MarketEnvelope, TokenModel, WeatherModel};
use reqwest::Response;

pub const DEFAULT_QUERY: &str = "finance";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Responsible for asynchronous interaction with the market pulse API
/// including transformation of response data into explicitly-defined types.
///
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given API base URL.
    ///
    pub fn new(base_url: &str) -> Api {
        debug!("Initializing API client for {}...", base_url);
        Api {
            client: Client::new(base_url),
        }
    }

    /// Exchange credentials for a bearer token.
    ///
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        debug!("Requesting token for user '{}'...", credentials.username);
        let response = self
            .client
            .post_form(
                "/token",
                &[
                    ("username", credentials.username.as_str()),
                    ("password", credentials.password.as_str()),
                ],
            )
            .await?;

        if !response.status().is_success() {
            return Err(rejection(response, LOGIN_FAILED).await);
        }
        let body = response.bytes().await?;
        let model: TokenModel = serde_json::from_slice(&body)?;
        Ok(model.access_token)
    }

    /// Create a new account. The response body of a successful registration
    /// is ignored.
    ///
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        debug!("Registering user '{}'...", credentials.username);
        let response = self.client.post_json("/register", credentials).await?;

        if !response.status().is_success() {
            return Err(rejection(response, REGISTRATION_FAILED).await);
        }
        Ok(())
    }

    /// Returns the first few feed entries for the query.
    ///
    pub async fn market_data(
        &self,
        access_token: Option<&str>,
        query: &str,
    ) -> Result<Vec<MarketItem>, ApiError> {
        let access_token = access_token.ok_or(ApiError::MissingToken)?;
        debug!("Requesting market data for query '{}'...", query);
        let response = self
            .client
            .get_authorized("/market-data", access_token, &[("q", query.to_owned())])
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Market data request failed with status {}", status);
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        let envelope: MarketEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.into_items())
    }

    /// Resolve the user's position, then request the weather there. A
    /// payload without current conditions yields `Ok(None)`; one missing the
    /// condition text or location name is an error.
    ///
    pub async fn weather(
        &self,
        access_token: Option<&str>,
        locator: &dyn Locator,
    ) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let position = locator
            .current_position()
            .await
            .map_err(WeatherError::from_geo)?;
        let access_token = access_token.ok_or(ApiError::MissingToken)?;
        debug!(
            "Requesting weather for ({}, {})...",
            position.latitude, position.longitude
        );
        let response = self
            .client
            .get_authorized(
                "/weather",
                access_token,
                &[
                    ("lat", position.latitude.to_string()),
                    ("lon", position.longitude.to_string()),
                ],
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather request failed with status {}", status);
            return Err(ApiError::Status(status.as_u16()).into());
        }
        let body = response.bytes().await.map_err(ApiError::from)?;
        let model: WeatherModel = serde_json::from_slice(&body).map_err(ApiError::from)?;
        model.into_snapshot().map_err(WeatherError::from)
    }
}

/// Turn a non-success response into an `ApiError::Auth`, preferring the
/// server's detail message over the fallback.
///
async fn rejection(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorModel>(&body)
            .ok()
            .and_then(|model| model.message()),
        Err(e) => {
            warn!("Failed to read rejection body: {}", e);
            None
        }
    };
    ApiError::Auth {
        status,
        message: message.unwrap_or_else(|| fallback.to_owned()),
    }
}
