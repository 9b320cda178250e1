//! API-specific error types.

use crate::geo::GeoError;

/// Errors that can occur while talking to the market pulse API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Server rejected the credentials or the request, with its detail message
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// HTTP transport failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Authenticated request returned a non-success status
    #[error("Request failed with status {0}")]
    Status(u16),

    /// Failed to deserialize API response
    #[error("Failed to parse API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Response parsed but lacks a field the client needs
    #[error("Incomplete API response: missing {0}")]
    IncompleteResponse(&'static str),

    /// No session token to attach to an authenticated request
    #[error("No session token available")]
    MissingToken,
}

/// Errors that can occur while fetching the current weather.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// User refused access to their location
    #[error("Location access denied: {0}")]
    PermissionDenied(String),

    /// Location could not be determined for any other reason
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// Weather request itself failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WeatherError {
    /// Classify a locator rejection by its reason text.
    ///
    pub fn from_geo(error: GeoError) -> Self {
        if error.is_denial() {
            WeatherError::PermissionDenied(error.reason)
        } else {
            WeatherError::Unavailable(error.reason)
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, WeatherError::PermissionDenied(_))
    }
}
