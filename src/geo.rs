//! Geolocation capability used by the weather fetcher.
//!
//! A `Locator` resolves the user's current position or rejects with a reason
//! string. Callers tell a denial apart from other failures by looking for
//! "denied" in that reason, so every implementation keeps its wording.

use crate::config::{LocationAccess, LocationConfig};
use async_trait::async_trait;
use log::*;
use serde::Deserialize;
use std::sync::Arc;

pub const DENIED_REASON: &str = "User denied Geolocation";
pub const UNSUPPORTED_REASON: &str = "Geolocation is not supported";

/// Latitude/longitude pair in decimal degrees.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Rejection of a position request.
///
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct GeoError {
    pub reason: String,
}

impl GeoError {
    pub fn new(reason: impl Into<String>) -> Self {
        GeoError {
            reason: reason.into(),
        }
    }

    /// Whether the rejection was caused by the user refusing location access.
    ///
    pub fn is_denial(&self) -> bool {
        self.reason.to_lowercase().contains("denied")
    }
}

/// Resolves the current position of the user.
///
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeoError>;
}

/// Always answers with the configured coordinates.
///
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    pub fn new(coordinates: Coordinates) -> Self {
        FixedLocator { coordinates }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Ok(self.coordinates)
    }
}

/// Location access switched off by the user.
///
pub struct DeniedLocator;

#[async_trait]
impl Locator for DeniedLocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::new(DENIED_REASON))
    }
}

/// No way to determine a position.
///
pub struct UnsupportedLocator;

#[async_trait]
impl Locator for UnsupportedLocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::new(UNSUPPORTED_REASON))
    }
}

/// Looks the position up from an IP geolocation endpoint answering with
/// `{"lat": .., "lon": ..}`.
///
pub struct IpLocator {
    lookup_url: String,
    http_client: reqwest::Client,
}

#[derive(Deserialize)]
struct IpLookupModel {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new(lookup_url: &str) -> Self {
        IpLocator {
            lookup_url: lookup_url.to_owned(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        debug!("Looking up position from {}...", self.lookup_url);
        let unavailable = |detail: String| GeoError::new(format!("Position unavailable: {}", detail));

        let response = self
            .http_client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unavailable(format!("lookup returned {}", response.status())));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        let model: IpLookupModel =
            serde_json::from_slice(&body).map_err(|e| unavailable(e.to_string()))?;
        match (model.lat, model.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(unavailable("lookup response has no coordinates".to_string())),
        }
    }
}

/// Build the locator described by the location settings.
///
pub fn locator_from_config(config: &LocationConfig) -> Arc<dyn Locator> {
    if config.access == LocationAccess::Deny {
        info!("Location access is denied by configuration.");
        return Arc::new(DeniedLocator);
    }
    if let (Some(latitude), Some(longitude)) = (config.latitude, config.longitude) {
        return Arc::new(FixedLocator::new(Coordinates {
            latitude,
            longitude,
        }));
    }
    match config.lookup_url.as_deref() {
        Some(url) if !url.is_empty() => Arc::new(IpLocator::new(url)),
        _ => {
            warn!("No coordinates or lookup URL configured; weather will be unavailable.");
            Arc::new(UnsupportedLocator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    #[test]
    fn denial_is_detected_case_insensitively() {
        assert!(GeoError::new("User denied Geolocation").is_denial());
        assert!(GeoError::new("PERMISSION DENIED").is_denial());
        assert!(!GeoError::new("Timeout expired").is_denial());
        assert!(!GeoError::new(UNSUPPORTED_REASON).is_denial());
    }

    #[tokio::test]
    async fn fixed_locator_returns_configured_position() {
        let coordinates = Coordinates {
            latitude: -23.55,
            longitude: -46.63,
        };
        let locator = FixedLocator::new(coordinates);
        assert_eq!(locator.current_position().await, Ok(coordinates));
    }

    #[tokio::test]
    async fn denied_locator_rejects_with_denial() {
        let error = DeniedLocator.current_position().await.unwrap_err();
        assert!(error.is_denial());
    }

    #[tokio::test]
    async fn ip_locator_success() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/json");
                then.status(200)
                    .json_body(json!({ "status": "success", "lat": 51.5, "lon": -0.12 }));
            })
            .await;

        let locator = IpLocator::new(&server.url("/json"));
        let position = locator.current_position().await.unwrap();
        mock.assert_async().await;
        assert_eq!(position.latitude, 51.5);
        assert_eq!(position.longitude, -0.12);
    }

    #[tokio::test]
    async fn ip_locator_failure_is_not_a_denial() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/json");
                then.status(500);
            })
            .await;

        let locator = IpLocator::new(&server.url("/json"));
        let error = locator.current_position().await.unwrap_err();
        mock.assert_async().await;
        assert!(error.reason.starts_with("Position unavailable"));
        assert!(!error.is_denial());
    }

    #[tokio::test]
    async fn locator_from_config_prefers_denial() {
        let config = LocationConfig {
            access: LocationAccess::Deny,
            latitude: Some(1.0),
            longitude: Some(2.0),
            lookup_url: None,
        };
        let error = locator_from_config(&config)
            .current_position()
            .await
            .unwrap_err();
        assert!(error.is_denial());
    }

    #[tokio::test]
    async fn locator_from_config_without_source_is_unsupported() {
        let config = LocationConfig {
            access: LocationAccess::Allow,
            latitude: None,
            longitude: None,
            lookup_url: None,
        };
        let error = locator_from_config(&config)
            .current_position()
            .await
            .unwrap_err();
        assert_eq!(error.reason, UNSUPPORTED_REASON);
    }
}
