use fake::Dummy;
use serde::Serialize;
use std::fmt;

/// Defines a single news/market feed entry.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct MarketItem {
    pub title: String,
    pub source_name: Option<String>,
    pub url: String,
}

/// Defines the current weather for the user's position.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub condition_text: String,
    pub location_label: String,
}

/// Defines the username and password submitted by one of the forms.
///
#[derive(Clone, Dummy, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Returns new credentials with surrounding whitespace removed.
    ///
    pub fn new(username: &str, password: &str) -> Self {
        Credentials {
            username: username.trim().to_owned(),
            password: password.trim().to_owned(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
