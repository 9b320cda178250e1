//! View models of the dashboard panels and the renderers that fill them.
//!
//! The renderers are pure with respect to their input: they clear the panel
//! and rebuild it from the data they are given, so rendering the same data
//! twice leaves the panel unchanged. Drawing the panels onto the terminal is
//! handled separately in `ui::render`.

use crate::api::{MarketItem, WeatherSnapshot};

pub const NO_NEWS: &str = "No news available.";
pub const READ_MORE: &str = "Read more";
pub const UNKNOWN_SOURCE: &str = "Unknown";
pub const TEMPERATURE_PLACEHOLDER: &str = "--";
pub const DATA_UNAVAILABLE: &str = "Data unavailable";
pub const NO_LOCATION_ACCESS: &str = "No location access";
pub const WEATHER_ERROR: &str = "Error retrieving weather";

/// Where a link opens when followed.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// In the system browser, outside the client.
    NewContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
    pub target: LinkTarget,
}

/// One rendered feed entry: bold title, source line and external link.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsEntry {
    pub title: String,
    pub source_line: String,
    pub link: Link,
}

/// Contents of the news list.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsPanel {
    pub entries: Vec<NewsEntry>,
    pub placeholder: Option<String>,
    pub loading: bool,
}

impl NewsPanel {
    /// Mark the panel as waiting for data. The current entries stay on
    /// screen until a result replaces them.
    ///
    pub fn set_loading(&mut self) {
        self.loading = true;
    }
}

/// Contents of the weather card.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeatherCard {
    pub temperature: String,
    pub condition: String,
    pub location: String,
    pub loading: bool,
}

impl WeatherCard {
    /// Clear the card and mark it as waiting for data.
    ///
    pub fn set_loading(&mut self) {
        self.temperature.clear();
        self.condition.clear();
        self.location.clear();
        self.loading = true;
    }
}

/// Replace the news list with the given items. Absent or empty data renders
/// a single placeholder instead of an empty list.
///
pub fn render_market_data(panel: &mut NewsPanel, items: Option<&[MarketItem]>) {
    panel.entries.clear();
    panel.placeholder = None;
    panel.loading = false;

    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => {
            panel.placeholder = Some(NO_NEWS.to_string());
            return;
        }
    };

    panel.entries = items
        .iter()
        .map(|item| NewsEntry {
            title: item.title.to_owned(),
            source_line: format!(
                "Source: {}",
                item.source_name.as_deref().unwrap_or(UNKNOWN_SOURCE)
            ),
            link: Link {
                label: READ_MORE.to_string(),
                href: item.url.to_owned(),
                target: LinkTarget::NewContext,
            },
        })
        .collect();
}

/// Fill the weather card. An error message, or missing data, shows the
/// placeholder temperature with the message (or a generic one) in place of
/// the condition.
///
pub fn render_weather(
    card: &mut WeatherCard,
    snapshot: Option<&WeatherSnapshot>,
    error_message: Option<&str>,
) {
    card.loading = false;
    match (snapshot, error_message) {
        (Some(snapshot), None) => {
            card.temperature = format!("{}°C", snapshot.temperature_c);
            card.condition = snapshot.condition_text.to_owned();
            card.location = snapshot.location_label.to_owned();
        }
        (_, message) => {
            card.temperature = TEMPERATURE_PLACEHOLDER.to_string();
            card.condition = message.unwrap_or(DATA_UNAVAILABLE).to_string();
            card.location.clear();
        }
    }
}
