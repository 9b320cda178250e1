//! Wire formats of the market pulse API and their normalisation into the
//! crate's resource types.

use super::error::ApiError;
use super::resource::{MarketItem, WeatherSnapshot};
use serde::Deserialize;

/// Maximum number of feed entries kept from a market-data response.
///
pub const MARKET_ITEM_LIMIT: usize = 6;

/// Body of a successful `POST /token`.
///
#[derive(Debug, Deserialize)]
pub(crate) struct TokenModel {
    pub access_token: String,
}

/// Body of a rejected request. `detail` is usually a string but validation
/// failures send a list, so keep it untyped until it is inspected.
///
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorModel {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorModel {
    /// Return the detail message if the server sent a non-empty string.
    ///
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(message)) if !message.is_empty() => {
                Some(message.to_owned())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketEnvelope {
    #[serde(default)]
    pub data: Option<Vec<ArticleModel>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleModel {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<SourceModel>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceModel {
    #[serde(default)]
    pub name: Option<String>,
}

impl MarketEnvelope {
    /// Normalise the envelope into at most `MARKET_ITEM_LIMIT` items. A
    /// missing or null `data` field yields an empty list.
    ///
    pub fn into_items(self) -> Vec<MarketItem> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .take(MARKET_ITEM_LIMIT)
            .map(|article| MarketItem {
                title: article.title.unwrap_or_default(),
                source_name: article
                    .source
                    .and_then(|s| s.name)
                    .filter(|name| !name.is_empty()),
                url: article.url.unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherModel {
    #[serde(default)]
    pub current: Option<CurrentModel>,
    #[serde(default)]
    pub location: Option<LocationModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentModel {
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub condition: Option<ConditionModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionModel {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl WeatherModel {
    /// Normalise the response into a snapshot. A payload without a current
    /// temperature is `None`; one that has current conditions but lacks the
    /// condition text or the location name is rejected.
    ///
    pub fn into_snapshot(self) -> Result<Option<WeatherSnapshot>, ApiError> {
        let (condition, temperature_c) = match self.current {
            Some(CurrentModel {
                temp_c: Some(temp_c),
                condition,
            }) => (condition, temp_c),
            _ => return Ok(None),
        };
        let condition_text = condition
            .and_then(|c| c.text)
            .ok_or(ApiError::IncompleteResponse("current.condition.text"))?;
        let location = self
            .location
            .ok_or(ApiError::IncompleteResponse("location"))?;
        let name = location
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ApiError::IncompleteResponse("location.name"))?;
        let location_label = match location.region.filter(|region| !region.is_empty()) {
            Some(region) => format!("{}, {}", name, region),
            None => name,
        };
        Ok(Some(WeatherSnapshot {
            temperature_c,
            condition_text,
            location_label,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_model_reads_string_detail() {
        let model: ErrorModel = serde_json::from_value(json!({ "detail": "bad password" })).unwrap();
        assert_eq!(model.message(), Some("bad password".to_string()));
    }

    #[test]
    fn error_model_ignores_structured_detail() {
        let model: ErrorModel = serde_json::from_value(json!({
            "detail": [{ "loc": ["body", "username"], "msg": "field required" }]
        }))
        .unwrap();
        assert_eq!(model.message(), None);

        let model: ErrorModel = serde_json::from_value(json!({})).unwrap();
        assert_eq!(model.message(), None);
    }

    #[test]
    fn market_envelope_keeps_first_six_items() {
        let articles: Vec<_> = (0..10)
            .map(|i| json!({ "title": format!("Headline {}", i), "source": { "name": "Wire" }, "url": format!("https://news.test/{}", i) }))
            .collect();
        let envelope: MarketEnvelope = serde_json::from_value(json!({ "data": articles })).unwrap();
        let items = envelope.into_items();
        assert_eq!(items.len(), MARKET_ITEM_LIMIT);
        assert_eq!(items[0].title, "Headline 0");
        assert_eq!(items[5].url, "https://news.test/5");
    }

    #[test]
    fn market_envelope_defaults_missing_fields() {
        let envelope: MarketEnvelope = serde_json::from_value(json!({
            "data": [
                { "title": "No source", "url": "https://news.test/a" },
                { "title": "Null source name", "source": { "id": null, "name": null }, "url": "https://news.test/b" },
                {}
            ]
        }))
        .unwrap();
        let items = envelope.into_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].source_name, None);
        assert_eq!(items[1].source_name, None);
        assert_eq!(items[2].title, "");
        assert_eq!(items[2].url, "");
    }

    #[test]
    fn market_envelope_without_data_is_empty() {
        let envelope: MarketEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.into_items().is_empty());

        let envelope: MarketEnvelope = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn weather_model_builds_snapshot() {
        let model: WeatherModel = serde_json::from_value(json!({
            "current": { "temp_c": 23.5, "condition": { "text": "Partly cloudy" } },
            "location": { "name": "Sao Paulo", "region": "SP" }
        }))
        .unwrap();
        let snapshot = model.into_snapshot().unwrap().unwrap();
        assert_eq!(snapshot.temperature_c, 23.5);
        assert_eq!(snapshot.condition_text, "Partly cloudy");
        assert_eq!(snapshot.location_label, "Sao Paulo, SP");
    }

    #[test]
    fn weather_model_without_current_is_absent() {
        let model: WeatherModel =
            serde_json::from_value(json!({ "location": { "name": "Nowhere" } })).unwrap();
        assert!(model.into_snapshot().unwrap().is_none());
    }

    #[test]
    fn weather_model_without_location_is_rejected() {
        let model: WeatherModel = serde_json::from_value(json!({
            "current": { "temp_c": 20.0, "condition": { "text": "Rain" } }
        }))
        .unwrap();
        assert!(matches!(
            model.into_snapshot(),
            Err(ApiError::IncompleteResponse("location"))
        ));

        let model: WeatherModel = serde_json::from_value(json!({
            "current": { "temp_c": 20.0, "condition": { "text": "Rain" } },
            "location": { "region": "B" }
        }))
        .unwrap();
        assert!(matches!(
            model.into_snapshot(),
            Err(ApiError::IncompleteResponse("location.name"))
        ));
    }

    #[test]
    fn weather_model_without_condition_is_rejected() {
        let model: WeatherModel = serde_json::from_value(json!({
            "current": { "temp_c": 20.0 },
            "location": { "name": "A", "region": "B" }
        }))
        .unwrap();
        assert!(matches!(
            model.into_snapshot(),
            Err(ApiError::IncompleteResponse("current.condition.text"))
        ));
    }

    #[test]
    fn weather_model_label_without_region_is_name() {
        let model: WeatherModel = serde_json::from_value(json!({
            "current": { "temp_c": 20.0, "condition": { "text": "Rain" } },
            "location": { "name": "Lisbon" }
        }))
        .unwrap();
        let snapshot = model.into_snapshot().unwrap().unwrap();
        assert_eq!(snapshot.location_label, "Lisbon");
    }
}
