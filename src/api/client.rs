//! HTTP client for market pulse API requests.
//!
//! This module provides a low-level wrapper around `reqwest` that builds
//! request URLs from the configured base URL and attaches bearer tokens to
//! authenticated requests.

use super::error::ApiError;
use reqwest::Response;
use serde::Serialize;

/// Makes requests to the market pulse API and hands back raw responses.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Send a form-encoded POST to the endpoint.
    ///
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        form: &T,
    ) -> Result<Response, ApiError> {
        let request_url = self.url(endpoint);
        log::debug!("POST (form) {}", request_url);
        Ok(self
            .http_client
            .post(&request_url)
            .form(form)
            .send()
            .await?)
    }

    /// Send a JSON POST to the endpoint.
    ///
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let request_url = self.url(endpoint);
        log::debug!("POST (json) {}", request_url);
        Ok(self
            .http_client
            .post(&request_url)
            .json(body)
            .send()
            .await?)
    }

    /// Send a bearer-authenticated GET with the given query parameters.
    ///
    pub async fn get_authorized(
        &self,
        endpoint: &str,
        access_token: &str,
        params: &[(&str, String)],
    ) -> Result<Response, ApiError> {
        let request_url = self.url(endpoint);
        log::debug!("GET {} {:?}", request_url, params);
        Ok(self
            .http_client
            .get(&request_url)
            .header("Authorization", format!("Bearer {}", access_token))
            .query(params)
            .send()
            .await?)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_endpoint() {
        let client = Client::new("http://localhost:8000/");
        assert_eq!(client.url("/token"), "http://localhost:8000/token");
        assert_eq!(client.url("weather"), "http://localhost:8000/weather");
    }
}
