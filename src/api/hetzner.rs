use std::time::Duration;

use super::{client::DnsApiClient, models::*};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT},
    StatusCode,
};
use serde::de::DeserializeOwned;

pub const API_BASE_URL: &str = "https://dns.hetzner.com/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const AUTH_HEADER: &str = "auth-api-token";
const ACCEPT_JSON: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
pub struct HetznerClient {
    client: reqwest::Client,
    base_url: String,
    api_token: HeaderValue,
}

#[async_trait]
impl DnsApiClient for HetznerClient {
    async fn get_record(&self, record_id: &str) -> Result<RecordResponse> {
        if record_id.is_empty() {
            return Err(Error::EmptyIdentifier("Record ID"));
        }
        self.send_request(&self.record_url(record_id)).await
    }

    async fn get_records(
        &self,
        zone_id: &str,
        options: Option<RecordsListOptions>,
    ) -> Result<ListResponse> {
        if zone_id.is_empty() {
            return Err(Error::EmptyIdentifier("Zone ID"));
        }
        self.send_request(&self.records_url(zone_id, options)).await
    }
}

impl HetznerClient {
    pub fn new(api_token: &str) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, api_token)
    }

    pub fn with_base_url(base_url: &str, api_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut api_token = HeaderValue::from_str(api_token)?;
        api_token.set_sensitive(true);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn record_url(&self, record_id: &str) -> String {
        format!("{}/records/{}", self.base_url, record_id)
    }

    /// Query parameters always go out as `zone_id`, `per_page`, `page`.
    pub fn records_url(&self, zone_id: &str, options: Option<RecordsListOptions>) -> String {
        let options = options.unwrap_or_default();
        format!(
            "{}/records?zone_id={}&per_page={}&page={}",
            self.base_url, zone_id, options.items_per_page, options.page
        )
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(HeaderName::from_static(AUTH_HEADER), self.api_token.clone());
        headers
    }

    async fn send_request<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .headers(self.build_headers())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Request to {} failed with status {}", url, status);
            // An unreadable error body still reports the status.
            let body = response.bytes().await.unwrap_or_default();
            return Err(match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(error) => Error::Api {
                    code: error.code,
                    message: error.message,
                },
                Err(_) => Error::UnexpectedStatus(status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        debug!("{} returned {} ({} bytes)", url, status, body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HetznerClient {
        HetznerClient::with_base_url("http://localhost:8080/api/v1/", "secret_token").unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = HetznerClient::new("secret_token").unwrap();
        assert_eq!(client.base_url(), "https://dns.hetzner.com/api/v1");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(client().base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_record_url() {
        assert_eq!(
            client().record_url("deadbeef1234567890"),
            "http://localhost:8080/api/v1/records/deadbeef1234567890"
        );
    }

    #[test]
    fn test_records_url_defaults() {
        assert_eq!(
            client().records_url("abcdef0123456789", None),
            "http://localhost:8080/api/v1/records?zone_id=abcdef0123456789&per_page=100&page=1"
        );
    }

    #[test]
    fn test_records_url_with_options() {
        let options = RecordsListOptions {
            items_per_page: 25,
            page: 4,
        };
        assert_eq!(
            client().records_url("abcdef0123456789", Some(options)),
            "http://localhost:8080/api/v1/records?zone_id=abcdef0123456789&per_page=25&page=4"
        );
    }

    #[test]
    fn test_headers() {
        let headers = client().build_headers();
        assert_eq!(headers[ACCEPT], "application/json; charset=utf-8");
        assert_eq!(headers["Auth-API-Token"], "secret_token");
        assert!(headers[AUTH_HEADER].is_sensitive());
    }

    #[test]
    fn test_invalid_token() {
        let result = HetznerClient::new("bad\ntoken");
        assert!(matches!(result, Err(Error::InvalidToken(_))));
    }
}
