//! DataMall HTTP client.

use std::time::Instant;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::info;

use super::error::DatamallError;
use super::types::BusArrivals;

/// Default base URL for the DataMall OData service.
const DEFAULT_BASE_URL: &str = "https://api.mytransport.sg/ltaodataservice";

/// Configuration for the DataMall client.
#[derive(Debug, Clone)]
pub struct DatamallConfig {
    /// Account key sent in the `AccountKey` header
    pub account_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DatamallConfig {
    /// Create a new config with the given account key.
    pub fn new(account_key: impl Into<String>) -> Self {
        Self {
            account_key: account_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the DataMall bus arrival API.
#[derive(Debug, Clone)]
pub struct DatamallClient {
    http: reqwest::Client,
    base_url: String,
}

impl DatamallClient {
    /// Create a new DataMall client.
    pub fn new(config: DatamallConfig) -> Result<Self, DatamallError> {
        let mut headers = HeaderMap::new();

        let account_key =
            HeaderValue::from_str(&config.account_key).map_err(|_| DatamallError::Api {
                status: 0,
                message: "Invalid account key format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("accountkey"), account_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch upcoming arrivals at a stop, soonest service first.
    ///
    /// An empty stop code yields an empty result without a request.
    pub async fn bus_arrivals(&self, stop_code: &str) -> Result<BusArrivals, DatamallError> {
        if stop_code.is_empty() {
            return Ok(BusArrivals::default());
        }

        let url = format!("{}/BusArrivalv2", self.base_url);

        let started = Instant::now();
        let response = self
            .http
            .get(&url)
            .query(&[("BusStopCode", stop_code)])
            .send()
            .await?;
        let status = response.status();

        info!(
            stop_code,
            req_time_ms = started.elapsed().as_millis() as u64,
            status = status.as_u16(),
            "LTA API"
        );

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DatamallError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatamallError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let mut arrivals: BusArrivals =
            serde_json::from_str(&body).map_err(|e| DatamallError::Json {
                message: e.to_string(),
            })?;
        arrivals.sort_by_arrival();

        Ok(arrivals)
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::response::IntoResponse;
    use axum::{Router, routing::get};
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn config_defaults() {
        let config = DatamallConfig::new("test-key");
        assert_eq!(config.account_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = DatamallConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn rejects_unprintable_key() {
        let err = DatamallClient::new(DatamallConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, DatamallError::Api { status: 0, .. }));
    }

    /// Fake DataMall answering on `/BusArrivalv2`.
    async fn fake_arrivals(
        headers: AxumHeaders,
        Query(q): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        if headers.get("accountkey").and_then(|v| v.to_str().ok()) != Some("secret") {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        match q.get("BusStopCode").map(String::as_str) {
            Some("83139") => r#"{
                "odata.metadata": "",
                "BusStopCode": "83139",
                "Services": [
                    {"ServiceNo": "15", "Operator": "GAS",
                     "NextBus": {"EstimatedArrival": "2017-06-05T14:57:09+08:00"}},
                    {"ServiceNo": "155", "Operator": "SBST",
                     "NextBus": {"EstimatedArrival": "2017-06-05T14:53:31+08:00"}}
                ]
            }"#
            .into_response(),
            Some("garbage") => "not json".into_response(),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        }
    }

    async fn spawn_fake() -> String {
        let app = Router::new().route("/BusArrivalv2", get(fake_arrivals));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn client(base: &str, key: &str) -> DatamallClient {
        DatamallClient::new(DatamallConfig::new(key).with_base_url(base)).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_sorts_arrivals() {
        let base = spawn_fake().await;
        let arrivals = client(&base, "secret").bus_arrivals("83139").await.unwrap();

        assert_eq!(arrivals.bus_stop_code, "83139");
        let order: Vec<&str> = arrivals
            .services
            .iter()
            .map(|s| s.service_no.as_str())
            .collect();
        assert_eq!(order, vec!["155", "15"]);
    }

    #[tokio::test]
    async fn empty_code_skips_request() {
        // Nothing listens here; a request would fail
        let arrivals = client("http://127.0.0.1:9", "secret")
            .bus_arrivals("")
            .await
            .unwrap();
        assert!(arrivals.services.is_empty());
    }

    #[tokio::test]
    async fn bad_key_is_unauthorized() {
        let base = spawn_fake().await;
        let err = client(&base, "wrong").bus_arrivals("83139").await.unwrap_err();
        assert!(matches!(err, DatamallError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let base = spawn_fake().await;
        let err = client(&base, "secret").bus_arrivals("00000").await.unwrap_err();
        match err {
            DatamallError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let base = spawn_fake().await;
        let err = client(&base, "secret")
            .bus_arrivals("garbage")
            .await
            .unwrap_err();
        assert!(matches!(err, DatamallError::Json { .. }));
    }
}
