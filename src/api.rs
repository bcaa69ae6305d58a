//! weatherapi.com current-conditions client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::state::Reading;

/// Why a query failed. Every variant surfaces to the user as the same notice.
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// The request URL carries the API key, so it never reaches logs or notices
impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Request(err.without_url())
    }
}

/// Provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without the endpoint path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

/// `{"error": {"code": 1006, "message": "No matching location found."}}`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    code: i64,
    message: String,
}

/// Parse a `current.json` body into a [`Reading`].
///
/// A provider error object is reported as [`QueryError::Provider`] even when
/// it arrives with a success status.
pub fn parse_current(body: &str) -> Result<Reading, QueryError> {
    if let Ok(ErrorResponse { error }) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(QueryError::Provider {
            code: error.code,
            message: error.message,
        });
    }

    let data: CurrentResponse = serde_json::from_str(body)?;
    Ok(Reading {
        temperature_c: data.current.temp_c,
        humidity: data.current.humidity,
        wind_kph: data.current.wind_kph,
        city: data.location.name,
        condition: data.current.condition.text,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    http: Client,
    config: ProviderConfig,
}

impl WeatherApiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, QueryError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn current_url(&self, api_key: &str, city: &str) -> String {
        format!(
            "{}/current.json?key={}&q={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(api_key),
            urlencoding::encode(city)
        )
    }

    /// Fetch current conditions for `city`
    #[instrument(skip(self))]
    pub async fn current(&self, city: &str) -> Result<Reading, QueryError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(QueryError::MissingApiKey)?;

        let response = self.http.get(self.current_url(api_key, city)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body = %truncate_body(&body), "provider response");

        if !status.is_success() {
            // Provider errors come back as 400 with an error object
            return match parse_current(&body) {
                Err(err @ QueryError::Provider { .. }) => Err(err),
                _ => Err(QueryError::Status {
                    status,
                    body: truncate_body(&body),
                }),
            };
        }

        parse_current(&body)
    }
}
