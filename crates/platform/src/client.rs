//! Blocking HTTP client for the ad platform's write API.
//!
//! One update is one `POST {base_url}/{api_version}/{entity_id}` with form
//! parameters. The platform answers errors with
//! `{"error": {"message": "..."}}`; that message is surfaced verbatim.

use adsync_core::errors::{Error, PlatformError, Result};
use adsync_core::{AdPlatformWriterTrait, EntityUpdate, RequestContext};
use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "v19.0";

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct GraphApiClient {
    client: Client,
    base_url: String,
    api_version: String,
    access_token: String,
}

impl GraphApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or the HTTP client cannot be
    /// initialized.
    pub fn new(base_url: &str, api_version: &str, access_token: &str) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(Error::MissingConfigKey("platform access token".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.trim_matches('/').to_string(),
            access_token: access_token.trim().to_string(),
        })
    }

    fn entity_url(&self, platform_entity_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url, self.api_version, platform_entity_id
        )
    }

    /// Form parameters for one update. Omitted fields are not sent.
    fn form_params(&self, update: &EntityUpdate) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(budget) = update.daily_budget {
            params.push(("daily_budget", budget.to_string()));
        }
        if let Some(status) = update.status {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("access_token", self.access_token.clone()));
        params
    }
}

/// Extracts the platform's message from an error body, falling back to the
/// HTTP status and a truncated body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match (parsed.error.message, parsed.error.code) {
            (Some(message), _) => message,
            (None, Some(code)) => format!("HTTP {} (code {})", status, code),
            (None, None) => format!("HTTP {}", status),
        },
        Err(_) => format!(
            "HTTP {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        ),
    }
}

impl AdPlatformWriterTrait for GraphApiClient {
    fn update_entity(
        &self,
        ctx: &RequestContext,
        platform_entity_id: &str,
        update: &EntityUpdate,
    ) -> Result<()> {
        if platform_entity_id.is_empty() {
            return Err(PlatformError::InvalidRequest("empty entity identifier".to_string()).into());
        }

        let url = self.entity_url(platform_entity_id);
        debug!(
            "[{}] [PlatformApi] POST {} daily_budget={:?} status={:?}",
            ctx.tag(),
            url,
            update.daily_budget,
            update.status.map(|s| s.as_str())
        );

        let response = self
            .client
            .post(&url)
            .form(&self.form_params(update))
            .send()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| PlatformError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!(
                "[{}] [PlatformApi] Update of {} rejected: {}",
                ctx.tag(),
                platform_entity_id,
                message
            );
            return Err(PlatformError::Rejected(message).into());
        }

        Ok(())
    }
}
