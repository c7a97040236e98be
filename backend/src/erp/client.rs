use super::auth::{acquire_token, OAuthEndpoint};
use super::error::ErpError;
use crate::config::ErpConfig;
use common::model::order::OrderPayload;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Bound on every outbound ERP call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much upstream body to keep when embedding it in an error message.
const ERROR_BODY_LIMIT: usize = 500;

/// Thin client over the ERP's HTTP surface. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Clone)]
pub struct ErpClient {
    http: Client,
    config: ErpConfig,
}

impl ErpClient {
    pub fn new(config: ErpConfig) -> Self {
        ErpClient {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ErpConfig {
        &self.config
    }

    async fn bearer_token(&self) -> Result<String, ErpError> {
        if !self.config.credentials_configured() {
            return Err(ErpError::AuthenticationFailed(
                "CERM API credentials are not configured".to_string(),
            ));
        }
        let endpoint = OAuthEndpoint {
            http: &self.http,
            config: &self.config,
        };
        acquire_token(&endpoint).await
    }

    /// Fetches one raw reference-data payload. The body is returned as
    /// untyped JSON; shape sniffing and record normalization happen in the
    /// reference service, not here.
    pub async fn fetch_reference(&self, url: &str) -> Result<Value, ErpError> {
        let token = self.bearer_token().await?;
        let response = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ErpError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ErpError::UpstreamUnavailable(e.to_string()))?;
        if !status.is_success() {
            return Err(ErpError::UpstreamUnavailable(format!(
                "{} - {}",
                status,
                truncate(&body, ERROR_BODY_LIMIT)
            )));
        }

        debug!("Reference payload from {}: {}", url, truncate(&body, ERROR_BODY_LIMIT));
        serde_json::from_str(&body).map_err(|e| {
            ErpError::MalformedResponse(format!("{}; body: {}", e, truncate(&body, ERROR_BODY_LIMIT)))
        })
    }

    /// Submits a finished order payload. Never errors outward: any failure
    /// is logged and reported as `false` so the caller can record the quote
    /// outcome either way.
    pub async fn submit_order(&self, payload: &OrderPayload) -> bool {
        let token = match self.bearer_token().await {
            Ok(token) => token,
            Err(e) => {
                error!("Cannot submit order payload: {}", e);
                return false;
            }
        };

        let result = self
            .http
            .post(&self.config.order_url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Order payload accepted by the ERP");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(
                    "ERP rejected order payload: {} - {}",
                    status,
                    truncate(&body, ERROR_BODY_LIMIT)
                );
                false
            }
            Err(e) => {
                error!("Error submitting order payload: {}", e);
                false
            }
        }
    }
}

/// Truncates to at most `max` bytes without splitting a UTF-8 character.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 500), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
        // 'é' is two bytes; cutting inside it must back off.
        assert_eq!(truncate("éé", 3), "é");
    }
}
