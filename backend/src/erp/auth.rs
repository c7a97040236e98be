//! OAuth token acquisition with a three-strategy credential fallback.
//!
//! The upstream's accepted way of presenting client credentials differs
//! between environments, so a single canonical request is not reliable.
//! The strategies are attempted strictly in order, short-circuiting on the
//! first token; when all three fail the aggregate error carries every
//! attempt's message, labeled by strategy.

use super::error::ErpError;
use crate::config::ErpConfig;
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use std::time::Duration;

const TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// How client credentials are presented to the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStrategy {
    /// All credentials in the form body.
    FormBody,
    /// Form body plus a Basic auth header duplicating the client credentials.
    BasicAuthAndBody,
    /// Basic auth header only; client credentials omitted from the body.
    BasicAuthOnly,
}

impl AuthStrategy {
    /// Attempt order. Do not reorder: the first strategy matches the
    /// upstream's documented convention, the others are the observed
    /// environment-specific variants.
    pub const ALL: [AuthStrategy; 3] = [
        AuthStrategy::FormBody,
        AuthStrategy::BasicAuthAndBody,
        AuthStrategy::BasicAuthOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AuthStrategy::FormBody => "credentials in body",
            AuthStrategy::BasicAuthAndBody => "basic auth header plus body",
            AuthStrategy::BasicAuthOnly => "basic auth header only",
        }
    }

    fn sends_client_credentials_in_body(self) -> bool {
        !matches!(self, AuthStrategy::BasicAuthOnly)
    }

    fn sends_basic_auth_header(self) -> bool {
        !matches!(self, AuthStrategy::FormBody)
    }
}

/// Seam over the token endpoint so the fallback policy is testable without
/// a live OAuth server.
#[async_trait]
pub trait TokenEndpoint {
    async fn request_token(&self, strategy: AuthStrategy) -> Result<String, String>;
}

/// Production endpoint: posts a `grant_type=password` form to the ERP's
/// OAuth URL.
pub struct OAuthEndpoint<'a> {
    pub http: &'a Client,
    pub config: &'a ErpConfig,
}

#[async_trait]
impl TokenEndpoint for OAuthEndpoint<'_> {
    async fn request_token(&self, strategy: AuthStrategy) -> Result<String, String> {
        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "password"),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];
        if strategy.sends_client_credentials_in_body() {
            form.push(("client_id", self.config.client_id.as_str()));
            form.push(("client_secret", self.config.client_secret.as_str()));
        }

        let url = self.config.oauth_url.trim_end_matches('/');
        let mut request = self
            .http
            .post(url)
            .timeout(TOKEN_TIMEOUT)
            .header("Accept", "application/json")
            .form(&form);
        if strategy.sends_basic_auth_header() {
            request = request.basic_auth(&self.config.client_id, Some(&self.config.client_secret));
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("request error: {}", e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("error reading response: {}", e))?;
        if !status.is_success() {
            return Err(format!("{} - {}", status, body));
        }

        let token_data: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| format!("token response is not JSON: {}", e))?;
        match token_data.get("access_token").and_then(|t| t.as_str()) {
            Some(token) => Ok(token.to_string()),
            None => Err("access token not found in OAuth response".to_string()),
        }
    }
}

/// Runs the strategies in order against the given endpoint and returns the
/// first token. Strategies run strictly in sequence; the token endpoint is
/// rate limited upstream and concurrent attempts would be wasteful.
pub async fn acquire_token<E: TokenEndpoint + Sync>(endpoint: &E) -> Result<String, ErpError> {
    let mut failures: Vec<String> = Vec::new();
    for strategy in AuthStrategy::ALL {
        info!("Attempting OAuth authentication ({})", strategy.label());
        match endpoint.request_token(strategy).await {
            Ok(token) => {
                info!("OAuth authentication successful ({})", strategy.label());
                return Ok(token);
            }
            Err(message) => {
                error!(
                    "OAuth authentication failed ({}): {}",
                    strategy.label(),
                    message
                );
                failures.push(format!("{}: {}", strategy.label(), message));
            }
        }
    }
    Err(ErpError::AuthenticationFailed(format!(
        "all strategies failed. {}",
        failures.join(". ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Endpoint whose per-strategy outcome is scripted up front; records the
    /// order of attempts.
    struct ScriptedEndpoint {
        outcomes: Vec<(AuthStrategy, Result<String, String>)>,
        calls: Mutex<Vec<AuthStrategy>>,
    }

    impl ScriptedEndpoint {
        fn new(outcomes: Vec<(AuthStrategy, Result<String, String>)>) -> Self {
            ScriptedEndpoint {
                outcomes,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TokenEndpoint for ScriptedEndpoint {
        async fn request_token(&self, strategy: AuthStrategy) -> Result<String, String> {
            self.calls.lock().unwrap().push(strategy);
            self.outcomes
                .iter()
                .find(|(s, _)| *s == strategy)
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or_else(|| Err("unexpected strategy".to_string()))
        }
    }

    #[actix_web::test]
    async fn short_circuits_on_first_success() {
        let endpoint = ScriptedEndpoint::new(vec![
            (AuthStrategy::FormBody, Ok("token-a".to_string())),
            (AuthStrategy::BasicAuthAndBody, Ok("token-b".to_string())),
            (AuthStrategy::BasicAuthOnly, Ok("token-c".to_string())),
        ]);

        let token = acquire_token(&endpoint).await.unwrap();
        assert_eq!(token, "token-a");
        assert_eq!(endpoint.calls.lock().unwrap().as_slice(), &[AuthStrategy::FormBody]);
    }

    #[actix_web::test]
    async fn falls_through_to_the_last_strategy() {
        let endpoint = ScriptedEndpoint::new(vec![
            (AuthStrategy::FormBody, Err("401 - bad client".to_string())),
            (AuthStrategy::BasicAuthAndBody, Err("400 - duplicate credentials".to_string())),
            (AuthStrategy::BasicAuthOnly, Ok("token-c".to_string())),
        ]);

        let token = acquire_token(&endpoint).await.unwrap();
        assert_eq!(token, "token-c");
        assert_eq!(
            endpoint.calls.lock().unwrap().as_slice(),
            &[
                AuthStrategy::FormBody,
                AuthStrategy::BasicAuthAndBody,
                AuthStrategy::BasicAuthOnly,
            ]
        );
    }

    #[actix_web::test]
    async fn aggregates_every_failure_with_its_label() {
        let endpoint = ScriptedEndpoint::new(vec![
            (AuthStrategy::FormBody, Err("first".to_string())),
            (AuthStrategy::BasicAuthAndBody, Err("second".to_string())),
            (AuthStrategy::BasicAuthOnly, Err("third".to_string())),
        ]);

        let err = acquire_token(&endpoint).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("credentials in body: first"));
        assert!(message.contains("basic auth header plus body: second"));
        assert!(message.contains("basic auth header only: third"));
    }
}
