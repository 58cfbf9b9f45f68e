/// OAuth2 client-credentials token provider for Microsoft Graph
use crate::constants::{GRAPH_REQUEST_TIMEOUT_SECONDS, GRAPH_SCOPE, LOGIN_BASE_URL};
use crate::error::SyncError;
use crate::models::GraphConfig;
use crate::utils::logging::redact_secret;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{error, info};

#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a bearer token for Graph requests
    async fn access_token(&self) -> Result<String, SyncError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Client-credentials flow against the Microsoft identity platform.
///
/// The token is fetched at most once per provider; providers are created per
/// invocation, so no refresh logic is needed.
pub struct ClientCredentialsTokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: OnceCell<String>,
}

impl ClientCredentialsTokenProvider {
    pub fn new(http: reqwest::Client, config: &GraphConfig) -> Self {
        Self::with_login_base(http, config, LOGIN_BASE_URL)
    }

    /// Uses a custom identity endpoint (sovereign clouds, tests)
    pub fn with_login_base(http: reqwest::Client, config: &GraphConfig, login_base: &str) -> Self {
        Self {
            http,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                login_base.trim_end_matches('/'),
                config.tenant_id
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: OnceCell::new(),
        }
    }

    async fn request_token(&self) -> Result<String, SyncError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .timeout(Duration::from_secs(GRAPH_REQUEST_TIMEOUT_SECONDS))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(error = %e, "Error getting access token");
                SyncError::Auth(format!("Token request failed: {}", e))
            })?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Auth(format!("Invalid token response: {}", e)))?;

        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SyncError::Auth("Token response has no access_token".to_string()))?;

        info!(token = %redact_secret(&token), "Successfully obtained access token");
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<String, SyncError> {
        self.token
            .get_or_try_init(|| self.request_token())
            .await
            .cloned()
    }
}

/// Fixed token, for tests and pre-authenticated callers
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, SyncError> {
        Ok(self.token.clone())
    }
}
