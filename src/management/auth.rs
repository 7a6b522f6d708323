use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    azure::auth::acquire_token,
    config::{Credentials, Endpoints},
    error::AuthError,
    types::Token,
};

/// Seconds before expiry at which a token is renewed.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the access token shared by every provider handle of one client.
pub struct TokenManager {
    http: Client,
    endpoints: Endpoints,
    credentials: Credentials,
    token: Mutex<Token>,
}

impl TokenManager {
    /// Acquires the first token and returns a manager holding it.
    pub async fn acquire(
        http: Client,
        endpoints: Endpoints,
        credentials: Credentials,
    ) -> Result<Self, AuthError> {
        let token = acquire_token(&http, &endpoints, &credentials).await?;
        info!(expires_in = token.expires_in, "access token acquired");
        Ok(Self::new(http, endpoints, credentials, token))
    }

    pub fn new(http: Client, endpoints: Endpoints, credentials: Credentials, token: Token) -> Self {
        TokenManager {
            http,
            endpoints,
            credentials,
            token: Mutex::new(token),
        }
    }

    /// Returns an access token that is not about to expire, renewing it first
    /// when needed. Concurrent callers wait for a single renewal.
    pub async fn get_valid_token(&self) -> Result<String, AuthError> {
        let mut token = self.token.lock().await;
        if is_expired(&token) {
            *token = acquire_token(&self.http, &self.endpoints, &self.credentials).await?;
            info!(expires_in = token.expires_in, "access token renewed");
        }

        Ok(token.access_token.clone())
    }

    pub async fn current_token(&self) -> Token {
        self.token.lock().await.clone()
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now + EXPIRY_MARGIN_SECS >= token.obtained_at.saturating_add(token.expires_in)
}
