use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::{Credentials, Endpoints},
    error::AuthError,
    types::Token,
};

/// Lifetime assumed when the identity endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Acquires an access token with the OAuth 2.0 client-credentials grant.
///
/// Posts the service principal's client ID and secret to the tenant's v2.0
/// token endpoint on the configured authority and requests the resource
/// manager `.default` scope. The returned token is valid for every management
/// call against the subscription until it expires.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `endpoints` - Authority host and resource manager of the target cloud
/// * `credentials` - Tenant ID, client ID and client secret
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Access token with its lifetime and acquisition time
/// - `Err(AuthError)` - Identity error code and description, or the transport
///   failure that prevented the request from completing
///
/// # Error Conditions
///
/// Common failures include:
/// - Unknown tenant (`invalid_request`)
/// - Wrong client ID or secret (`invalid_client`)
/// - Network connectivity issues
///
/// # Security Note
///
/// The client secret is sent in the form body only and is never logged.
pub async fn acquire_token(
    http: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<Token, AuthError> {
    let url = format!(
        "{authority}/{tenant}/oauth2/v2.0/token",
        authority = endpoints.authority_host.trim_end_matches('/'),
        tenant = credentials.tenant_id
    );
    let scope = endpoints.scope();

    debug!(tenant = %credentials.tenant_id, client_id = %credentials.client_id, "requesting access token");

    let res = http
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", scope.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AuthError::new(None, "request_failed", e.to_string()))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| AuthError::new(Some(status.as_u16()), "request_failed", e.to_string()))?;
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    if !status.is_success() {
        let code = json["error"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        let message = json["error_description"]
            .as_str()
            .map(str::to_string)
            .unwrap_or(body);
        return Err(AuthError::new(Some(status.as_u16()), code, message));
    }

    let Some(access_token) = json["access_token"].as_str() else {
        return Err(AuthError::new(
            Some(status.as_u16()),
            "invalid_response",
            "token response did not contain an access_token",
        ));
    };

    // v1 endpoints send the lifetime as a string, v2 as a number.
    let expires_in = json["expires_in"]
        .as_u64()
        .or_else(|| json["expires_in"].as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(DEFAULT_EXPIRES_IN);

    Ok(Token {
        access_token: access_token.to_string(),
        token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
