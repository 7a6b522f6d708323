use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    error::{ManagementError, ProviderError, Result},
    management::TokenManager,
};

/// Authenticated access to the Azure Resource Manager REST API for one
/// subscription.
#[derive(Clone)]
pub struct ArmClient {
    http: Client,
    base_url: String,
    subscription_id: String,
    tokens: Arc<TokenManager>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl ArmClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        subscription_id: impl Into<String>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            subscription_id: subscription_id.into(),
            tokens,
        }
    }

    /// `/subscriptions/{id}` path every resource path starts with.
    pub fn subscription_path(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, api_version: &str) -> Result<T> {
        let response = self
            .execute(self.request(Method::GET, path, api_version).await?)
            .await?;
        decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, api_version: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path, api_version).await?.json(body);
        decode(self.execute(builder).await?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, api_version: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, api_version).await?.json(body);
        decode(self.execute(builder).await?).await
    }

    /// POSTs `body` and returns the raw response bytes.
    pub async fn post_bytes<B>(&self, path: &str, api_version: &str, body: &B) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, api_version).await?.json(body);
        let response = self.execute(builder).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POSTs without a body, adding `query` to the api-version parameter.
    pub async fn post_action(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<()> {
        let builder = self
            .request(Method::POST, path, api_version)
            .await?
            .query(query)
            .header(reqwest::header::CONTENT_LENGTH, 0);
        self.execute(builder).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, api_version: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path, api_version).await?)
            .await?;
        Ok(())
    }

    /// Maps a HEAD request to existence: 2xx is `true`, 404 is `false`.
    pub async fn head_exists(&self, path: &str, api_version: &str) -> Result<bool> {
        let response = self
            .request(Method::HEAD, path, api_version)
            .await?
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(provider_error(response).await),
        }
    }

    async fn request(&self, method: Method, path: &str, api_version: &str) -> Result<RequestBuilder> {
        let token = self.tokens.get_valid_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "management request");

        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token)
            .query(&[("api-version", api_version)]))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(provider_error(response).await)
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Builds a [`ProviderError`] from a non-success management response.
///
/// Error envelopes of the form `{"error": {"code", "message"}}` keep their
/// code and message; any other body keeps the status reason as code and the
/// raw body as message.
async fn provider_error(response: Response) -> ManagementError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let error = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            ProviderError::new(status.as_u16(), envelope.error.code, envelope.error.message)
        }
        Err(_) => ProviderError::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("UnknownError"),
            body,
        ),
    };

    warn!(status = error.status, code = %error.code, "management request failed");
    ManagementError::Provider(error)
}
