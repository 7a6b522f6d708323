//! Error types shared by the provider, the management client and the API layer.
//!
//! Provider and identity failures keep their structured fields (HTTP status,
//! machine-readable code, message) all the way to the HTTP boundary, where
//! [`crate::api`] maps them to a transport status.

use thiserror::Error;

/// A failure reported by the Azure management API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ProviderError: {code} : {message}")]
pub struct ProviderError {
    /// HTTP status returned by the provider.
    pub status: u16,
    /// Provider error code, e.g. `ResourceNotFound`.
    pub code: String,
    /// Provider error message.
    pub message: String,
}

impl ProviderError {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// A failure while acquiring an access token from the identity endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("AuthError: {code} : {message}")]
pub struct AuthError {
    /// HTTP status of the token response, if one was received.
    pub status: Option<u16>,
    /// Identity error code, e.g. `invalid_client`.
    pub code: String,
    /// Identity error description.
    pub message: String,
}

impl AuthError {
    pub fn new(status: Option<u16>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by the management client and the provider implementations.
#[derive(Error, Debug)]
pub enum ManagementError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ManagementError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ManagementError::Provider(_) => "PROVIDER_ERROR",
            ManagementError::Auth(_) => "AUTH_ERROR",
            ManagementError::Transport(_) => "TRANSPORT_ERROR",
            ManagementError::Decode(_) => "DECODE_ERROR",
        }
    }
}

impl From<serde_json::Error> for ManagementError {
    fn from(err: serde_json::Error) -> Self {
        ManagementError::Decode(err.to_string())
    }
}

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("Unknown Azure cloud '{0}', expected AzureCloud, AzureChinaCloud or AzureUSGovernment")]
    UnknownCloud(String),

    #[error("Invalid server address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to load environment file: {0}")]
    EnvFile(String),
}

pub type Result<T> = std::result::Result<T, ManagementError>;
