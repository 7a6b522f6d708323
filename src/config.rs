//! Configuration management for azwebapp.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the Azure
//! service principal credentials, the target cloud, and the HTTP server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

/// Existing Free tier plan new web apps are attached to.
pub const DEFAULT_APP_SERVICE_PLAN: &str = "AzureWebAppManagementSDKDemoPlan";

/// Loads environment variables from `.env` files.
///
/// Reads `.env` from the current working directory first and then from the
/// platform-specific local data directory under `azwebapp/.env`. Variables
/// already present in the process environment are never overwritten, and
/// both files are optional.
///
/// # Directory Structure
///
/// The data directory file is looked up in:
/// - Linux: `~/.local/share/azwebapp/.env`
/// - macOS: `~/Library/Application Support/azwebapp/.env`
/// - Windows: `%LOCALAPPDATA%/azwebapp/.env`
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if the data directory cannot be created or
/// an existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    dotenv::dotenv().ok();

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }
    Ok(())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("azwebapp/.env");
    path
}

/// Azure national clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AzureCloud {
    #[default]
    Public,
    China,
    UsGovernment,
}

impl AzureCloud {
    pub fn authority_host(&self) -> &'static str {
        match self {
            AzureCloud::Public => "https://login.microsoftonline.com",
            AzureCloud::China => "https://login.chinacloudapi.cn",
            AzureCloud::UsGovernment => "https://login.microsoftonline.us",
        }
    }

    pub fn resource_manager(&self) -> &'static str {
        match self {
            AzureCloud::Public => "https://management.azure.com",
            AzureCloud::China => "https://management.chinacloudapi.cn",
            AzureCloud::UsGovernment => "https://management.usgovcloudapi.net",
        }
    }
}

impl FromStr for AzureCloud {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "azurecloud" | "public" => Ok(AzureCloud::Public),
            "azurechinacloud" | "china" => Ok(AzureCloud::China),
            "azureusgovernment" | "usgovernment" => Ok(AzureCloud::UsGovernment),
            _ => Err(ConfigError::UnknownCloud(s.to_string())),
        }
    }
}

/// Service principal credentials used for the client-credentials grant.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Endpoints of the cloud the client talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Identity authority, e.g. `https://login.microsoftonline.com`.
    pub authority_host: String,
    /// Resource manager base URL, e.g. `https://management.azure.com`.
    pub resource_manager: String,
}

impl Endpoints {
    pub fn for_cloud(cloud: AzureCloud) -> Self {
        Self {
            authority_host: cloud.authority_host().to_string(),
            resource_manager: cloud.resource_manager().to_string(),
        }
    }

    /// OAuth scope requesting a resource manager token.
    pub fn scope(&self) -> String {
        format!("{}/.default", self.resource_manager.trim_end_matches('/'))
    }
}

/// Everything the management client and the server need at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub subscription_id: String,
    pub endpoints: Endpoints,
    pub app_service_plan: String,
    pub server_address: SocketAddr,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] naming the first required variable
    /// that is not set, [`ConfigError::UnknownCloud`] for an unrecognised
    /// `AZURE_CLOUD`, or [`ConfigError::InvalidAddress`] when
    /// `SERVER_ADDRESS` is not a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::MissingVar(name));

        let credentials = Credentials {
            tenant_id: required("AZURE_TENANT_ID")?,
            client_id: required("AZURE_CLIENT_ID")?,
            client_secret: required("AZURE_CLIENT_SECRET")?,
        };
        let subscription_id = required("AZURE_SUBSCRIPTION_ID")?;

        let cloud = match optional("AZURE_CLOUD") {
            Some(name) => name.parse()?,
            None => AzureCloud::default(),
        };
        let mut endpoints = Endpoints::for_cloud(cloud);
        if let Some(host) = optional("AZURE_AUTHORITY_HOST") {
            endpoints.authority_host = host;
        }
        if let Some(url) = optional("AZURE_RESOURCE_MANAGER_URL") {
            endpoints.resource_manager = url;
        }

        let app_service_plan = optional("APP_SERVICE_PLAN")
            .unwrap_or_else(|| DEFAULT_APP_SERVICE_PLAN.to_string());
        let server_address = parse_address(
            &optional("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        )?;

        Ok(Self {
            credentials,
            subscription_id,
            endpoints,
            app_service_plan,
            server_address,
        })
    }
}

/// Parses a `host:port` socket address for the HTTP server.
pub fn parse_address(address: &str) -> Result<SocketAddr, ConfigError> {
    SocketAddr::from_str(address).map_err(|e| ConfigError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}
