//! # Azure Integration Module
//!
//! Implementation of the provider traits in [`crate::management`] on top of
//! the Azure Resource Manager REST API.
//!
//! ```text
//! Management Client
//!          ↓
//! Azure Integration Layer
//!     ├── Authentication (OAuth 2.0 client credentials)
//!     ├── Web Sites (Microsoft.Web: sites, config, app settings, server farms)
//!     └── Resource Groups (Microsoft.Resources)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Azure Resource Manager
//! ```
//!
//! ## Authentication
//!
//! [`auth`] requests a token from `{authority}/{tenant}/oauth2/v2.0/token`
//! with the service principal's client ID and secret. The token is held by
//! [`crate::management::TokenManager`], shared by both handles and renewed
//! shortly before it expires.
//!
//! ## Errors
//!
//! Non-success responses are parsed from the ARM error envelope into a
//! [`crate::error::ProviderError`] that keeps the HTTP status, the provider
//! error code and its message. Nothing is retried.
//!
//! ## Long-running operations
//!
//! Create, restart and delete return as soon as ARM accepts the request.
//! `Azure-AsyncOperation` headers are not polled.

pub mod arm;
pub mod auth;
pub mod resources;
pub mod websites;

pub use arm::ArmClient;
pub use resources::{RESOURCES_API_VERSION, ResourcesClient};
pub use websites::{WEB_API_VERSION, WebSitesClient};
