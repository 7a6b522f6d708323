mod auth;
mod client;
mod provider;

pub use auth::TokenManager;
pub use client::DEFAULT_APP_SETTINGS;
pub use client::ProvisionStep;
pub use client::WebAppManagementClient;
pub use provider::ResourceManagement;
pub use provider::WebSiteManagement;
