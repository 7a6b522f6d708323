//! Provider traits the management client is written against.
//!
//! [`WebSiteManagement`] and [`ResourceManagement`] mirror the two handles of
//! the Azure management API (`Microsoft.Web` and `Microsoft.Resources`). The
//! production implementations live in [`crate::azure`]; tests substitute
//! in-memory fakes.

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{
        AppServicePlan, CsmPublishingProfileOptions, CsmUsageQuotaCollection, ResourceGroup, Site,
        SiteCollection, SiteConfigResource, StringDictionary,
    },
};

/// Web sites and server farms (`Microsoft.Web`).
#[async_trait]
pub trait WebSiteManagement: Send + Sync {
    /// Lists every web app in the subscription.
    async fn list_sites(&self) -> Result<SiteCollection>;

    /// Lists the web apps in one resource group.
    async fn list_sites_by_resource_group(&self, resource_group: &str) -> Result<SiteCollection>;

    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site>;

    async fn create_or_update_site(
        &self,
        resource_group: &str,
        name: &str,
        site: &Site,
    ) -> Result<Site>;

    async fn delete_site(&self, resource_group: &str, name: &str) -> Result<()>;

    async fn list_site_slots(&self, resource_group: &str, name: &str) -> Result<SiteCollection>;

    async fn get_site_config(&self, resource_group: &str, name: &str)
    -> Result<SiteConfigResource>;

    async fn update_site_config(
        &self,
        resource_group: &str,
        name: &str,
        config: &SiteConfigResource,
    ) -> Result<SiteConfigResource>;

    async fn list_app_settings(&self, resource_group: &str, name: &str)
    -> Result<StringDictionary>;

    /// Replaces the app settings of a web app.
    async fn update_app_settings(
        &self,
        resource_group: &str,
        name: &str,
        settings: &StringDictionary,
    ) -> Result<StringDictionary>;

    async fn list_site_usages(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<CsmUsageQuotaCollection>;

    /// Returns the raw publishing profile document.
    async fn list_publishing_profile_xml(
        &self,
        resource_group: &str,
        name: &str,
        options: &CsmPublishingProfileOptions,
    ) -> Result<Vec<u8>>;

    async fn restart_site(&self, resource_group: &str, name: &str, soft_restart: bool)
    -> Result<()>;

    async fn get_server_farm(&self, resource_group: &str, name: &str) -> Result<AppServicePlan>;
}

/// Resource groups (`Microsoft.Resources`).
#[async_trait]
pub trait ResourceManagement: Send + Sync {
    async fn resource_group_exists(&self, name: &str) -> Result<bool>;

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ResourceGroup>;
}
