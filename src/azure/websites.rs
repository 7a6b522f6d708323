use async_trait::async_trait;
use serde_json::json;

use super::arm::ArmClient;
use crate::{
    error::Result,
    management::WebSiteManagement,
    types::{
        AppServicePlan, CsmPublishingProfileOptions, CsmUsageQuotaCollection, Site,
        SiteCollection, SiteConfigResource, StringDictionary,
    },
};

pub const WEB_API_VERSION: &str = "2022-03-01";

/// `Microsoft.Web` handle bound to one subscription.
#[derive(Clone)]
pub struct WebSitesClient {
    arm: ArmClient,
}

impl WebSitesClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn resource_group_path(&self, resource_group: &str) -> String {
        format!(
            "{}/resourceGroups/{resource_group}/providers/Microsoft.Web",
            self.arm.subscription_path()
        )
    }

    fn site_path(&self, resource_group: &str, name: &str) -> String {
        format!("{}/sites/{name}", self.resource_group_path(resource_group))
    }
}

#[async_trait]
impl WebSiteManagement for WebSitesClient {
    async fn list_sites(&self) -> Result<SiteCollection> {
        let path = format!(
            "{}/providers/Microsoft.Web/sites",
            self.arm.subscription_path()
        );
        self.arm.get_json(&path, WEB_API_VERSION).await
    }

    async fn list_sites_by_resource_group(&self, resource_group: &str) -> Result<SiteCollection> {
        let path = format!("{}/sites", self.resource_group_path(resource_group));
        self.arm.get_json(&path, WEB_API_VERSION).await
    }

    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site> {
        self.arm
            .get_json(&self.site_path(resource_group, name), WEB_API_VERSION)
            .await
    }

    async fn create_or_update_site(
        &self,
        resource_group: &str,
        name: &str,
        site: &Site,
    ) -> Result<Site> {
        self.arm
            .put_json(&self.site_path(resource_group, name), WEB_API_VERSION, site)
            .await
    }

    async fn delete_site(&self, resource_group: &str, name: &str) -> Result<()> {
        self.arm
            .delete(&self.site_path(resource_group, name), WEB_API_VERSION)
            .await
    }

    async fn list_site_slots(&self, resource_group: &str, name: &str) -> Result<SiteCollection> {
        let path = format!("{}/slots", self.site_path(resource_group, name));
        self.arm.get_json(&path, WEB_API_VERSION).await
    }

    async fn get_site_config(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteConfigResource> {
        let path = format!("{}/config/web", self.site_path(resource_group, name));
        self.arm.get_json(&path, WEB_API_VERSION).await
    }

    async fn update_site_config(
        &self,
        resource_group: &str,
        name: &str,
        config: &SiteConfigResource,
    ) -> Result<SiteConfigResource> {
        let path = format!("{}/config/web", self.site_path(resource_group, name));
        self.arm.put_json(&path, WEB_API_VERSION, config).await
    }

    async fn list_app_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<StringDictionary> {
        let path = format!(
            "{}/config/appsettings/list",
            self.site_path(resource_group, name)
        );
        self.arm.post_json(&path, WEB_API_VERSION, &json!({})).await
    }

    async fn update_app_settings(
        &self,
        resource_group: &str,
        name: &str,
        settings: &StringDictionary,
    ) -> Result<StringDictionary> {
        let path = format!("{}/config/appsettings", self.site_path(resource_group, name));
        self.arm.put_json(&path, WEB_API_VERSION, settings).await
    }

    async fn list_site_usages(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<CsmUsageQuotaCollection> {
        let path = format!("{}/usages", self.site_path(resource_group, name));
        self.arm.get_json(&path, WEB_API_VERSION).await
    }

    async fn list_publishing_profile_xml(
        &self,
        resource_group: &str,
        name: &str,
        options: &CsmPublishingProfileOptions,
    ) -> Result<Vec<u8>> {
        let path = format!("{}/publishxml", self.site_path(resource_group, name));
        self.arm.post_bytes(&path, WEB_API_VERSION, options).await
    }

    async fn restart_site(
        &self,
        resource_group: &str,
        name: &str,
        soft_restart: bool,
    ) -> Result<()> {
        let path = format!("{}/restart", self.site_path(resource_group, name));
        let soft_restart = if soft_restart { "true" } else { "false" };
        self.arm
            .post_action(&path, WEB_API_VERSION, &[("softRestart", soft_restart)])
            .await
    }

    async fn get_server_farm(&self, resource_group: &str, name: &str) -> Result<AppServicePlan> {
        let path = format!(
            "{}/serverfarms/{name}",
            self.resource_group_path(resource_group)
        );
        self.arm.get_json(&path, WEB_API_VERSION).await
    }
}
