use std::{collections::HashMap, fmt, future::Future, sync::Arc};

use reqwest::Client;
use tracing::{debug, error, info};

use super::{
    auth::TokenManager,
    provider::{ResourceManagement, WebSiteManagement},
};
use crate::{
    azure::{ArmClient, ResourcesClient, WebSitesClient},
    config::Settings,
    error::Result,
    types::{
        AppServicePlan, CsmPublishingProfileOptions, CsmUsageQuotaCollection, ResourceGroup, Site,
        SiteCollection, SiteConfig, SiteConfigResource, SiteProperties, StringDictionary,
    },
};

/// App settings written to every web app created through this client.
pub const DEFAULT_APP_SETTINGS: [(&str, &str); 2] = [
    ("MyFirstKey", "My first value"),
    ("MySecondKey", "My second value"),
];

/// Steps of [`WebAppManagementClient::create_or_update_web_app`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    ResourceGroup,
    Site,
    Config,
    AppSettings,
    Restart,
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionStep::ResourceGroup => "ensure-resource-group",
            ProvisionStep::Site => "create-site",
            ProvisionStep::Config => "configure-site",
            ProvisionStep::AppSettings => "apply-app-settings",
            ProvisionStep::Restart => "restart-site",
        };
        f.write_str(name)
    }
}

/// One authenticated session against a subscription's web apps.
///
/// Built once at startup and shared by every request handler. Each method is a
/// single provider call, except [`Self::create_or_update_web_app`] which runs a
/// fixed sequence of calls.
pub struct WebAppManagementClient {
    web_sites: Arc<dyn WebSiteManagement>,
    resources: Arc<dyn ResourceManagement>,
    app_service_plan: String,
}

impl WebAppManagementClient {
    pub fn new(
        web_sites: Arc<dyn WebSiteManagement>,
        resources: Arc<dyn ResourceManagement>,
        app_service_plan: impl Into<String>,
    ) -> Self {
        Self {
            web_sites,
            resources,
            app_service_plan: app_service_plan.into(),
        }
    }

    /// Authenticates against the configured cloud and binds both provider
    /// handles to the subscription.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ManagementError::Auth`] when the token request
    /// is rejected or cannot be sent.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let http = Client::new();
        let tokens = TokenManager::acquire(
            http.clone(),
            settings.endpoints.clone(),
            settings.credentials.clone(),
        )
        .await?;

        let arm = ArmClient::new(
            http,
            settings.endpoints.resource_manager.clone(),
            settings.subscription_id.clone(),
            Arc::new(tokens),
        );
        info!(subscription = %settings.subscription_id, "management client ready");

        Ok(Self::new(
            Arc::new(WebSitesClient::new(arm.clone())),
            Arc::new(ResourcesClient::new(arm)),
            settings.app_service_plan.clone(),
        ))
    }

    pub fn app_service_plan(&self) -> &str {
        &self.app_service_plan
    }

    pub async fn list_all_web_apps(&self) -> Result<SiteCollection> {
        info!("listing web apps in subscription");
        self.web_sites.list_sites().await
    }

    pub async fn list_web_apps(&self, resource_group: &str) -> Result<SiteCollection> {
        info!(resource_group, "listing web apps in resource group");
        self.web_sites
            .list_sites_by_resource_group(resource_group)
            .await
    }

    pub async fn get_web_app(&self, resource_group: &str, web_app: &str) -> Result<Site> {
        info!(resource_group, web_app, "fetching web app");
        self.web_sites.get_site(resource_group, web_app).await
    }

    pub async fn get_web_app_slots(
        &self,
        resource_group: &str,
        web_app: &str,
    ) -> Result<SiteCollection> {
        info!(resource_group, web_app, "listing web app slots");
        self.web_sites.list_site_slots(resource_group, web_app).await
    }

    pub async fn get_web_app_config(
        &self,
        resource_group: &str,
        web_app: &str,
    ) -> Result<SiteConfigResource> {
        info!(resource_group, web_app, "fetching web app config");
        self.web_sites.get_site_config(resource_group, web_app).await
    }

    pub async fn get_web_app_settings(
        &self,
        resource_group: &str,
        web_app: &str,
    ) -> Result<StringDictionary> {
        info!(resource_group, web_app, "listing web app settings");
        self.web_sites
            .list_app_settings(resource_group, web_app)
            .await
    }

    pub async fn get_web_app_usage_quota(
        &self,
        resource_group: &str,
        web_app: &str,
    ) -> Result<CsmUsageQuotaCollection> {
        info!(resource_group, web_app, "fetching web app usage quota");
        self.web_sites.list_site_usages(resource_group, web_app).await
    }

    pub async fn get_app_service_plan(
        &self,
        resource_group: &str,
        plan: &str,
    ) -> Result<AppServicePlan> {
        info!(resource_group, plan, "fetching app service plan");
        self.web_sites.get_server_farm(resource_group, plan).await
    }

    /// Creates or updates a web app on the configured app service plan.
    ///
    /// Runs, in order and stopping at the first failure:
    /// 1. create the resource group at `location` unless it already exists
    /// 2. create or update the site at `location`
    /// 3. write the site config with PHP disabled
    /// 4. replace the app settings with [`DEFAULT_APP_SETTINGS`]
    /// 5. soft-restart the site
    ///
    /// Nothing is rolled back: when a later step fails the site created by
    /// step 2 stays in place. The provider operations are treated as done
    /// once accepted.
    ///
    /// # Returns
    ///
    /// The site as returned by step 2.
    pub async fn create_or_update_web_app(
        &self,
        resource_group: &str,
        location: &str,
        web_app: &str,
    ) -> Result<Site> {
        info!(resource_group, location, web_app, "creating or updating web app");

        run_step(
            ProvisionStep::ResourceGroup,
            web_app,
            self.ensure_resource_group(resource_group, location),
        )
        .await?;

        let site = Site {
            location: location.to_string(),
            properties: SiteProperties {
                server_farm_id: Some(self.app_service_plan.clone()),
                ..Default::default()
            },
            ..Default::default()
        };
        let created = run_step(
            ProvisionStep::Site,
            web_app,
            self.web_sites
                .create_or_update_site(resource_group, web_app, &site),
        )
        .await?;

        let config = SiteConfigResource {
            location: Some(location.to_string()),
            properties: SiteConfig {
                php_version: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        run_step(
            ProvisionStep::Config,
            web_app,
            self.web_sites
                .update_site_config(resource_group, web_app, &config),
        )
        .await?;

        let settings = StringDictionary {
            location: Some(location.to_string()),
            properties: DEFAULT_APP_SETTINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            ..Default::default()
        };
        run_step(
            ProvisionStep::AppSettings,
            web_app,
            self.web_sites
                .update_app_settings(resource_group, web_app, &settings),
        )
        .await?;

        run_step(
            ProvisionStep::Restart,
            web_app,
            self.web_sites.restart_site(resource_group, web_app, true),
        )
        .await?;

        info!(resource_group, web_app, "web app provisioned");
        Ok(created)
    }

    async fn ensure_resource_group(&self, resource_group: &str, location: &str) -> Result<()> {
        if self.resources.resource_group_exists(resource_group).await? {
            debug!(resource_group, "resource group exists");
            return Ok(());
        }

        let group = ResourceGroup {
            name: Some(resource_group.to_string()),
            location: location.to_string(),
            ..Default::default()
        };
        self.resources
            .create_or_update_resource_group(resource_group, &group)
            .await?;
        info!(resource_group, location, "resource group created");
        Ok(())
    }

    pub async fn delete_web_app(&self, resource_group: &str, web_app: &str) -> Result<()> {
        info!(resource_group, web_app, "deleting web app");
        self.web_sites.delete_site(resource_group, web_app).await
    }

    /// Returns the publishing profile XML with both MSDeploy and FTP
    /// credentials, decoded as UTF-8 without a leading byte order mark.
    pub async fn get_publish_profile_xml(
        &self,
        resource_group: &str,
        web_app: &str,
    ) -> Result<String> {
        info!(resource_group, web_app, "fetching publish profile");
        let bytes = self
            .web_sites
            .list_publishing_profile_xml(
                resource_group,
                web_app,
                &CsmPublishingProfileOptions::default(),
            )
            .await?;

        // Invalid sequences become U+FFFD rather than failing the request.
        let xml = String::from_utf8_lossy(&bytes);
        Ok(xml.trim_start_matches('\u{feff}').to_string())
    }
}

async fn run_step<T, F>(step: ProvisionStep, web_app: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug!(%step, web_app, "provisioning step started");
    fut.await
        .inspect_err(|e| error!(%step, web_app, error = %e, "provisioning step failed"))
}
