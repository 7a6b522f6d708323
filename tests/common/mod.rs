#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azwebapp::{
    error::{ManagementError, ProviderError, Result},
    management::{ResourceManagement, WebAppManagementClient, WebSiteManagement},
    types::{
        AppServicePlan, CsmPublishingProfileOptions, CsmUsageQuotaCollection, ResourceGroup, Site,
        SiteCollection, SiteConfigResource, StringDictionary,
    },
};
use serde_json::json;

pub const PLAN: &str = "AzureWebAppManagementSDKDemoPlan";
pub const PUBLISH_PROFILE: &str = r#"<publishData><publishProfile profileName="demo - Web Deploy" publishMethod="MSDeploy" /></publishData>"#;

/// Every provider call the fake receives, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListSites,
    ListSitesByResourceGroup(String),
    GetSite(String, String),
    CreateOrUpdateSite(String, String, Site),
    DeleteSite(String, String),
    ListSiteSlots(String, String),
    GetSiteConfig(String, String),
    UpdateSiteConfig(String, String, SiteConfigResource),
    ListAppSettings(String, String),
    UpdateAppSettings(String, String, StringDictionary),
    ListSiteUsages(String, String),
    ListPublishingProfileXml(String, String),
    RestartSite(String, String, bool),
    GetServerFarm(String, String),
    ResourceGroupExists(String),
    CreateOrUpdateResourceGroup(String, ResourceGroup),
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::ListSites => "list_sites",
            Call::ListSitesByResourceGroup(..) => "list_sites_by_resource_group",
            Call::GetSite(..) => "get_site",
            Call::CreateOrUpdateSite(..) => "create_or_update_site",
            Call::DeleteSite(..) => "delete_site",
            Call::ListSiteSlots(..) => "list_site_slots",
            Call::GetSiteConfig(..) => "get_site_config",
            Call::UpdateSiteConfig(..) => "update_site_config",
            Call::ListAppSettings(..) => "list_app_settings",
            Call::UpdateAppSettings(..) => "update_app_settings",
            Call::ListSiteUsages(..) => "list_site_usages",
            Call::ListPublishingProfileXml(..) => "list_publishing_profile_xml",
            Call::RestartSite(..) => "restart_site",
            Call::GetServerFarm(..) => "get_server_farm",
            Call::ResourceGroupExists(..) => "resource_group_exists",
            Call::CreateOrUpdateResourceGroup(..) => "create_or_update_resource_group",
        }
    }
}

type ErrorFactory = Box<dyn Fn() -> ManagementError + Send + Sync>;

/// In-memory provider returning canned results keyed by resource group and name.
#[derive(Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<Call>>,
    resource_group_exists: bool,
    fail_on: Option<(&'static str, ErrorFactory)>,
    publish_profile: Option<Vec<u8>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_resource_group(mut self) -> Self {
        self.resource_group_exists = true;
        self
    }

    /// Makes the call named `operation` fail with `error`.
    pub fn failing(self, operation: &'static str, error: ProviderError) -> Self {
        self.failing_with(operation, move || error.clone().into())
    }

    /// Makes the call named `operation` fail with a fresh error from `make`.
    pub fn failing_with<F>(mut self, operation: &'static str, make: F) -> Self
    where
        F: Fn() -> ManagementError + Send + Sync + 'static,
    {
        self.fail_on = Some((operation, Box::new(make)));
        self
    }

    pub fn with_publish_profile(mut self, bytes: Vec<u8>) -> Self {
        self.publish_profile = Some(bytes);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::name).collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        match &self.fail_on {
            Some((operation, make)) if *operation == name => Err(make()),
            _ => Ok(()),
        }
    }
}

pub fn client_for(fake: Arc<FakeProvider>) -> WebAppManagementClient {
    WebAppManagementClient::new(fake.clone(), fake, PLAN)
}

pub fn canned_site(resource_group: &str, name: &str) -> Site {
    serde_json::from_value(json!({
        "id": format!("/subscriptions/sub-1/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}"),
        "name": name,
        "type": "Microsoft.Web/sites",
        "kind": "app",
        "location": "West Europe",
        "tags": { "env": "test" },
        "properties": {
            "state": "Running",
            "hostNames": [format!("{name}.azurewebsites.net")],
            "defaultHostName": format!("{name}.azurewebsites.net"),
            "serverFarmId": PLAN,
            "resourceGroup": resource_group,
            "enabled": true,
            "httpsOnly": false,
            "siteConfig": { "numberOfWorkers": 1 }
        },
        "etag": "\"1D9A2F\""
    }))
    .unwrap()
}

pub fn canned_sites(resource_group: &str) -> SiteCollection {
    SiteCollection {
        value: vec![
            canned_site(resource_group, "alpha"),
            canned_site(resource_group, "beta"),
        ],
        next_link: None,
    }
}

pub fn canned_config(resource_group: &str, name: &str) -> SiteConfigResource {
    serde_json::from_value(json!({
        "id": format!("/subscriptions/sub-1/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}/config/web"),
        "name": name,
        "location": "West Europe",
        "properties": {
            "phpVersion": "5.6",
            "netFrameworkVersion": "v4.0",
            "alwaysOn": false
        }
    }))
    .unwrap()
}

pub fn canned_settings(name: &str) -> StringDictionary {
    serde_json::from_value(json!({
        "id": format!("/sites/{name}/config/appsettings"),
        "name": "appsettings",
        "properties": { "WEBSITE_NODE_DEFAULT_VERSION": "6.9.1", "OWNER": name }
    }))
    .unwrap()
}

pub fn canned_usages(name: &str) -> CsmUsageQuotaCollection {
    serde_json::from_value(json!({
        "value": [{
            "unit": "Bytes",
            "nextResetTime": "9999-12-31T23:59:59.9999999",
            "currentValue": 1024,
            "limit": 1073741824,
            "name": { "value": "FileSystemStorage", "localizedValue": format!("File System Storage ({name})") }
        }]
    }))
    .unwrap()
}

pub fn canned_plan(resource_group: &str, name: &str) -> AppServicePlan {
    serde_json::from_value(json!({
        "id": format!("/subscriptions/sub-1/resourceGroups/{resource_group}/providers/Microsoft.Web/serverfarms/{name}"),
        "name": name,
        "kind": "app",
        "location": "West Europe",
        "sku": { "name": "F1", "tier": "Free", "size": "F1", "family": "F", "capacity": 0 },
        "properties": { "numberOfSites": 3, "maximumNumberOfWorkers": 1 }
    }))
    .unwrap()
}

#[async_trait]
impl WebSiteManagement for FakeProvider {
    async fn list_sites(&self) -> Result<SiteCollection> {
        self.record(Call::ListSites)?;
        Ok(canned_sites("all"))
    }

    async fn list_sites_by_resource_group(&self, resource_group: &str) -> Result<SiteCollection> {
        self.record(Call::ListSitesByResourceGroup(resource_group.into()))?;
        Ok(canned_sites(resource_group))
    }

    async fn get_site(&self, resource_group: &str, name: &str) -> Result<Site> {
        self.record(Call::GetSite(resource_group.into(), name.into()))?;
        Ok(canned_site(resource_group, name))
    }

    async fn create_or_update_site(
        &self,
        resource_group: &str,
        name: &str,
        site: &Site,
    ) -> Result<Site> {
        self.record(Call::CreateOrUpdateSite(
            resource_group.into(),
            name.into(),
            site.clone(),
        ))?;
        Ok(canned_site(resource_group, name))
    }

    async fn delete_site(&self, resource_group: &str, name: &str) -> Result<()> {
        self.record(Call::DeleteSite(resource_group.into(), name.into()))
    }

    async fn list_site_slots(&self, resource_group: &str, name: &str) -> Result<SiteCollection> {
        self.record(Call::ListSiteSlots(resource_group.into(), name.into()))?;
        Ok(SiteCollection {
            value: vec![canned_site(resource_group, &format!("{name}/staging"))],
            next_link: None,
        })
    }

    async fn get_site_config(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<SiteConfigResource> {
        self.record(Call::GetSiteConfig(resource_group.into(), name.into()))?;
        Ok(canned_config(resource_group, name))
    }

    async fn update_site_config(
        &self,
        resource_group: &str,
        name: &str,
        config: &SiteConfigResource,
    ) -> Result<SiteConfigResource> {
        self.record(Call::UpdateSiteConfig(
            resource_group.into(),
            name.into(),
            config.clone(),
        ))?;
        Ok(config.clone())
    }

    async fn list_app_settings(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<StringDictionary> {
        self.record(Call::ListAppSettings(resource_group.into(), name.into()))?;
        Ok(canned_settings(name))
    }

    async fn update_app_settings(
        &self,
        resource_group: &str,
        name: &str,
        settings: &StringDictionary,
    ) -> Result<StringDictionary> {
        self.record(Call::UpdateAppSettings(
            resource_group.into(),
            name.into(),
            settings.clone(),
        ))?;
        Ok(settings.clone())
    }

    async fn list_site_usages(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<CsmUsageQuotaCollection> {
        self.record(Call::ListSiteUsages(resource_group.into(), name.into()))?;
        Ok(canned_usages(name))
    }

    async fn list_publishing_profile_xml(
        &self,
        resource_group: &str,
        name: &str,
        _options: &CsmPublishingProfileOptions,
    ) -> Result<Vec<u8>> {
        self.record(Call::ListPublishingProfileXml(
            resource_group.into(),
            name.into(),
        ))?;
        Ok(self
            .publish_profile
            .clone()
            .unwrap_or_else(|| PUBLISH_PROFILE.as_bytes().to_vec()))
    }

    async fn restart_site(
        &self,
        resource_group: &str,
        name: &str,
        soft_restart: bool,
    ) -> Result<()> {
        self.record(Call::RestartSite(
            resource_group.into(),
            name.into(),
            soft_restart,
        ))
    }

    async fn get_server_farm(&self, resource_group: &str, name: &str) -> Result<AppServicePlan> {
        self.record(Call::GetServerFarm(resource_group.into(), name.into()))?;
        Ok(canned_plan(resource_group, name))
    }
}

#[async_trait]
impl ResourceManagement for FakeProvider {
    async fn resource_group_exists(&self, name: &str) -> Result<bool> {
        self.record(Call::ResourceGroupExists(name.into()))?;
        Ok(self.resource_group_exists)
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ResourceGroup> {
        self.record(Call::CreateOrUpdateResourceGroup(
            name.into(),
            group.clone(),
        ))?;
        Ok(group.clone())
    }
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
