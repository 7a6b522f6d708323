use async_trait::async_trait;

use super::arm::ArmClient;
use crate::{error::Result, management::ResourceManagement, types::ResourceGroup};

pub const RESOURCES_API_VERSION: &str = "2021-04-01";

/// `Microsoft.Resources` handle bound to one subscription.
#[derive(Clone)]
pub struct ResourcesClient {
    arm: ArmClient,
}

impl ResourcesClient {
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn resource_group_path(&self, name: &str) -> String {
        format!("{}/resourcegroups/{name}", self.arm.subscription_path())
    }
}

#[async_trait]
impl ResourceManagement for ResourcesClient {
    async fn resource_group_exists(&self, name: &str) -> Result<bool> {
        self.arm
            .head_exists(&self.resource_group_path(name), RESOURCES_API_VERSION)
            .await
    }

    async fn create_or_update_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ResourceGroup> {
        self.arm
            .put_json(&self.resource_group_path(name), RESOURCES_API_VERSION, group)
            .await
    }
}
