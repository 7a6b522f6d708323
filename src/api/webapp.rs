use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::error::ApiResult;
use crate::{
    management::WebAppManagementClient,
    types::{
        AppServicePlan, CsmUsageQuotaCollection, Site, SiteCollection, SiteConfigResource,
        StringDictionary,
    },
};

pub type Client = Extension<Arc<WebAppManagementClient>>;

pub async fn list_all(Extension(client): Client) -> ApiResult<Json<SiteCollection>> {
    Ok(Json(client.list_all_web_apps().await?))
}

pub async fn list_by_resource_group(
    Extension(client): Client,
    Path(resource_group): Path<String>,
) -> ApiResult<Json<SiteCollection>> {
    Ok(Json(client.list_web_apps(&resource_group).await?))
}

pub async fn get_web_app(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<Json<Site>> {
    Ok(Json(client.get_web_app(&resource_group, &web_app).await?))
}

pub async fn usage_quota(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<Json<CsmUsageQuotaCollection>> {
    Ok(Json(
        client
            .get_web_app_usage_quota(&resource_group, &web_app)
            .await?,
    ))
}

pub async fn config(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<Json<SiteConfigResource>> {
    Ok(Json(
        client.get_web_app_config(&resource_group, &web_app).await?,
    ))
}

pub async fn app_settings(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<Json<StringDictionary>> {
    Ok(Json(
        client
            .get_web_app_settings(&resource_group, &web_app)
            .await?,
    ))
}

pub async fn slots(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<Json<SiteCollection>> {
    Ok(Json(client.get_web_app_slots(&resource_group, &web_app).await?))
}

pub async fn app_service_plan(
    Extension(client): Client,
    Path((resource_group, plan)): Path<(String, String)>,
) -> ApiResult<Json<AppServicePlan>> {
    Ok(Json(client.get_app_service_plan(&resource_group, &plan).await?))
}

pub async fn publish_profile(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let xml = client
        .get_publish_profile_xml(&resource_group, &web_app)
        .await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

pub async fn create_or_update(
    client: Client,
    Path((resource_group, location, web_app)): Path<(String, String, String)>,
) -> ApiResult<Json<Site>> {
    create_or_update_in(client, &resource_group, &location, &web_app).await
}

/// `PUT /{rg}/{location}/{app}` for a path the router already matched as a
/// static GET route, e.g. a resource group named `slots`.
pub async fn create_or_update_in(
    Extension(client): Client,
    resource_group: &str,
    location: &str,
    web_app: &str,
) -> ApiResult<Json<Site>> {
    Ok(Json(
        client
            .create_or_update_web_app(resource_group, location, web_app)
            .await?,
    ))
}

pub async fn delete(
    Extension(client): Client,
    Path((resource_group, web_app)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    client.delete_web_app(&resource_group, &web_app).await?;
    Ok(StatusCode::NO_CONTENT)
}
