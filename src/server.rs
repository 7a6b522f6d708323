use std::{net::SocketAddr, sync::Arc};

use axum::{
    Extension, Router,
    extract::Path,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    api::{self, webapp},
    management::WebAppManagementClient,
};

/// `PUT` handler for a static GET route of the form `/{prefix}/{a}/{b}`.
///
/// Static segments win over parameters regardless of the method, so
/// `PUT /slots/westeurope/app1` lands on the slots route and is forwarded
/// with `prefix` as the resource group.
macro_rules! put_in {
    ($resource_group:literal) => {
        |client: webapp::Client, Path((location, web_app)): Path<(String, String)>| async move {
            webapp::create_or_update_in(client, $resource_group, &location, &web_app).await
        }
    };
}

/// Builds the application router around one shared management client.
pub fn router(client: Arc<WebAppManagementClient>) -> Router {
    // The two catch-all routes share their leading parameter names so the
    // router accepts them side by side; handlers extract by position.
    let webapp_routes = Router::new()
        .route("/all", get(webapp::list_all))
        .route(
            "/all/resourcegroup/{resource_group}",
            get(webapp::list_by_resource_group).put(
                |client: webapp::Client, Path(web_app): Path<String>| async move {
                    webapp::create_or_update_in(client, "all", "resourcegroup", &web_app).await
                },
            ),
        )
        .route(
            "/usagequota/{resource_group}/{web_app}",
            get(webapp::usage_quota).put(put_in!("usagequota")),
        )
        .route(
            "/webAppConfig/{resource_group}/{web_app}",
            get(webapp::config).put(put_in!("webAppConfig")),
        )
        .route(
            "/appSettings/{resource_group}/{web_app}",
            get(webapp::app_settings).put(put_in!("appSettings")),
        )
        .route(
            "/slots/{resource_group}/{web_app}",
            get(webapp::slots).put(put_in!("slots")),
        )
        .route(
            "/appServicePlan/{resource_group}/{plan}",
            get(webapp::app_service_plan).put(put_in!("appServicePlan")),
        )
        .route(
            "/publishProfile/{resource_group}/{web_app}",
            get(webapp::publish_profile).put(put_in!("publishProfile")),
        )
        .route(
            "/{resource_group}/{segment}",
            get(webapp::get_web_app).delete(webapp::delete),
        )
        .route(
            "/{resource_group}/{segment}/{web_app}",
            put(webapp::create_or_update),
        );

    Router::new()
        .route("/health", get(api::health))
        .nest("/api/webapp", webapp_routes)
        .layer(Extension(client))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(
    addr: SocketAddr,
    client: Arc<WebAppManagementClient>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %listener.local_addr()?, "api server listening");
    axum::serve(listener, router(client)).await
}
