use tabled::Table;

use super::{connect, load_settings, spinner};
use crate::{
    error, info, success,
    types::{AppSettingTableRow, SiteTableRow},
    warning,
};

/// Prints a table of the web apps in the subscription or in one resource group.
pub async fn list(resource_group: Option<String>) {
    let client = connect(&load_settings()).await;

    let result = match &resource_group {
        Some(rg) => client.list_web_apps(rg).await,
        None => client.list_all_web_apps().await,
    };

    let sites = match result {
        Ok(collection) => collection.value,
        Err(e) => error!("Failed to list web apps. Err: {}", e),
    };

    if sites.is_empty() {
        warning!("No web apps found.");
        return;
    }

    let mut rows: Vec<SiteTableRow> = sites.iter().map(SiteTableRow::from).collect();
    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    println!("{}", Table::new(rows));
    info!("{} web app(s)", sites.len());
}

pub async fn show(resource_group: String, web_app: String) {
    let client = connect(&load_settings()).await;

    match client.get_web_app(&resource_group, &web_app).await {
        Ok(site) => match serde_json::to_string_pretty(&site) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot render web app. Err: {}", e),
        },
        Err(e) => error!("Failed to fetch {}. Err: {}", web_app, e),
    }
}

/// Prints the app settings of a web app, sorted by key.
pub async fn settings(resource_group: String, web_app: String) {
    let client = connect(&load_settings()).await;

    let settings = match client.get_web_app_settings(&resource_group, &web_app).await {
        Ok(dictionary) => dictionary.properties,
        Err(e) => error!("Failed to fetch app settings. Err: {}", e),
    };

    if settings.is_empty() {
        warning!("{} has no app settings.", web_app);
        return;
    }

    let mut rows: Vec<AppSettingTableRow> = settings
        .into_iter()
        .map(|(key, value)| AppSettingTableRow { key, value })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    println!("{}", Table::new(rows));
}

pub async fn deploy(resource_group: String, location: String, web_app: String) {
    let client = connect(&load_settings()).await;

    info!(
        "Deploying {} to {} ({}) on plan {}",
        web_app,
        resource_group,
        location,
        client.app_service_plan()
    );

    let pb = spinner("Creating or updating web app...");
    let result = client
        .create_or_update_web_app(&resource_group, &location, &web_app)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(site) => {
            let host = site.properties.default_host_name.unwrap_or_default();
            success!("{} deployed. {}", web_app, host);
        }
        Err(e) => error!("Failed to deploy {}. Err: {}", web_app, e),
    }
}

pub async fn delete(resource_group: String, web_app: String) {
    let client = connect(&load_settings()).await;

    match client.delete_web_app(&resource_group, &web_app).await {
        Ok(()) => success!("Deleted {}.", web_app),
        Err(e) => error!("Failed to delete {}. Err: {}", web_app, e),
    }
}

pub async fn publish_profile(resource_group: String, web_app: String) {
    let client = connect(&load_settings()).await;

    match client
        .get_publish_profile_xml(&resource_group, &web_app)
        .await
    {
        Ok(xml) => println!("{}", xml),
        Err(e) => error!("Failed to fetch publish profile. Err: {}", e),
    }
}
