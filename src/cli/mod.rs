//! # CLI Module
//!
//! Command-line interface for azwebapp. Every command loads the settings,
//! builds one [`WebAppManagementClient`] and runs the same client operation
//! the HTTP API exposes, printing the result for a terminal instead of
//! returning JSON.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the HTTP API server
//! - [`list`] - Table of web apps in the subscription or one resource group
//! - [`show`] - Pretty-printed JSON of one web app
//! - [`settings`] - Table of a web app's app settings
//! - [`deploy`] - Creates or updates a web app
//! - [`delete`] - Deletes a web app
//! - [`publish_profile`] - Prints a web app's publish profile XML
//!
//! ## Error Handling
//!
//! Configuration and provider failures are fatal: they are printed with the
//! [`crate::error!`] macro, which exits with status 1.
//!
//! ## Usage Patterns
//!
//! ```bash
//! azwebapp serve --address 0.0.0.0:8080
//! azwebapp list --resource-group my-rg
//! azwebapp deploy my-rg westeurope my-app
//! azwebapp publish-profile my-rg my-app > my-app.PublishSettings
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Settings, error, management::WebAppManagementClient};

mod apps;
mod serve;

pub use apps::delete;
pub use apps::deploy;
pub use apps::list;
pub use apps::publish_profile;
pub use apps::settings;
pub use apps::show;
pub use serve::serve;

fn load_settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

async fn connect(settings: &Settings) -> WebAppManagementClient {
    let pb = spinner("Authenticating with Azure...");
    let client = WebAppManagementClient::connect(settings).await;
    pb.finish_and_clear();

    match client {
        Ok(client) => client,
        Err(e) => error!("Failed to authenticate. Err: {}", e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
