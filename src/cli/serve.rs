use std::sync::Arc;

use crate::{config, error, info, server::start_api_server};

/// Starts the HTTP API on `address`, or on the configured server address.
pub async fn serve(address: Option<String>) {
    let settings = super::load_settings();
    let addr = match address {
        Some(address) => match config::parse_address(&address) {
            Ok(addr) => addr,
            Err(e) => error!("{}", e),
        },
        None => settings.server_address,
    };

    let client = Arc::new(super::connect(&settings).await);
    info!("Serving the web app API on http://{}", addr);

    if let Err(e) = start_api_server(addr, client).await {
        error!("API server stopped. Err: {}", e);
    }
}
