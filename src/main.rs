use std::sync::Arc;

use anyhow::Result;
use log::info;

use velaton::config::{self, Config};
use velaton::etuovi::etuovi::Etuovi;
use velaton::logger::setup_logger;
use velaton::{export, web};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config: Arc<Config> = Arc::new(config::read_config());

    let etuovi = Etuovi::init(&config).await?;
    let state = web::AppState::new(config.clone(), etuovi);

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    web::start_http_server(state, shutdown_rx).await;

    // Exported spreadsheets are ephemeral
    export::cleanup(&config.export_dir);
    info!("Shutdown complete");
    Ok(())
}
