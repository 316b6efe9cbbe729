//! nostr-pay server binary.
//!
//! Startup order matters: configuration and storage failures are fatal
//! because the server cannot answer correctly without them, so both abort
//! the process before the listener opens.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nostr_pay::adapters::http::{cors_layer, router, AppState};
use nostr_pay::adapters::lnbits::LnbitsClient;
use nostr_pay::adapters::sqlite::SqlitePaymentStore;
use nostr_pay::adapters::websocket::PaymentHub;
use nostr_pay::application::PaymentService;
use nostr_pay::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("configuration error: {e}");
        std::process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(config).await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = Path::new(&config.database.path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let store = Arc::new(SqlitePaymentStore::connect(&config.database).await?);
    tracing::info!(path = %config.database.path, "database ready");

    let issuer = Arc::new(LnbitsClient::new(&config.lnbits));
    let payments = Arc::new(PaymentService::new(
        store,
        issuer,
        &config.server.public_base_url(),
    ));
    let hub = Arc::new(PaymentHub::with_default_capacity());

    let app = router(
        AppState { payments, hub },
        cors_layer(&config.server.cors_origins_list()),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "nostr-pay server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
