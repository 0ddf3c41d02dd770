//! Doctor search service.
//!
//! Turns `{specialty, location}` requests into web searches and returns the
//! hits as doctor records. Needs `KABIRAJ__WEB_SEARCH__API_KEY`.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use kabiraj_assistant::adapters::http::{search_doctors_app, SearchServiceState};
use kabiraj_assistant::adapters::web_search::{TravilyConfig, TravilyWebSearch};
use kabiraj_assistant::application::SearchDoctorsHandler;
use kabiraj_assistant::config::AppConfig;
use kabiraj_assistant::telemetry::init_tracing;

/// Kabiraj doctor search HTTP service
#[derive(Parser, Debug)]
#[command(name = "search-doctors", version)]
struct Args {
    /// Port to listen on (overrides KABIRAJ__SERVER__PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (overrides KABIRAJ__SERVER__HOST)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    config.validate()?;
    init_tracing(&config.server.log_level, config.is_production());

    let web_search = &config.web_search;
    let travily = TravilyConfig::new(web_search.require_api_key()?.clone())
        .with_endpoint(web_search.endpoint.clone())
        .with_timeout(web_search.timeout());
    let handler = SearchDoctorsHandler::new(Arc::new(TravilyWebSearch::new(travily)?), web_search.num_results);

    let app = search_doctors_app(
        SearchServiceState::new(handler),
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr: SocketAddr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Doctor search service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Doctor search service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
