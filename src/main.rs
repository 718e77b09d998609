// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::refinement_service::RefinementService;
use crate::application::workspace_service::WorkspaceService;
use crate::infrastructure::config::load_studio_config;
use crate::infrastructure::http_catalog::HttpCatalogRepository;
use crate::infrastructure::http_generation::HttpGenerationClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    chat, create_dashboard, generate_dashboard, get_dashboard, get_workspace, health_check,
    list_tables,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_studio_config()?;

    // Create collaborator clients (infrastructure layer)
    let catalog = Arc::new(HttpCatalogRepository::new(
        config.catalog.base_url,
        config.catalog.token,
    ));
    let generation = Arc::new(HttpGenerationClient::new(
        config.generation.base_url,
        config.generation.token,
    ));

    // Create services (application layer)
    let workspace_service = WorkspaceService::new(catalog);
    let refinement_service = RefinementService::new(generation);

    // Create application state
    let state = Arc::new(AppState {
        workspace_service,
        refinement_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/workspace", get(get_workspace))
        .route("/sources/:id/tables", get(list_tables))
        .route("/dashboards", post(create_dashboard))
        .route("/dashboards/generate", post(generate_dashboard))
        .route("/dashboards/:id", get(get_dashboard))
        .route("/dashboards/:id/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting dashboard-studio service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
