mod agenda;
mod backend;
mod config;
mod error;
mod middleware;
mod models;
mod rbac;
mod routes;
mod table;

use std::sync::Arc;

use crate::{backend::HttpBackend, config::Config, models::AppState};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let backend = HttpBackend::new(&cfg.backend_base_url, cfg.backend_timeout_secs)?;

    let state = AppState {
        backend: Arc::new(backend),
        page_size: cfg.page_size,
    };

    // Allow the browser frontend to call the panel API (OPTIONS preflight
    // would otherwise 405 and block POST /auth/login).
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    tracing::info!("Proxying clinic backend at {}", cfg.backend_base_url);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
