//! # Bloglist API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::from_fn};
use tracing_actix_web::TracingLogger;

use bloglist_core::ports::TokenService;
use bloglist_infra::JwtTokenService;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry_from_env();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Bloglist API Server on {}:{}",
        config.host,
        config.port
    );

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let state = AppState::new(&config, tokens.clone()).await;

    HttpServer::new(move || {
        let state = state.clone();
        let tokens = tokens.clone();
        App::new()
            .wrap(from_fn(observability::request_id))
            .wrap(TracingLogger::default())
            .configure(move |cfg| handlers::configure_app(cfg, state, tokens))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_telemetry_from_env() {
    let telemetry = TelemetryConfig::from_env();
    telemetry::init_telemetry(&telemetry);
}
