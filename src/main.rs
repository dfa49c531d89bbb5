mod config;
mod handlers;
mod models;
mod panel;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, SecurityConfig};
use handlers::health::not_found;
use routes::api;
use services::PanelService;

#[derive(Clone)]
pub struct AppState {
    pub panel_service: PanelService,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let panel_service =
            PanelService::new(config.panel.clear_trigger(), config.panel.stream_buffer);
        Self {
            panel_service,
            config,
            start_time: Instant::now(),
        }
    }
}

fn cors(security: &SecurityConfig) -> Cors {
    let cors = if security.allowed_origins.iter().any(|origin| origin == "*") {
        Cors::default().allow_any_origin()
    } else {
        security
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Registers shared state, extractor settings and every route.
fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(api::json_config(state.config.server.max_json_payload_size))
            .app_data(web::Data::new(state))
            .service(api::config())
            .configure(api::pages)
            .default_service(web::route().to(not_found));
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting keyword panel on port {}", config.server.port);
    match config.panel.clear_trigger() {
        Some(trigger) => info!("Clear control enabled as #{}", trigger.element_id),
        None => info!("Clear control disabled"),
    }

    let state = AppState::new(config.clone());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&state.config.security))
            .wrap(Logger::default())
            .configure(configure_app(state.clone()))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}
