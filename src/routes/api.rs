use crate::handlers;
use crate::models::ErrorResponse;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse, Scope};

pub fn config() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health_check))
        .route("/keywords", web::post().to(handlers::push_keywords))
        .route("/broadcast", web::post().to(handlers::broadcast))
        .route("/clear", web::post().to(handlers::clear_results))
        .route(
            "/controls/{element_id}",
            web::post().to(handlers::activate_control),
        )
        .route("/panel", web::get().to(handlers::panel_snapshot))
}

pub fn pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/panel", web::get().to(handlers::panel_fragment))
        .route("/panel/stream", web::get().to(handlers::panel_stream));
}

/// JSON extractor settings; body errors come back as an `ErrorResponse`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            tracing::warn!("Rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(ErrorResponse::with_details(
                "Invalid request",
                err.to_string(),
            ));
            InternalError::from_response(err, response).into()
        })
}
