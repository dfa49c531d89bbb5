use actix_web::{web, HttpResponse, Result};
use tracing::{debug, info};

use crate::handlers::panel::ingest;
use crate::models::BroadcastMessage;
use crate::AppState;

/// Entry point for the recognition/translation bridge. Keyword batches go to
/// the panel; every other message kind is acknowledged.
pub async fn broadcast(
    state: web::Data<AppState>,
    message: web::Json<BroadcastMessage>,
) -> Result<HttpResponse> {
    match message.into_inner() {
        BroadcastMessage::Keywords(batch) => Ok(ingest(&state.panel_service, &batch).await),
        BroadcastMessage::Status(update) => {
            info!("Bridge status {}: {}", update.status, update.message);
            Ok(acknowledged("status"))
        }
        BroadcastMessage::Error(error) => {
            info!("Bridge reported error: {}", error.message);
            Ok(acknowledged("error"))
        }
        other => {
            debug!("Ignoring {} message", other.kind());
            Ok(acknowledged(other.kind()))
        }
    }
}

fn acknowledged(kind: &str) -> HttpResponse {
    HttpResponse::Accepted().json(serde_json::json!({
        "status": "acknowledged",
        "type": kind,
    }))
}
