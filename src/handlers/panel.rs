use actix_web::{web, HttpResponse, Result};

use crate::models::{ErrorResponse, IngestResponse, SearchResultBatch};
use crate::panel::HandleOutcome;
use crate::services::PanelService;
use crate::AppState;

pub async fn push_keywords(
    state: web::Data<AppState>,
    batch: web::Json<SearchResultBatch>,
) -> Result<HttpResponse> {
    Ok(ingest(&state.panel_service, &batch).await)
}

/// Applies a batch and builds the HTTP response shared by the keyword and
/// broadcast endpoints.
pub(crate) async fn ingest(service: &PanelService, batch: &SearchResultBatch) -> HttpResponse {
    let response = match service.handle_keywords(batch).await {
        (HandleOutcome::Ignored, group_count) => IngestResponse {
            status: "ignored".to_string(),
            group_id: None,
            evicted_group_id: None,
            group_count,
        },
        (HandleOutcome::Added { group_id, evicted }, group_count) => IngestResponse {
            status: "added".to_string(),
            group_id: Some(group_id),
            evicted_group_id: evicted,
            group_count,
        },
    };
    HttpResponse::Ok().json(response)
}

pub async fn clear_results(state: web::Data<AppState>) -> Result<HttpResponse> {
    state.panel_service.clear_results().await;
    Ok(HttpResponse::Ok().json(state.panel_service.snapshot().await))
}

pub async fn activate_control(
    state: web::Data<AppState>,
    element_id: web::Path<String>,
) -> Result<HttpResponse> {
    match state.panel_service.activate(&element_id).await {
        Some(action) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "element_id": element_id.as_str(),
            "action": action,
        }))),
        None => Ok(HttpResponse::NotFound().json(ErrorResponse::with_details(
            "Control not bound",
            format!("No action is bound to #{}", element_id.as_str()),
        ))),
    }
}

pub async fn panel_snapshot(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.panel_service.snapshot().await))
}
