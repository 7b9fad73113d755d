use crate::enrich;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use compass_store::Competitor;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// API error body.
#[derive(Serialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error detail.
    pub detail: String,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Competitor row as returned by the update endpoints.
#[derive(Serialize, ToSchema)]
pub struct CompetitorResponse {
    pub id: i64,
    pub competitor_name: String,
    pub competitor_positioning: Option<String>,
}

impl From<Competitor> for CompetitorResponse {
    fn from(row: Competitor) -> Self {
        Self {
            id: row.id,
            competitor_name: row.competitor_name,
            competitor_positioning: row.competitor_positioning,
        }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
struct HealthResponse {
    status: String,
}

/// Batch response when no rows need updating.
#[derive(Serialize, ToSchema)]
struct BatchStatusResponse {
    status: String,
}

/// Batch response after a processing pass.
///
/// Rows that failed are logged and dropped from the result; their absence
/// is only visible as a lower `total_processed` count.
#[derive(Serialize, ToSchema)]
struct BatchUpdateResponse {
    status: String,
    total_processed: usize,
    updated_competitors: Vec<CompetitorResponse>,
}

/// Service health check.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
async fn health() -> impl IntoResponse {
    tracing::debug!("Health check endpoint called");
    Json(HealthResponse {
        status: "API is running".to_string(),
    })
}

/// Regenerate the positioning analysis for a single competitor.
#[utoipa::path(
    post,
    path = "/update-single/{competitor_id}",
    tag = "Competitors",
    params(
        ("competitor_id" = i64, Path, description = "Competitor primary key")
    ),
    responses(
        (status = 200, description = "Updated competitor", body = CompetitorResponse),
        (status = 404, description = "Competitor not found", body = ApiError),
        (status = 500, description = "Analysis or store failure", body = ApiError)
    )
)]
async fn update_single(
    State(state): State<AppState>,
    Path(competitor_id): Path<i64>,
) -> Response {
    tracing::info!(id = competitor_id, "Received request to update competitor");

    let competitor = match state.store.get_by_id(competitor_id).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            tracing::error!(id = competitor_id, "No competitor found");
            return error_response(StatusCode::NOT_FOUND, "Competitor not found");
        }
        Err(e) => {
            tracing::error!(id = competitor_id, error = %e, "Failed to load competitor");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    match enrich::update_competitor_positioning(&state, competitor_id, &competitor.competitor_name)
        .await
    {
        Ok(updated) => (StatusCode::OK, Json(CompetitorResponse::from(updated))).into_response(),
        Err(e) => {
            tracing::error!(id = competitor_id, error = %e, "Error processing request");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
        }
    }
}

/// Regenerate positioning analyses for every competitor still missing one.
///
/// Rows are processed strictly sequentially; a failing row is logged and
/// skipped, never retried.
#[utoipa::path(
    post,
    path = "/update-all",
    tag = "Competitors",
    responses(
        (status = 200, description = "Batch result", body = BatchUpdateResponse),
        (status = 500, description = "Initial select failed", body = ApiError)
    )
)]
async fn update_all(State(state): State<AppState>) -> Response {
    tracing::info!("Starting batch update of all competitors");

    let pending = match state.store.list_missing_positioning().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Error in batch update");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    if pending.is_empty() {
        tracing::info!("No competitors found needing positioning analysis");
        return (
            StatusCode::OK,
            Json(BatchStatusResponse {
                status: "No competitors found needing updates".to_string(),
            }),
        )
            .into_response();
    }

    tracing::info!(count = pending.len(), "Found competitors to process");

    let mut updated_competitors = Vec::new();
    for competitor in pending {
        match enrich::update_competitor_positioning(
            &state,
            competitor.id,
            &competitor.competitor_name,
        )
        .await
        {
            Ok(updated) => {
                tracing::info!(
                    competitor = %competitor.competitor_name,
                    "Successfully processed competitor"
                );
                updated_competitors.push(CompetitorResponse::from(updated));
            }
            Err(e) => {
                tracing::error!(
                    competitor = %competitor.competitor_name,
                    error = %e,
                    "Error processing competitor"
                );
            }
        }
    }

    (
        StatusCode::OK,
        Json(BatchUpdateResponse {
            status: "success".to_string(),
            total_processed: updated_competitors.len(),
            updated_competitors,
        }),
    )
        .into_response()
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(update_single))
        .routes(routes!(update_all))
}
