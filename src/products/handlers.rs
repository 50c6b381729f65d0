use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use super::catalog::PregnancyStage;
use super::dto::{LookupResponse, SafetyResponse, SuitabilityResponse};
use super::services;
use crate::error::LookupError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/:barcode", get(get_product))
        .route("/products/:barcode/safety", get(get_safety))
        .route(
            "/products/:barcode/suitability/:stage",
            get(get_suitability),
        )
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> (StatusCode, Json<LookupResponse>) {
    match services::get_product_info(&state, &barcode).await {
        Ok(info) => (StatusCode::OK, Json(LookupResponse::ok(info))),
        Err(e @ LookupError::NotFound) => {
            (StatusCode::NOT_FOUND, Json(LookupResponse::err(e.to_string())))
        }
        Err(e) => {
            warn!(%barcode, error = %e, "lookup failed upstream");
            (
                StatusCode::BAD_GATEWAY,
                Json(LookupResponse::err(e.to_string())),
            )
        }
    }
}

#[instrument(skip(state))]
pub async fn get_safety(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Json<SafetyResponse> {
    let safe = state.catalog.is_product_safe(&barcode);
    Json(SafetyResponse { barcode, safe })
}

#[instrument(skip(state))]
pub async fn get_suitability(
    State(state): State<AppState>,
    Path((barcode, stage)): Path<(String, String)>,
) -> Result<Json<SuitabilityResponse>, (StatusCode, String)> {
    let stage: PregnancyStage = stage
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;
    let suitable = state
        .catalog
        .pregnancy_suitability(&barcode, stage)
        .ok_or((
            StatusCode::NOT_FOUND,
            "Product not found in database".to_string(),
        ))?;
    Ok(Json(SuitabilityResponse {
        barcode,
        stage,
        suitable,
    }))
}
