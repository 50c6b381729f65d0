use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{OpenSessionRequest, OpenSessionResponse, ScanOutcome};
use super::format::format_name;
use super::gate::Detection;
use crate::meals::dto::{MealNutritionalInfo, MealType, NewMeal};
use crate::products::dto::{LookupResponse, ProductInfo};
use crate::products::services::get_product_info;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scans", post(open_session))
        .route("/scans/:id/detections", post(offer_detection))
}

#[instrument(skip(state))]
pub async fn open_session(
    State(state): State<AppState>,
    Json(body): Json<OpenSessionRequest>,
) -> (StatusCode, Json<OpenSessionResponse>) {
    let session = state.scans.open(body.day).await;
    (
        StatusCode::CREATED,
        Json(OpenSessionResponse {
            id: session.id,
            day: session.day.clone(),
        }),
    )
}

/// Feed one decoder event to a session. The first event above the
/// confidence threshold wins the one-shot gate, triggers the product
/// lookup, and files a "Scanned Item" meal; everything after that is
/// reported back as rejected so the caller knows to stop the decoder.
#[instrument(skip(state))]
pub async fn offer_detection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(detection): Json<Detection>,
) -> Result<Json<ScanOutcome>, (StatusCode, String)> {
    let session = state
        .scans
        .get(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "Scan session not found".into()))?;

    if session.is_closed() {
        return Ok(Json(ScanOutcome::rejected("session already handled a scan")));
    }
    if !session.offer(&detection) {
        let reason = if session.is_closed() {
            "session already handled a scan"
        } else {
            "confidence below acceptance threshold"
        };
        return Ok(Json(ScanOutcome::rejected(reason)));
    }

    info!(session = %session.id, code = %detection.code, confidence = detection.confidence, "scan accepted");

    let (lookup, meal) = match get_product_info(&state, &detection.code).await {
        Ok(product) => {
            let meal = state
                .meals
                .add(scanned_meal(&session.day, &detection, &product))
                .await;
            (LookupResponse::ok(product), Some(meal))
        }
        Err(e) => (LookupResponse::err(e.to_string()), None),
    };

    Ok(Json(ScanOutcome {
        accepted: true,
        reason: None,
        lookup: Some(lookup),
        meal,
    }))
}

fn scanned_meal(day: &str, detection: &Detection, product: &ProductInfo) -> NewMeal {
    let name = if product.record.name.is_empty() {
        format!("Product {}", detection.code)
    } else {
        product.record.name.clone()
    };
    let macros = &product.record.nutritional_info.macronutrients;
    NewMeal {
        meal_type: MealType::ScannedItem,
        description: format!(
            "{} ({}: {})",
            name,
            format_name(&detection.format),
            detection.code
        ),
        day: day.to_string(),
        nutritional_info: Some(MealNutritionalInfo {
            calories: product.record.nutritional_info.calories,
            protein: macros.proteins.amount,
            carbs: macros.carbohydrates.amount,
            fat: macros.fats.amount,
            safe_for_pregnancy: product.analysis.is_safe,
            warnings: Some(product.analysis.warnings.clone()),
            recommendations: Some(product.analysis.recommendations.clone()),
            nutritional_score: Some(product.analysis.nutritional_score),
        }),
    }
}
