use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::meals::dto::Meal;
use crate::products::dto::LookupResponse;

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    /// Day label scanned items are filed under, e.g. "Monday".
    pub day: String,
}

#[derive(Debug, Serialize)]
pub struct OpenSessionResponse {
    pub id: Uuid,
    pub day: String,
}

/// Outcome of offering one detection to a scan session.
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<Meal>,
}

impl ScanOutcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
            lookup: None,
            meal: None,
        }
    }
}
