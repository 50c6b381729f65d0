use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    #[serde(rename = "Scanned Item")]
    ScannedItem,
}

/// Nutritional snapshot frozen into a meal at creation time. For scanned
/// items the warning/recommendation fields mirror the safety analysis that
/// was current when the scan happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealNutritionalInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub safe_for_pregnancy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub description: String,
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<MealNutritionalInfo>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub description: String,
    pub day: String,
    #[serde(default)]
    pub nutritional_info: Option<MealNutritionalInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MealsQuery {
    pub day: Option<String>,
}
