use serde::{Deserialize, Serialize};

/// A single nutrient row as shown on a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_daily_value: Option<f64>,
}

impl Nutrient {
    pub fn new(name: &str, amount: f64, unit: &str) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            percent_daily_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macronutrients {
    pub carbohydrates: Nutrient,
    pub proteins: Nutrient,
    pub fats: Nutrient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    pub serving_size: String,
    pub calories: f64,
    pub macronutrients: Macronutrients,
    pub micronutrients: Vec<Nutrient>,
    pub sugar: Nutrient,
    pub sodium: Nutrient,
    pub fiber: Nutrient,
    pub allergens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredients {
    pub list: Vec<String>,
    pub is_organic: bool,
    #[serde(rename = "isGMO")]
    pub is_gmo: bool,
    pub is_processed: bool,
    pub additives: Vec<String>,
}

/// Immutable product facts, either baked into the static catalog or mapped
/// from a remote nutrition document. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub package_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub made_in: Option<String>,
    pub nutritional_info: NutritionalInfo,
    pub ingredients: Ingredients,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitableFor {
    pub first_trimester: bool,
    pub second_trimester: bool,
    pub third_trimester: bool,
    pub lactating: bool,
    pub infants: bool,
}

/// Derived safety verdict. Recomputed per remote lookup; pre-baked for
/// catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAnalysis {
    pub is_safe: bool,
    pub nutritional_score: i32,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub suitable_for: SuitableFor,
}

/// A product record together with its safety analysis, the unit every
/// lookup path returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub analysis: SafetyAnalysis,
}

/// Discriminated lookup envelope: `{success: true, data}` or
/// `{success: false, error}`.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResponse {
    pub fn ok(info: ProductInfo) -> Self {
        Self {
            success: true,
            data: Some(info),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SafetyResponse {
    pub barcode: String,
    pub safe: bool,
}

#[derive(Debug, Serialize)]
pub struct SuitabilityResponse {
    pub barcode: String,
    pub stage: super::catalog::PregnancyStage,
    pub suitable: bool,
}
