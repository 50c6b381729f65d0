use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{
    Ingredients, Macronutrients, Nutrient, NutritionalInfo, ProductInfo, ProductRecord,
};
use super::scoring::{score, ScoreFacts, ScorePolicy};
use crate::config::AppConfig;
use crate::error::LookupError;

/// Remote nutrition data source. One outbound request per lookup, no retry;
/// a missing product maps to `Ok(None)`, transport and parse failures to
/// `LookupError::Transport`.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn product_info(&self, barcode: &str) -> Result<Option<ProductInfo>, LookupError>;
}

/// Open Food Facts v2 document, reduced to the fields the mapper reads.
/// Nutriment values arrive as numbers or strings depending on the product,
/// so they stay as raw JSON until extraction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub categories_tags: Vec<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub nutriments: serde_json::Map<String, Value>,
    #[serde(default)]
    pub allergens_tags: Vec<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub ingredients_text_en: Option<String>,
    #[serde(default)]
    pub labels_tags: Vec<String>,
    #[serde(default)]
    pub additives_tags: Vec<String>,
    #[serde(default)]
    pub ingredients_from_palm_oil_tags: Vec<String>,
    #[serde(default)]
    pub ingredients_that_may_be_from_palm_oil_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OffEnvelope {
    #[serde(default)]
    product: Option<OffProduct>,
}

pub struct OpenFoodFacts {
    client: reqwest::Client,
    base_url: String,
    policy: ScorePolicy,
}

impl OpenFoodFacts {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.off_base_url.trim_end_matches('/').to_string(),
            policy: ScorePolicy {
                clamp: config.clamp_scores,
            },
        })
    }
}

#[async_trait]
impl NutritionSource for OpenFoodFacts {
    async fn product_info(&self, barcode: &str) -> Result<Option<ProductInfo>, LookupError> {
        let url = format!("{}/product/{}", self.base_url, barcode);
        debug!(%barcode, %url, "remote product lookup");

        let envelope: OffEnvelope = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!(%barcode, error = %e, "remote lookup request failed");
                LookupError::Transport(e)
            })?
            .json()
            .await
            .map_err(|e| {
                warn!(%barcode, error = %e, "remote lookup returned unparseable body");
                LookupError::Transport(e)
            })?;

        Ok(envelope
            .product
            .map(|p| map_product(barcode, &p, self.policy)))
    }
}

/// Map a raw Open Food Facts document into the internal record and score it.
pub fn map_product(barcode: &str, off: &OffProduct, policy: ScorePolicy) -> ProductInfo {
    let facts = ScoreFacts {
        additives: off.additives_tags.clone(),
        sugar: nutriment(&off.nutriments, "sugars_100g"),
        sodium: nutriment(&off.nutriments, "sodium_100g"),
        ingredients_text: off.ingredients_text.clone().unwrap_or_default(),
    };
    let analysis = score(&facts, policy);

    let record = ProductRecord {
        barcode: barcode.to_string(),
        name: off.product_name.clone().unwrap_or_default(),
        brand: off.brands.clone().unwrap_or_default(),
        category: off
            .categories_tags
            .first()
            .cloned()
            .unwrap_or_else(|| "Unknown".into()),
        package_size: off
            .quantity
            .clone()
            .unwrap_or_else(|| "Not specified".into()),
        made_in: None,
        nutritional_info: NutritionalInfo {
            serving_size: off
                .serving_size
                .clone()
                .unwrap_or_else(|| "Not specified".into()),
            calories: nutriment(&off.nutriments, "energy_100g"),
            macronutrients: Macronutrients {
                carbohydrates: Nutrient::new(
                    "Carbohydrates",
                    nutriment(&off.nutriments, "carbohydrates_100g"),
                    "g",
                ),
                proteins: Nutrient::new(
                    "Proteins",
                    nutriment(&off.nutriments, "proteins_100g"),
                    "g",
                ),
                fats: Nutrient::new("Fats", nutriment(&off.nutriments, "fat_100g"), "g"),
            },
            micronutrients: extract_micronutrients(&off.nutriments),
            sugar: Nutrient::new("Sugar", facts.sugar, "g"),
            sodium: Nutrient::new("Sodium", facts.sodium, "mg"),
            fiber: Nutrient::new("Fiber", nutriment(&off.nutriments, "fiber_100g"), "g"),
            allergens: off.allergens_tags.clone(),
        },
        ingredients: Ingredients {
            list: off
                .ingredients_text_en
                .as_deref()
                .map(|t| t.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            is_organic: off.labels_tags.iter().any(|t| t == "organic"),
            is_gmo: off.labels_tags.iter().any(|t| t == "non-gmo"),
            is_processed: is_processed(off),
            additives: off.additives_tags.clone(),
        },
    };

    ProductInfo { record, analysis }
}

/// A nutriment value may be a JSON number or a numeric string; anything else
/// (including absence) reads as zero. Strings parse by longest numeric
/// prefix, so a unit-suffixed "7.5 g" still yields 7.5.
fn nutriment(nutriments: &serde_json::Map<String, Value>, key: &str) -> f64 {
    match nutriments.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => numeric_prefix(s),
        _ => 0.0,
    }
}

fn numeric_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let mut value = 0.0;
    for i in 1..=s.len() {
        if !s.is_char_boundary(i) {
            continue;
        }
        // Rust accepts "inf"/"nan" spellings that a numeric document never
        // means; treat anything non-finite as unparsed.
        if let Ok(v) = s[..i].parse::<f64>() {
            if v.is_finite() {
                value = v;
            }
        }
    }
    value
}

const MICRONUTRIENT_KEYS: [&str; 8] = [
    "vitamin-a",
    "vitamin-c",
    "vitamin-d",
    "vitamin-e",
    "calcium",
    "iron",
    "zinc",
    "magnesium",
];

fn extract_micronutrients(nutriments: &serde_json::Map<String, Value>) -> Vec<Nutrient> {
    let mut out = Vec::new();
    for key in MICRONUTRIENT_KEYS {
        let amount = nutriment(nutriments, &format!("{key}_100g"));
        if amount != 0.0 {
            out.push(Nutrient::new(
                &micronutrient_name(key),
                amount,
                micronutrient_unit(key),
            ));
        }
    }
    out
}

fn micronutrient_name(key: &str) -> String {
    let mut chars = key.chars();
    let head = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or_default();
    let tail: String = chars.collect();
    format!("{head}{}", tail.replacen('-', " ", 1))
}

fn micronutrient_unit(key: &str) -> &'static str {
    match key {
        "vitamin-a" | "vitamin-d" => "IU",
        _ => "mg",
    }
}

fn is_processed(off: &OffProduct) -> bool {
    !off.additives_tags.is_empty()
        || !off.ingredients_from_palm_oil_tags.is_empty()
        || !off.ingredients_that_may_be_from_palm_oil_tags.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn off_from_json(v: Value) -> OffProduct {
        serde_json::from_value(v).expect("off product deserializes")
    }

    #[test]
    fn maps_a_full_document() {
        let off = off_from_json(json!({
            "product_name": "Wholegrain Infant Cereal",
            "brands": "Nestle",
            "categories_tags": ["en:baby-foods", "en:cereals"],
            "quantity": "400 g",
            "serving_size": "25 g",
            "nutriments": {
                "energy_100g": 380,
                "carbohydrates_100g": 72.5,
                "proteins_100g": "9.8",
                "fat_100g": 4.1,
                "sugars_100g": 6.0,
                "sodium_100g": 120,
                "fiber_100g": 5.2,
                "iron_100g": 12,
                "vitamin-d_100g": 7.5
            },
            "allergens_tags": ["en:gluten", "en:milk"],
            "ingredients_text": "wheat flour, skimmed milk powder, iron",
            "ingredients_text_en": "wheat flour, skimmed milk powder, iron",
            "labels_tags": ["organic"]
        }));

        let info = map_product("681131457378", &off, ScorePolicy::default());
        assert_eq!(info.record.barcode, "681131457378");
        assert_eq!(info.record.category, "en:baby-foods");
        assert_eq!(info.record.package_size, "400 g");
        assert_eq!(info.record.nutritional_info.macronutrients.proteins.amount, 9.8);
        assert_eq!(info.record.nutritional_info.sugar.amount, 6.0);
        assert!(info.record.ingredients.is_organic);
        assert!(!info.record.ingredients.is_processed);
        assert_eq!(
            info.record.ingredients.list,
            vec!["wheat flour", " skimmed milk powder", " iron"]
        );

        // iron and vitamin-d present, the other six keys absent
        let micro = &info.record.nutritional_info.micronutrients;
        assert_eq!(micro.len(), 2);
        assert_eq!(micro[0], Nutrient::new("Vitamin d", 7.5, "IU"));
        assert_eq!(micro[1], Nutrient::new("Iron", 12.0, "mg"));

        assert_eq!(info.analysis.nutritional_score, 100);
        assert!(info.analysis.is_safe);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let off = off_from_json(json!({}));
        let info = map_product("123", &off, ScorePolicy::default());
        assert_eq!(info.record.name, "");
        assert_eq!(info.record.category, "Unknown");
        assert_eq!(info.record.package_size, "Not specified");
        assert_eq!(info.record.nutritional_info.serving_size, "Not specified");
        assert_eq!(info.record.nutritional_info.calories, 0.0);
        assert!(info.record.ingredients.list.is_empty());
        assert!(info.record.nutritional_info.micronutrients.is_empty());
    }

    #[test]
    fn additive_tags_mark_the_product_processed_and_penalize() {
        let off = off_from_json(json!({
            "additives_tags": ["en:e330"],
            "nutriments": { "sugars_100g": 2 }
        }));
        let info = map_product("456", &off, ScorePolicy::default());
        assert!(info.record.ingredients.is_processed);
        assert_eq!(info.analysis.nutritional_score, 90);
        assert_eq!(
            info.analysis.warnings,
            vec!["Contains artificial additives"]
        );
    }

    #[test]
    fn scoring_reads_the_untranslated_ingredient_text() {
        let off = off_from_json(json!({
            "ingredients_text": "lait cru, sel",
            "ingredients_text_en": "milk, salt"
        }));
        // "cru" does not trip the rule, but "raw" in the source text would
        let info = map_product("789", &off, ScorePolicy::default());
        assert!(info.analysis.suitable_for.first_trimester);

        let off = off_from_json(json!({
            "ingredients_text": "raw milk, salt",
            "ingredients_text_en": "pasteurized milk, salt"
        }));
        let info = map_product("789", &off, ScorePolicy::default());
        assert!(!info.analysis.suitable_for.first_trimester);
    }

    #[test]
    fn nutriment_extraction_handles_numbers_strings_and_junk() {
        let nutriments = match json!({
            "a_100g": 3.5,
            "b_100g": "7.25",
            "c_100g": "n/a",
            "d_100g": null,
            "e_100g": "7.5 g",
            "f_100g": "-0.5mg of sodium",
            "g_100g": "  12e1 kJ"
        }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        assert_eq!(nutriment(&nutriments, "a_100g"), 3.5);
        assert_eq!(nutriment(&nutriments, "b_100g"), 7.25);
        assert_eq!(nutriment(&nutriments, "c_100g"), 0.0);
        assert_eq!(nutriment(&nutriments, "d_100g"), 0.0);
        assert_eq!(nutriment(&nutriments, "missing"), 0.0);
        // unit-suffixed strings read by numeric prefix
        assert_eq!(nutriment(&nutriments, "e_100g"), 7.5);
        assert_eq!(nutriment(&nutriments, "f_100g"), -0.5);
        assert_eq!(nutriment(&nutriments, "g_100g"), 120.0);
    }
}
