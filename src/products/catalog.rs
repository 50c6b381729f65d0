use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use serde::Serialize;

use super::dto::ProductInfo;
use crate::error::LookupError;

/// Threshold for the catalog convenience check. Distinct from the scorer's
/// `is_safe` cutoff of 50; the catalog path has always asked for 70.
pub const CATALOG_SAFE_SCORE: i32 = 70;

static EMBEDDED_CATALOG: &str = include_str!("../../data/products.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PregnancyStage {
    FirstTrimester,
    SecondTrimester,
    ThirdTrimester,
}

impl FromStr for PregnancyStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" | "firstTrimester" => Ok(Self::FirstTrimester),
            "second" | "secondTrimester" => Ok(Self::SecondTrimester),
            "third" | "thirdTrimester" => Ok(Self::ThirdTrimester),
            other => Err(format!("unknown pregnancy stage: {other}")),
        }
    }
}

/// Static barcode → product mapping, loaded once at startup and read-only
/// afterwards. Lookup is exact string match: no trimming, no leading-zero
/// normalization.
pub struct ProductCatalog {
    entries: HashMap<String, ProductInfo>,
}

impl ProductCatalog {
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let entries: HashMap<String, ProductInfo> =
            serde_json::from_str(json).context("parse product catalog")?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn barcodes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn lookup(&self, barcode: &str) -> Result<&ProductInfo, LookupError> {
        self.entries.get(barcode).ok_or(LookupError::NotFound)
    }

    /// Convenience check for the demo path: known product with an overall
    /// score of at least 70. Unknown barcodes are simply not safe.
    pub fn is_product_safe(&self, barcode: &str) -> bool {
        self.entries
            .get(barcode)
            .map(|p| p.analysis.nutritional_score >= CATALOG_SAFE_SCORE)
            .unwrap_or(false)
    }

    /// Per-trimester suitability flag, `None` when the barcode is unknown.
    pub fn pregnancy_suitability(&self, barcode: &str, stage: PregnancyStage) -> Option<bool> {
        let suitable = &self.entries.get(barcode)?.analysis.suitable_for;
        Some(match stage {
            PregnancyStage::FirstTrimester => suitable.first_trimester,
            PregnancyStage::SecondTrimester => suitable.second_trimester,
            PregnancyStage::ThirdTrimester => suitable.third_trimester,
        })
    }
}
