use super::dto::{SafetyAnalysis, SuitableFor};

/// Signals extracted from a raw nutrition record, all the scorer looks at.
#[derive(Debug, Clone, Default)]
pub struct ScoreFacts {
    pub additives: Vec<String>,
    /// grams per 100g
    pub sugar: f64,
    /// milligrams per 100g
    pub sodium: f64,
    pub ingredients_text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScorePolicy {
    /// Clamp the final score to [0, 100]. Off by default: penalties are
    /// allowed to stack past zero.
    pub clamp: bool,
}

pub const SUGAR_LIMIT_G: f64 = 10.0;
pub const SODIUM_LIMIT_MG: f64 = 400.0;
pub const SAFE_THRESHOLD: i32 = 50;
pub const RECOMMEND_THRESHOLD: i32 = 70;

pub const WARN_ADDITIVES: &str = "Contains artificial additives";
pub const WARN_SUGAR: &str = "High sugar content";
pub const WARN_SODIUM: &str = "High sodium content";
pub const WARN_RAW: &str =
    "Contains raw/unpasteurized ingredients - not safe during pregnancy";

pub const RECOMMEND_ORGANIC: &str = "Consider organic alternatives";
pub const RECOMMEND_FEWER_ADDITIVES: &str = "Look for products with fewer additives";

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RuleHit {
    pub penalty: i32,
    pub warning: &'static str,
    pub bars_pregnancy: bool,
}

fn additives_rule(facts: &ScoreFacts) -> Option<RuleHit> {
    (!facts.additives.is_empty()).then_some(RuleHit {
        penalty: 10,
        warning: WARN_ADDITIVES,
        bars_pregnancy: false,
    })
}

fn sugar_rule(facts: &ScoreFacts) -> Option<RuleHit> {
    (facts.sugar > SUGAR_LIMIT_G).then_some(RuleHit {
        penalty: 15,
        warning: WARN_SUGAR,
        bars_pregnancy: false,
    })
}

fn sodium_rule(facts: &ScoreFacts) -> Option<RuleHit> {
    (facts.sodium > SODIUM_LIMIT_MG).then_some(RuleHit {
        penalty: 15,
        warning: WARN_SODIUM,
        bars_pregnancy: false,
    })
}

fn raw_ingredients_rule(facts: &ScoreFacts) -> Option<RuleHit> {
    let text = facts.ingredients_text.to_lowercase();
    (text.contains("raw") || text.contains("unpasteurized")).then_some(RuleHit {
        penalty: 50,
        warning: WARN_RAW,
        bars_pregnancy: true,
    })
}

/// Each rule inspects the facts in isolation. They carry no ordering
/// dependency beyond the cumulative subtraction, which is commutative.
pub(crate) const RULES: [fn(&ScoreFacts) -> Option<RuleHit>; 4] = [
    additives_rule,
    sugar_rule,
    sodium_rule,
    raw_ingredients_rule,
];

/// Score a raw nutrition record. Deterministic: identical facts always
/// produce the identical analysis.
pub fn score(facts: &ScoreFacts, policy: ScorePolicy) -> SafetyAnalysis {
    let mut nutritional_score = 100i32;
    let mut warnings = Vec::new();
    let mut suitable_for = SuitableFor {
        first_trimester: true,
        second_trimester: true,
        third_trimester: true,
        lactating: true,
        infants: false,
    };

    for rule in RULES {
        if let Some(hit) = rule(facts) {
            nutritional_score -= hit.penalty;
            warnings.push(hit.warning.to_string());
            if hit.bars_pregnancy {
                suitable_for.first_trimester = false;
                suitable_for.second_trimester = false;
                suitable_for.third_trimester = false;
            }
        }
    }

    if policy.clamp {
        nutritional_score = nutritional_score.clamp(0, 100);
    }

    let mut recommendations = Vec::new();
    if nutritional_score < RECOMMEND_THRESHOLD {
        recommendations.push(RECOMMEND_ORGANIC.to_string());
        recommendations.push(RECOMMEND_FEWER_ADDITIVES.to_string());
    }

    SafetyAnalysis {
        is_safe: nutritional_score > SAFE_THRESHOLD,
        nutritional_score,
        warnings,
        recommendations,
        suitable_for,
    }
}
