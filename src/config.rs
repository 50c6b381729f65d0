use serde::Deserialize;

const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org/api/v2";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Open Food Facts v2 API.
    pub off_base_url: String,
    /// Per-request timeout for remote lookups. Single attempt, no retry.
    pub http_timeout_secs: u64,
    /// Whether nutritional scores are clamped to [0, 100]. Off by default:
    /// repeated penalties can legitimately drive a score negative.
    pub clamp_scores: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let off_base_url =
            std::env::var("OFF_BASE_URL").unwrap_or_else(|_| DEFAULT_OFF_BASE_URL.into());
        let http_timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        let clamp_scores = std::env::var("CLAMP_SCORES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self {
            off_base_url,
            http_timeout_secs,
            clamp_scores,
        })
    }
}
