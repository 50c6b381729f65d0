use tracing::{debug, info};

use super::dto::ProductInfo;
use crate::error::LookupError;
use crate::state::AppState;

/// Resolve a barcode: the static catalog first, then one remote request.
/// A catalog hit never touches the network. Transport failures propagate
/// with their kind intact; there is no retry.
pub async fn get_product_info(
    state: &AppState,
    barcode: &str,
) -> Result<ProductInfo, LookupError> {
    match state.catalog.lookup(barcode) {
        Ok(info) => {
            debug!(%barcode, "catalog hit");
            return Ok(info.clone());
        }
        Err(LookupError::NotFound) => {}
        Err(e) => return Err(e),
    }

    match state.nutrition.product_info(barcode).await? {
        Some(info) => {
            info!(%barcode, score = info.analysis.nutritional_score, "remote hit");
            Ok(info)
        }
        None => {
            debug!(%barcode, "barcode unknown to catalog and remote source");
            Err(LookupError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::remote::NutritionSource;
    use crate::products::scoring::{score, ScoreFacts, ScorePolicy};
    use crate::state::AppState;
    use axum::async_trait;
    use std::sync::Arc;

    struct CannedSource(Option<ProductInfo>);

    #[async_trait]
    impl NutritionSource for CannedSource {
        async fn product_info(
            &self,
            _barcode: &str,
        ) -> Result<Option<ProductInfo>, LookupError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl NutritionSource for FailingSource {
        async fn product_info(
            &self,
            _barcode: &str,
        ) -> Result<Option<ProductInfo>, LookupError> {
            // Build a real reqwest error by pointing at an unroutable URL
            // without performing IO: builder errors carry the Transport kind
            // just as network failures do.
            let err = reqwest::Client::new()
                .get("http://[invalid")
                .build()
                .unwrap_err();
            Err(LookupError::Transport(err))
        }
    }

    fn remote_info(barcode: &str) -> ProductInfo {
        let catalog = crate::products::catalog::ProductCatalog::embedded().expect("catalog");
        let mut info = catalog.lookup("737628064502").expect("seed entry").clone();
        info.record.barcode = barcode.to_string();
        info.analysis = score(&ScoreFacts::default(), ScorePolicy::default());
        info
    }

    #[tokio::test]
    async fn catalog_hit_wins_without_remote() {
        let state = AppState::fake();
        let info = get_product_info(&state, "737628064502")
            .await
            .expect("catalog entry resolves");
        assert_eq!(info.record.barcode, "737628064502");
    }

    #[tokio::test]
    async fn catalog_miss_falls_through_to_remote() {
        let mut state = AppState::fake();
        state.nutrition = Arc::new(CannedSource(Some(remote_info("4000417025005"))));
        let info = get_product_info(&state, "4000417025005")
            .await
            .expect("remote entry resolves");
        assert_eq!(info.record.barcode, "4000417025005");
    }

    #[tokio::test]
    async fn unknown_everywhere_is_not_found() {
        let state = AppState::fake();
        let err = get_product_info(&state, "000000000000").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product not found in database");
    }

    #[tokio::test]
    async fn transport_failures_keep_their_kind() {
        let mut state = AppState::fake();
        state.nutrition = Arc::new(FailingSource);
        let err = get_product_info(&state, "000000000000").await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
