use std::sync::Arc;

use crate::config::AppConfig;
use crate::meals::store::MealLog;
use crate::products::catalog::ProductCatalog;
use crate::products::remote::{NutritionSource, OpenFoodFacts};
use crate::scan::gate::ScanRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<ProductCatalog>,
    pub nutrition: Arc<dyn NutritionSource>,
    pub meals: Arc<MealLog>,
    pub scans: Arc<ScanRegistry>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let catalog = Arc::new(ProductCatalog::embedded()?);
        let nutrition = Arc::new(OpenFoodFacts::new(&config)?) as Arc<dyn NutritionSource>;
        Ok(Self {
            config,
            catalog,
            nutrition,
            meals: Arc::new(MealLog::new()),
            scans: Arc::new(ScanRegistry::new()),
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        catalog: Arc<ProductCatalog>,
        nutrition: Arc<dyn NutritionSource>,
    ) -> Self {
        Self {
            config,
            catalog,
            nutrition,
            meals: Arc::new(MealLog::new()),
            scans: Arc::new(ScanRegistry::new()),
        }
    }

    /// State for tests: embedded catalog, a remote source that never finds
    /// anything, fresh stores.
    pub fn fake() -> Self {
        use crate::error::LookupError;
        use crate::products::dto::ProductInfo;
        use axum::async_trait;

        struct OfflineSource;

        #[async_trait]
        impl NutritionSource for OfflineSource {
            async fn product_info(
                &self,
                _barcode: &str,
            ) -> Result<Option<ProductInfo>, LookupError> {
                Ok(None)
            }
        }

        let config = Arc::new(AppConfig {
            off_base_url: "http://localhost:0".into(),
            http_timeout_secs: 1,
            clamp_scores: false,
        });
        let catalog =
            Arc::new(ProductCatalog::embedded().expect("embedded catalog parses"));
        Self::from_parts(config, catalog, Arc::new(OfflineSource))
    }
}
