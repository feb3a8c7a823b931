use crate::config::AppConfig;
use crate::models::{DietState, SavedSplits, SupplementsState, TimingTemplates};
use crate::storage::{
    DIET_KEY, KeyValueStore, SPLITS_KEY, SUPPLEMENTS_KEY, TEMPLATES_KEY, load_slice, load_value,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub diet: Arc<Mutex<DietState>>,
    pub supplements: Arc<Mutex<SupplementsState>>,
    pub splits: Arc<Mutex<SavedSplits>>,
    pub templates: Arc<Mutex<TimingTemplates>>,
}

impl AppState {
    /// Reads every slice from the store once; later writes go through the handlers.
    pub async fn load(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let diet: DietState = load_slice(store.as_ref(), DIET_KEY).await;
        let supplements: SupplementsState = load_slice(store.as_ref(), SUPPLEMENTS_KEY).await;
        let splits: SavedSplits = load_value(store.as_ref(), SPLITS_KEY).await;
        let templates: TimingTemplates = load_value(store.as_ref(), TEMPLATES_KEY).await;

        info!(
            foods = diet.foods.len(),
            plans = supplements.plans.len(),
            splits = splits.len(),
            templates = templates.len(),
            "state loaded"
        );

        Self {
            config: Arc::new(config),
            store,
            diet: Arc::new(Mutex::new(diet)),
            supplements: Arc::new(Mutex::new(supplements)),
            splits: Arc::new(Mutex::new(splits)),
            templates: Arc::new(Mutex::new(templates)),
        }
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
