use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use pantrypal_recipe::{DatasetLoader, Matcher, RecipeCatalog};
use pantrypal_vision::IngredientClassifier;

use crate::config::Config;

mod health;
mod recipes;

pub use health::{health, ready};
pub use recipes::{post_match, post_reload_dataset, MatchRequest, MatchResponse, RecipeCard};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<RecipeCatalog>,
    pub classifier: Option<Arc<dyn IngredientClassifier>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let loader = DatasetLoader::new(&config.dataset.root);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(RecipeCatalog::new(loader)),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IngredientClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn dataset_path(&self) -> &str {
        &self.config.dataset.path
    }

    /// Matcher sharing the catalog's vocabulary with the configured options
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.catalog.loader().normalizer().clone())
            .with_options(self.config.matching.options())
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/match", post(post_match))
        .route("/api/dataset/reload", post(post_reload_dataset))
        .with_state(app_state)
}
