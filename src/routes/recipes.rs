//! Recipe matching JSON API

use axum::{extract::State, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use pantrypal_recipe::{rank_by_health, MatchOptions, MatchOutcome, MatchResult};
use pantrypal_vision::{Pantry, Photo};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::error::AppError;

/// Uploaded photo, base64 encoded
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub name: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
    pub quota: Option<usize>,
}

/// A ranked recipe with its display badges
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    #[serde(flatten)]
    pub result: MatchResult,
    pub match_badge: &'static str,
    pub health_badge: &'static str,
}

impl From<MatchResult> for RecipeCard {
    fn from(result: MatchResult) -> Self {
        Self {
            match_badge: result.match_badge().label(),
            health_badge: result.health_badge().label(),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// The merged ingredient list the query ran with
    pub ingredients: Vec<String>,
    pub user_cores: Vec<String>,
    pub results: Vec<RecipeCard>,
    /// The same results, healthiest first
    pub healthiest: Vec<RecipeCard>,
    pub failed_predictions: usize,
}

/// POST /api/match - Rank recipes for typed ingredients and photos
///
/// Photos are labelled by the configured classifier and merged after the
/// typed ingredients. An empty pantry is rejected before matching.
pub async fn post_match(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let photos = payload
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| decode_photo(index, image))
        .collect::<Result<Vec<_>, _>>()?;

    let mut options = state.config.matching.options();
    if let Some(quota) = payload.quota {
        if quota == 0 {
            return Err(AppError::ValidationError("quota must be at least 1".to_string()));
        }
        options = MatchOptions { quota, ..options };
    }

    // Classifiers run inference synchronously
    let pantry = tokio::task::spawn_blocking({
        let classifier = state.classifier.clone();
        let texts = payload.ingredients;
        move || Pantry::assemble(&texts, &photos, classifier.as_deref())
    })
    .await?;

    if pantry.is_empty() {
        return Err(AppError::ValidationError(
            "Please add at least one ingredient or photo".to_string(),
        ));
    }

    let Pantry {
        ingredients,
        failed_predictions,
    } = pantry;

    let outcome = tokio::task::spawn_blocking({
        let state = state.clone();
        let ingredients = ingredients.clone();
        move || -> Result<MatchOutcome, AppError> {
            let table = state.catalog.get_or_load(state.dataset_path())?;
            Ok(state.matcher().with_options(options).run(&ingredients, &table))
        }
    })
    .await??;

    let (user_cores, results) = match outcome {
        MatchOutcome::NoUsableInput => return Err(AppError::NoUsableInput),
        MatchOutcome::Matches { user_cores, results } => (user_cores, results),
    };

    tracing::info!(
        ingredients = ingredients.len(),
        user_cores = user_cores.len(),
        results = results.len(),
        failed_predictions,
        "Recipe match served"
    );

    let healthiest = rank_by_health(&results).into_iter().map(RecipeCard::from).collect();

    Ok(Json(MatchResponse {
        ingredients,
        user_cores,
        results: results.into_iter().map(RecipeCard::from).collect(),
        healthiest,
        failed_predictions,
    }))
}

/// POST /api/dataset/reload - Re-read the configured dataset from disk
pub async fn post_reload_dataset(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let table = tokio::task::spawn_blocking({
        let state = state.clone();
        move || state.catalog.reload(state.dataset_path())
    })
    .await??;

    Ok(Json(json!({
        "status": "reloaded",
        "rows": table.len(),
        "matchable": table.iter().filter(|r| r.is_matchable()).count(),
    })))
}

fn decode_photo(index: usize, image: &ImagePayload) -> Result<Photo, AppError> {
    let bytes = STANDARD
        .decode(image.data.trim())
        .map_err(|e| AppError::InvalidImage(format!("image {index} is not valid base64: {e}")))?;

    let name = if image.name.is_empty() {
        format!("image-{index}")
    } else {
        image.name.clone()
    };

    Ok(Photo::new(name, bytes))
}
