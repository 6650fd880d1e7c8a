#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use pantrypal::config::{Config, DatasetConfig, MatchingConfig, ObservabilityConfig, ServerConfig};
use pantrypal::AppState;
use pantrypal_vision::{IngredientClassifier, PredictionError};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const RECIPES_CSV: &str = "\
recipe_name,ingredients,url,nutrition
Garlic Chicken,\"['1 kg skinless chicken breast', '4 cloves garlic', '3 tomatoes']\",https://example.com/garlic-chicken,\"Total Fat 9g, Total Carbohydrate 12g, Total Sugars 5g, Protein 31g\"
Tomato Pasta,\"['2 cups penne', '4 tomatoes', 'fresh basil leaves', '2 cloves garlic']\",https://example.com/tomato-pasta,\"Total Fat 14g, Total Carbohydrate 70g, Total Sugars 9g, Protein 12g\"
Banana Bread,\"3 bananas, 2 cups flour, 2 eggs, 1/2 cup butter\",https://example.com/banana-bread,\"Total Fat 18g, Total Carbohydrate 60g, Total Sugars 30g, Protein 6g\"
Plain Rice,\"2 cups rice, water\",,
";

/// Names a photo with its bytes as UTF-8; empty bytes fail
pub struct TextPhotoClassifier;

impl IngredientClassifier for TextPhotoClassifier {
    fn classify(&self, image: &[u8]) -> Result<String, PredictionError> {
        if image.is_empty() {
            return Err(PredictionError::EmptyLabel { index: 0 });
        }
        Ok(String::from_utf8_lossy(image).into_owned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        dataset: DatasetConfig {
            path: "recipes.csv".to_string(),
            root: dir.path().display().to_string(),
        },
        matching: MatchingConfig {
            quota: 7,
            fuzzy_threshold: 0.82,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    fs::write(dir.child("recipes.csv"), RECIPES_CSV).unwrap();

    let state = AppState::new(test_config(&dir)).with_classifier(Arc::new(TextPhotoClassifier));
    TestApp {
        router: pantrypal::router(state.clone()),
        state,
        dir,
    }
}

pub async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn get_json(router: Router, uri: &str) -> (u16, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (u16, serde_json::Value) {
    let status = response.status().as_u16();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}
