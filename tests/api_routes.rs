use std::fs;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use serde_json::json;
use temp_dir::TempDir;

mod common;
use common::{create_test_app, get_json, post_json, test_config};
use pantrypal::AppState;
use pantrypal_vision::{IngredientClassifier, PredictionError};

fn names(results: &serde_json::Value) -> Vec<&str> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, body) = get_json(app.router, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_after_dataset_loaded() {
    let app = create_test_app();

    let (status, body) = get_json(app.router.clone(), "/ready").await;
    assert_eq!(status, 503);
    assert_eq!(body["reason"], "dataset_not_loaded");

    app.state.catalog.get_or_load(app.state.dataset_path()).unwrap();

    let (status, body) = get_json(app.router, "/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_match_ranks_recipes() {
    let app = create_test_app();

    let (status, body) = post_json(
        app.router,
        "/api/match",
        json!({"ingredients": ["2 chicken thighs", "Garlic", "tomatoes"]}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["user_cores"], json!(["chicken", "garlic", "tomato"]));
    assert_eq!(names(&body["results"]), vec!["Garlic Chicken", "Tomato Pasta"]);

    let top = &body["results"][0];
    assert_eq!(top["matches"], 3);
    assert!((top["score"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(top["url"], "https://example.com/garlic-chicken");
    assert_eq!(top["protein_g"], 31.0);
    assert_eq!(top["match_badge"], "Great Match");
    assert_eq!(top["health_badge"], "Super Healthy");
    assert_eq!(body["failed_predictions"], 0);

    // Single-ingredient recipes never appear
    assert!(!names(&body["results"]).contains(&"Plain Rice"));
}

#[tokio::test]
async fn test_healthiest_view_reorders_results() {
    let app = create_test_app();

    let (status, body) = post_json(
        app.router,
        "/api/match",
        json!({"ingredients": ["penne", "tomatoes", "basil", "garlic", "chicken"]}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(names(&body["results"]), vec!["Tomato Pasta", "Garlic Chicken"]);
    assert_eq!(names(&body["healthiest"]), vec!["Garlic Chicken", "Tomato Pasta"]);
}

#[tokio::test]
async fn test_quota_limits_results() {
    let app = create_test_app();

    let (status, body) = post_json(
        app.router,
        "/api/match",
        json!({"ingredients": ["chicken", "garlic", "tomato"], "quota": 1}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(names(&body["results"]), vec!["Garlic Chicken"]);
}

#[tokio::test]
async fn test_photos_merge_with_typed_ingredients() {
    let app = create_test_app();

    let (status, body) = post_json(
        app.router,
        "/api/match",
        json!({
            "ingredients": ["eggs", "butter"],
            "images": [
                {"name": "fruit.jpg", "data": "YmFuYW5hcw=="},
                {"name": "blank.jpg", "data": ""}
            ]
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ingredients"], json!(["eggs", "butter", "bananas"]));
    assert_eq!(body["failed_predictions"], 1);
    assert_eq!(names(&body["results"]), vec!["Banana Bread"]);
}

#[tokio::test]
async fn test_empty_request_rejected() {
    let app = create_test_app();

    let (status, body) = post_json(app.router, "/api/match", json!({"ingredients": ["  "]})).await;

    assert_eq!(status, 422);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_unrecognized_ingredients_distinct_from_no_match() {
    let app = create_test_app();

    let (status, body) =
        post_json(app.router.clone(), "/api/match", json!({"ingredients": ["2 cups", "salt"]})).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "NoUsableInput");

    let (status, body) =
        post_json(app.router, "/api/match", json!({"ingredients": ["seaweed"]})).await;
    assert_eq!(status, 200);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_invalid_requests() {
    let app = create_test_app();

    let (status, body) = post_json(
        app.router.clone(),
        "/api/match",
        json!({"images": [{"name": "x.jpg", "data": "not base64!"}]}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "InvalidImage");

    let (status, _) = post_json(
        app.router,
        "/api/match",
        json!({"ingredients": ["rice"], "quota": 0}),
    )
    .await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn test_missing_dataset_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let router = pantrypal::router(AppState::new(test_config(&dir)));

    let (status, body) = post_json(router, "/api/match", json!({"ingredients": ["rice"]})).await;

    assert_eq!(status, 503);
    assert_eq!(body["error"], "DatasetUnavailable");
    assert_eq!(body["details"]["tried"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_reload_picks_up_new_rows() {
    let app = create_test_app();

    let (status, _) = post_json(app.router.clone(), "/api/match", json!({"ingredients": ["rice"]})).await;
    assert_eq!(status, 200);

    fs::write(
        app.dir.child("recipes.csv"),
        "title,ingredients\nFried Rice,\"rice, 2 eggs, peas\"\n",
    )
    .unwrap();

    let (status, body) = post_json(app.router.clone(), "/api/dataset/reload", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["rows"], 1);
    assert_eq!(body["matchable"], 1);

    let (_, body) = post_json(app.router, "/api/match", json!({"ingredients": ["rice"]})).await;
    assert_eq!(names(&body["results"]), vec!["Fried Rice"]);
}

/// Labels every photo "garlic" and remembers which thread ran it
#[derive(Default)]
struct ThreadRecordingClassifier {
    threads: Mutex<Vec<ThreadId>>,
}

impl IngredientClassifier for ThreadRecordingClassifier {
    fn classify(&self, _image: &[u8]) -> Result<String, PredictionError> {
        self.threads.lock().unwrap().push(thread::current().id());
        Ok("garlic".to_string())
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_photo_classification_runs_off_the_runtime_thread() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.child("recipes.csv"), common::RECIPES_CSV).unwrap();

    let classifier = Arc::new(ThreadRecordingClassifier::default());
    let state = AppState::new(test_config(&dir)).with_classifier(classifier.clone());
    let router = pantrypal::router(state);

    let (status, body) = post_json(
        router,
        "/api/match",
        json!({
            "ingredients": ["chicken"],
            "images": [{"name": "bulb.jpg", "data": "aGVsbG8="}]
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ingredients"], json!(["chicken", "garlic"]));

    let threads = classifier.threads.lock().unwrap();
    assert_eq!(threads.len(), 1);
    assert_ne!(threads[0], thread::current().id());
}
