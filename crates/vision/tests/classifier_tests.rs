use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use pantrypal_vision::{
    BoxError, ImageModel, ImageTensor, IngredientClassifier, LabelMap, ModelClassifier, Pantry,
    Photo, PredictionError,
};
use temp_dir::TempDir;

/// Scores class `c` with the mean of input channel `c`
struct BrightestChannelModel;

impl ImageModel for BrightestChannelModel {
    fn forward(&self, input: &ImageTensor) -> Result<Vec<f32>, BoxError> {
        let [_, channels, height, width] = input.shape;
        let plane = height * width;
        Ok((0..channels)
            .map(|c| input.data[c * plane..(c + 1) * plane].iter().sum::<f32>() / plane as f32)
            .collect())
    }
}

struct FixedScores(Vec<f32>);

impl ImageModel for FixedScores {
    fn forward(&self, _input: &ImageTensor) -> Result<Vec<f32>, BoxError> {
        Ok(self.0.clone())
    }
}

struct BrokenModel;

impl ImageModel for BrokenModel {
    fn forward(&self, _input: &ImageTensor) -> Result<Vec<f32>, BoxError> {
        Err("weights not loaded".into())
    }
}

fn encoded(color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(48, 36, Rgb(color));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

fn labels(names: &[&str]) -> LabelMap {
    LabelMap::new(names.iter().map(|n| n.to_string()).collect()).unwrap()
}

#[test]
fn test_classifies_by_model_argmax() {
    let classifier = ModelClassifier::new(BrightestChannelModel, labels(&["tomato", "lettuce", "blueberry"]));

    assert_eq!(classifier.classify(&encoded([250, 10, 10], ImageFormat::Png)).unwrap(), "tomato");
    assert_eq!(classifier.classify(&encoded([10, 250, 10], ImageFormat::Png)).unwrap(), "lettuce");
    assert_eq!(classifier.classify(&encoded([10, 10, 250], ImageFormat::Png)).unwrap(), "blueberry");
}

#[test]
fn test_prediction_errors() {
    let photo = encoded([1, 2, 3], ImageFormat::Png);

    let unknown = ModelClassifier::new(FixedScores(vec![0.0, 0.0, 5.0]), labels(&["apple", "pear"]));
    assert!(matches!(
        unknown.classify(&photo),
        Err(PredictionError::UnknownClass { index: 2, classes: 2 })
    ));

    let blank = ModelClassifier::new(FixedScores(vec![0.1, 0.9]), labels(&["apple", "  "]));
    assert!(matches!(blank.classify(&photo), Err(PredictionError::EmptyLabel { index: 1 })));

    let broken = ModelClassifier::new(BrokenModel, labels(&["apple"]));
    assert!(matches!(broken.classify(&photo), Err(PredictionError::Model(_))));

    let empty = ModelClassifier::new(FixedScores(Vec::new()), labels(&["apple"]));
    assert!(matches!(empty.classify(&photo), Err(PredictionError::Model(_))));

    assert!(matches!(unknown.classify(b"\x89PNG broken"), Err(PredictionError::Decode(_))));
}

#[test]
fn test_label_map_file_feeds_classifier() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("label_map.json");
    std::fs::write(&path, r#"["  mango ", "kiwi"]"#)?;

    let classifier = ModelClassifier::new(FixedScores(vec![3.0, 1.0]), LabelMap::from_json_file(&path)?);
    assert_eq!(classifier.labels().len(), 2);
    assert_eq!(classifier.classify(&encoded([0, 0, 0], ImageFormat::Png))?, "mango");

    Ok(())
}

#[test]
fn test_pantry_with_model_classifier() {
    let classifier = ModelClassifier::new(BrightestChannelModel, labels(&["Tomato", "lettuce", "blueberry"]));
    let photos = vec![
        Photo::new("red.png", encoded([240, 0, 0], ImageFormat::Png)),
        Photo::new("green.bmp", encoded([0, 240, 0], ImageFormat::Bmp)),
        Photo::new("notes.txt", b"shopping list".to_vec()),
    ];

    let dyn_classifier: &dyn IngredientClassifier = &classifier;
    let pantry = Pantry::assemble(&["tomato", "rice"], &photos, Some(dyn_classifier));

    assert_eq!(pantry.ingredients, vec!["tomato", "rice", "lettuce"]);
    assert_eq!(pantry.failed_predictions, 1);
}
