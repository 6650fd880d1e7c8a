//! Photo to ingredient-label prediction

use crate::error::{BoxError, PredictionError};
use crate::labels::LabelMap;
use crate::preprocess::{preprocess, ImageTensor};

/// Anything that can name the ingredient in a photo
pub trait IngredientClassifier: Send + Sync {
    /// Predict a single ingredient label for encoded image bytes
    fn classify(&self, image: &[u8]) -> Result<String, PredictionError>;
}

/// A loaded image classification network
///
/// Takes a normalized `[1, 3, 224, 224]` tensor and returns one score per
/// class (logits or probabilities; only the argmax is used).
pub trait ImageModel: Send + Sync {
    fn forward(&self, input: &ImageTensor) -> Result<Vec<f32>, BoxError>;
}

/// Classifier backed by an [`ImageModel`] and its label map
pub struct ModelClassifier<M> {
    model: M,
    labels: LabelMap,
}

impl<M: ImageModel> ModelClassifier<M> {
    pub fn new(model: M, labels: LabelMap) -> Self {
        Self { model, labels }
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }
}

impl<M: ImageModel> IngredientClassifier for ModelClassifier<M> {
    fn classify(&self, image: &[u8]) -> Result<String, PredictionError> {
        let input = preprocess(image)?;
        let scores = self.model.forward(&input).map_err(PredictionError::Model)?;

        let index = argmax(&scores)
            .ok_or_else(|| PredictionError::model("model returned no finite scores"))?;

        let label = self.labels.get(index).ok_or(PredictionError::UnknownClass {
            index,
            classes: self.labels.len(),
        })?;

        let label = label.trim();
        if label.is_empty() {
            return Err(PredictionError::EmptyLabel { index });
        }

        tracing::debug!(index, label, "Image classified");
        Ok(label.to_string())
    }
}

impl<M> std::fmt::Debug for ModelClassifier<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClassifier")
            .field("classes", &self.labels.len())
            .finish_non_exhaustive()
    }
}

/// Index of the largest finite score; the first one wins on ties
fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
