//! Merging typed ingredients with photo predictions

use std::collections::HashSet;

use crate::classifier::IngredientClassifier;

/// An uploaded photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// The combined ingredient list for one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    /// Typed entries first, then photo labels, deduplicated case-insensitively
    pub ingredients: Vec<String>,
    /// Photos that produced no label
    pub failed_predictions: usize,
}

impl Pantry {
    /// Build the ingredient list for a query
    ///
    /// # Arguments
    /// * `texts` - Ingredients typed by the user
    /// * `photos` - Uploaded photos; repeats of the same name and size are classified once
    /// * `classifier` - Photo classifier, if one is configured
    ///
    /// # Returns
    /// Trimmed, non-empty entries keeping the first spelling of each
    pub fn assemble<S, C>(texts: &[S], photos: &[Photo], classifier: Option<&C>) -> Self
    where
        S: AsRef<str>,
        C: IngredientClassifier + ?Sized,
    {
        let mut predictions = Vec::new();
        let mut failed_predictions = 0;
        let mut seen_photos = HashSet::new();

        for photo in photos {
            if !seen_photos.insert((photo.name.as_str(), photo.bytes.len())) {
                continue;
            }

            let Some(classifier) = classifier else {
                tracing::warn!(photo = %photo.name, "No image classifier configured, skipping photo");
                failed_predictions += 1;
                continue;
            };

            match classifier.classify(&photo.bytes) {
                Ok(label) => predictions.push(label),
                Err(e) => {
                    tracing::warn!(photo = %photo.name, error = %e, "Ingredient prediction failed");
                    failed_predictions += 1;
                }
            }
        }

        let typed = texts.iter().map(|text| text.as_ref().to_string());

        Self {
            ingredients: merge_unique(typed.chain(predictions)),
            failed_predictions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

fn merge_unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for item in items {
        let entry = item.trim();
        if entry.is_empty() || !seen.insert(entry.to_lowercase()) {
            continue;
        }
        merged.push(entry.to_string());
    }

    merged
}
