pub mod classifier;
pub mod error;
pub mod labels;
pub mod pantry;
pub mod preprocess;

pub use classifier::{ImageModel, IngredientClassifier, ModelClassifier};
pub use error::{BoxError, LabelMapError, PredictionError};
pub use labels::LabelMap;
pub use pantry::{Pantry, Photo};
pub use preprocess::{preprocess, ImageTensor, IMG_SIZE};
