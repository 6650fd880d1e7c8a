pub mod catalog;
pub mod dataset;
pub mod error;
pub mod health;
pub mod literal;
pub mod matching;
pub mod normalize;
pub mod nutrition;
pub mod rating;
pub mod similarity;
pub mod vocabulary;

// Re-export commonly used types
pub use catalog::{RecipeCatalog, RecipeTable};
pub use dataset::{load_recipes, load_recipes_from_reader, DatasetLoader, NormalizedRecipe};
pub use error::{RecipeError, UnparseableCell};
pub use health::health_score;
pub use matching::{
    match_recipes, rank_by_health, MatchOptions, MatchOutcome, MatchResult, Matcher,
};
pub use normalize::{normalize_list, normalize_to_core, IngredientNormalizer};
pub use nutrition::Nutrition;
pub use rating::{HealthBadge, MatchBadge};
pub use vocabulary::Vocabulary;
