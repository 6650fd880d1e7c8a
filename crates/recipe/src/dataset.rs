//! Recipe dataset loading
//!
//! Reads a CSV recipe table and produces the normalized in-memory rows the
//! matcher works on. Loading is deterministic and never writes to the source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;
use crate::literal::{looks_like_list, parse_list_literal};
use crate::normalize::IngredientNormalizer;
use crate::nutrition::Nutrition;

pub const INGREDIENTS_COLUMN: &str = "ingredients";
pub const NAME_COLUMNS: &[&str] = &["recipe_name", "title", "name"];
pub const URL_COLUMN: &str = "url";
pub const NUTRITION_COLUMN: &str = "nutrition";

/// Conventional dataset locations, relative to the project root
pub const FALLBACK_PATHS: &[&str] = &[
    "data/raw/recipes.csv",
    "data/cleaned/recipes.csv",
    "recipes.csv",
];

/// One dataset row after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecipe {
    pub display_name: String,
    /// Deduplicated core tokens, in first-seen order
    pub core_ingredients: Vec<String>,
    pub url: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

impl NormalizedRecipe {
    /// Recipes with a single core ingredient are too ambiguous to score
    pub fn is_matchable(&self) -> bool {
        self.core_ingredients.len() > 1
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    ingredients: usize,
    name: Option<usize>,
    url: Option<usize>,
    nutrition: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, RecipeError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let ingredients = position(INGREDIENTS_COLUMN)
            .ok_or_else(|| RecipeError::MissingColumn(INGREDIENTS_COLUMN.to_string()))?;
        let name = NAME_COLUMNS.iter().find_map(|&col| position(col));

        Ok(Self {
            ingredients,
            name,
            url: position(URL_COLUMN),
            nutrition: position(NUTRITION_COLUMN),
        })
    }
}

/// Recipe Dataset Loader
///
/// Resolves dataset paths against a project root and normalizes every row
/// with its ingredient normalizer.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    root: PathBuf,
    normalizer: IngredientNormalizer,
}

impl DatasetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            normalizer: IngredientNormalizer::new(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: IngredientNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn normalizer(&self) -> &IngredientNormalizer {
        &self.normalizer
    }

    /// Resolve a requested dataset path
    ///
    /// Relative paths are taken from the project root. When the requested file
    /// does not exist, the conventional locations are tried in order.
    pub fn resolve(&self, requested: impl AsRef<Path>) -> Result<PathBuf, RecipeError> {
        let requested = requested.as_ref();
        let primary = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.root.join(requested)
        };

        if primary.exists() {
            return Ok(primary);
        }

        let mut tried = vec![primary];
        for fallback in FALLBACK_PATHS {
            let candidate = self.root.join(fallback);
            if candidate.exists() {
                tracing::info!(
                    requested = %requested.display(),
                    resolved = %candidate.display(),
                    "Requested dataset missing, using fallback location"
                );
                return Ok(candidate);
            }
            tried.push(candidate);
        }

        Err(RecipeError::DatasetNotFound { tried })
    }

    /// Load and normalize a dataset file
    pub fn load(&self, requested: impl AsRef<Path>) -> Result<Vec<NormalizedRecipe>, RecipeError> {
        let path = self.resolve(requested)?;
        let file = File::open(&path)?;
        let recipes = self.load_from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            rows = recipes.len(),
            matchable = recipes.iter().filter(|r| r.is_matchable()).count(),
            "Recipe dataset loaded"
        );

        Ok(recipes)
    }

    /// Load and normalize CSV data from any reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<NormalizedRecipe>, RecipeError> {
        let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = Columns::resolve(csv.headers()?)?;

        let mut recipes = Vec::new();
        for (index, record) in csv.records().enumerate() {
            let recipe = match record {
                Ok(record) => self.normalize_row(index, &record, columns),
                Err(e) => {
                    tracing::warn!(row = index, error = %e, "Skipping unreadable dataset record");
                    NormalizedRecipe {
                        display_name: index.to_string(),
                        core_ingredients: Vec::new(),
                        url: String::new(),
                        nutrition: Nutrition::default(),
                    }
                }
            };
            recipes.push(recipe);
        }

        Ok(recipes)
    }

    fn normalize_row(&self, index: usize, record: &StringRecord, columns: Columns) -> NormalizedRecipe {
        let cell = |position: Option<usize>| position.and_then(|p| record.get(p));

        let core_ingredients = cell(Some(columns.ingredients))
            .map(|raw| self.parse_ingredients(index, raw))
            .unwrap_or_default();

        let display_name = match columns.name {
            Some(position) => record.get(position).unwrap_or_default().to_string(),
            None => index.to_string(),
        };

        NormalizedRecipe {
            display_name,
            core_ingredients,
            url: cell(columns.url).unwrap_or_default().to_string(),
            nutrition: cell(columns.nutrition)
                .map(Nutrition::from_text)
                .unwrap_or_default(),
        }
    }

    /// Turn an ingredient cell into deduplicated core tokens
    ///
    /// List literals are read as lists. Anything else, including a list
    /// literal that fails to parse, is split on commas.
    pub fn parse_ingredients(&self, row: usize, raw: &str) -> Vec<String> {
        let cell = raw.trim();
        if cell.is_empty() {
            return Vec::new();
        }

        if looks_like_list(cell) {
            match parse_list_literal(cell) {
                Ok(phrases) => return self.normalizer.normalize_all(phrases),
                Err(e) => {
                    tracing::debug!(row, error = %e, "Ingredient cell is not a list literal, splitting on commas");
                }
            }
        }

        self.normalizer.normalize_all(cell.split(',').map(str::trim))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Load a dataset relative to the current directory with the built-in vocabulary
pub fn load_recipes(source_path: impl AsRef<Path>) -> Result<Vec<NormalizedRecipe>, RecipeError> {
    DatasetLoader::default().load(source_path)
}

/// Load CSV data from any reader with the built-in vocabulary
pub fn load_recipes_from_reader<R: Read>(reader: R) -> Result<Vec<NormalizedRecipe>, RecipeError> {
    DatasetLoader::default().load_from_reader(reader)
}
