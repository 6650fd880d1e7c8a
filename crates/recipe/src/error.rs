use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Dataset has no '{0}' column")]
    MissingColumn(String),

    #[error("No recipe dataset found (tried: {})", display_paths(.tried))]
    DatasetNotFound { tried: Vec<PathBuf> },

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure to read a single ingredient cell as a list literal.
///
/// Never escapes the loader: the cell falls back to comma splitting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unparseable ingredient cell at byte {position}: {reason}")]
pub struct UnparseableCell {
    pub position: usize,
    pub reason: &'static str,
}
