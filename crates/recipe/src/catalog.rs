//! Process-lifetime cache of loaded datasets
//!
//! Each resolved path is loaded at most once until it is reloaded or
//! invalidated. Loads run outside the lock: two first callers for the same
//! path may both compute the table, and the first one stored is kept.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::dataset::{DatasetLoader, NormalizedRecipe};
use crate::error::RecipeError;

/// Immutable, shareable recipe table
pub type RecipeTable = Arc<[NormalizedRecipe]>;

#[derive(Debug, Default)]
pub struct RecipeCatalog {
    loader: DatasetLoader,
    tables: RwLock<HashMap<PathBuf, RecipeTable>>,
}

impl RecipeCatalog {
    pub fn new(loader: DatasetLoader) -> Self {
        Self {
            loader,
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    /// Return the cached table for a path, loading it on first use
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<RecipeTable, RecipeError> {
        let resolved = self.loader.resolve(path)?;

        if let Some(table) = self.cached(&resolved) {
            return Ok(table);
        }

        let table: RecipeTable = self.loader.load(&resolved)?.into();

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let stored = tables.entry(resolved).or_insert(table);
        Ok(Arc::clone(stored))
    }

    /// Load a path again, replacing any cached table
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<RecipeTable, RecipeError> {
        let resolved = self.loader.resolve(path)?;
        let table: RecipeTable = self.loader.load(&resolved)?.into();

        tracing::info!(path = %resolved.display(), rows = table.len(), "Recipe dataset reloaded");

        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resolved, Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table for a path; returns whether one was cached
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let Ok(resolved) = self.loader.resolve(path) else {
            return false;
        };

        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&resolved)
            .is_some()
    }

    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.loader
            .resolve(path)
            .map(|resolved| self.cached(&resolved).is_some())
            .unwrap_or(false)
    }

    fn cached(&self, resolved: &Path) -> Option<RecipeTable> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resolved)
            .cloned()
    }
}
