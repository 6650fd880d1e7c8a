//! Class index to ingredient label mapping

use std::fs;
use std::path::Path;

use crate::error::LabelMapError;

/// Ordered class labels; position `i` names model output `i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn new(labels: Vec<String>) -> Result<Self, LabelMapError> {
        if labels.is_empty() {
            return Err(LabelMapError::Empty);
        }
        Ok(Self { labels })
    }

    /// Parse a JSON array such as `["apple", "banana"]`
    pub fn from_json_str(json: &str) -> Result<Self, LabelMapError> {
        let labels: Vec<String> = serde_json::from_str(json)?;
        Self::new(labels)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LabelMapError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LabelMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let map = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), classes = map.len(), "Label map loaded");
        Ok(map)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let map = LabelMap::from_json_str(r#"["apple", "banana", "carrot"]"#).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(1), Some("banana"));
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        assert!(matches!(LabelMap::from_json_str("[]"), Err(LabelMapError::Empty)));
        assert!(matches!(
            LabelMap::from_json_str(r#"{"0": "apple"}"#),
            Err(LabelMapError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let result = LabelMap::from_json_file(dir.child("label_map.json"));

        assert!(matches!(result, Err(LabelMapError::Io { .. })));
    }
}
