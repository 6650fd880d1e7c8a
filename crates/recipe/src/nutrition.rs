use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Per-serving macros in grams
///
/// Missing or unparseable values are 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein_g: f64,
    pub fat_g: f64,
    pub sugar_g: f64,
    pub carbs_g: f64,
    pub fiber_g: f64,
}

/// Labels as they appear in the free-text nutrition column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Protein,
    TotalFat,
    DietaryFiber,
    TotalSugars,
    TotalCarbohydrate,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Protein,
        Nutrient::TotalFat,
        Nutrient::DietaryFiber,
        Nutrient::TotalSugars,
        Nutrient::TotalCarbohydrate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::DietaryFiber => "Dietary Fiber",
            Nutrient::TotalSugars => "Total Sugars",
            Nutrient::TotalCarbohydrate => "Total Carbohydrate",
        }
    }
}

static GRAM_PATTERNS: LazyLock<Vec<(Nutrient, Regex)>> = LazyLock::new(|| {
    Nutrient::ALL
        .iter()
        .map(|nutrient| {
            let pattern = format!(r"{}\s+(\d+(\.\d*)?)g", regex::escape(nutrient.label()));
            let regex = Regex::new(&pattern).expect("valid nutrition pattern");
            (*nutrient, regex)
        })
        .collect()
});

/// Extract "<number>g" following a label, first match only
///
/// # Returns
/// Grams, or 0.0 when the label is absent or the number does not parse
pub fn extract_grams(text: &str, nutrient: Nutrient) -> f64 {
    GRAM_PATTERNS
        .iter()
        .find(|(n, _)| *n == nutrient)
        .and_then(|(_, regex)| regex.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

impl Nutrition {
    /// Parse every macro from a nutrition cell such as
    /// "Total Fat 18g 23%, Protein 12g, Total Sugars 4g"
    pub fn from_text(text: &str) -> Self {
        Self {
            protein_g: extract_grams(text, Nutrient::Protein),
            fat_g: extract_grams(text, Nutrient::TotalFat),
            sugar_g: extract_grams(text, Nutrient::TotalSugars),
            carbs_g: extract_grams(text, Nutrient::TotalCarbohydrate),
            fiber_g: extract_grams(text, Nutrient::DietaryFiber),
        }
    }

    pub fn health_score(&self) -> f64 {
        crate::health::health_score(self.protein_g, self.fat_g, self.sugar_g, self.carbs_g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Total Fat 18g 23%, Saturated Fat 4g 20%, Cholesterol 70mg, \
        Sodium 540mg, Total Carbohydrate 35.5g 13%, Dietary Fiber 3g 11%, \
        Total Sugars 6.g, Protein 28g";

    #[test]
    fn test_extract_all_macros() {
        let nutrition = Nutrition::from_text(SAMPLE);

        assert_eq!(nutrition.fat_g, 18.0);
        assert_eq!(nutrition.carbs_g, 35.5);
        assert_eq!(nutrition.fiber_g, 3.0);
        assert_eq!(nutrition.sugar_g, 6.0);
        assert_eq!(nutrition.protein_g, 28.0);
    }

    #[test]
    fn test_first_match_only() {
        assert_eq!(
            extract_grams("Protein 5g, Protein 9g", Nutrient::Protein),
            5.0
        );
    }

    #[test]
    fn test_missing_or_malformed_defaults_to_zero() {
        assert_eq!(extract_grams("", Nutrient::Protein), 0.0);
        assert_eq!(extract_grams("Protein 12mg", Nutrient::Protein), 0.0);
        assert_eq!(extract_grams("Protein twelve g", Nutrient::Protein), 0.0);
        assert_eq!(Nutrition::from_text("no data"), Nutrition::default());
    }

    #[test]
    fn test_overflowing_grams_penalize_health() {
        let text = format!("Total Fat {}g, Protein 10g", "9".repeat(400));
        let nutrition = Nutrition::from_text(&text);
        assert!(nutrition.fat_g.is_infinite());

        let capped = Nutrition {
            fat_g: 25.0,
            ..nutrition
        };
        assert_eq!(nutrition.health_score(), capped.health_score());
        assert!(nutrition.health_score() < Nutrition::from_text("Protein 10g").health_score());
    }

    #[test]
    fn test_label_is_case_sensitive() {
        assert_eq!(extract_grams("protein 12g", Nutrient::Protein), 0.0);
    }
}
