//! Static word tables used by the ingredient normalizer.
//!
//! The tables are plain data. `Vocabulary::default()` holds the built-in
//! lists; tests and callers with other datasets can build their own.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Preparation verbs and adverbs
pub const PREPARATION_WORDS: &[&str] = &[
    "finely", "thinly", "roughly", "freshly", "lightly", "chopped", "sliced", "diced", "minced",
    "peeled", "seeded", "cored", "grated", "crushed", "julienned", "halved", "quartered", "cubed",
    "skinless", "softened", "shredded", "beaten", "rinsed", "drained", "mashed", "whisked",
    "stirred", "boneless", "bone-in",
];

/// Quantity and unit words
pub const UNIT_WORDS: &[&str] = &[
    "cup", "cups", "tablespoon", "tablespoons", "teaspoon", "teaspoons", "tbsp", "tsp", "ounce",
    "ounces", "oz", "pound", "pounds", "lb", "lbs", "gram", "grams", "kg", "kilogram",
    "kilograms",
];

/// Portion and form words ("3 cloves garlic", "basil leaves")
pub const FORM_WORDS: &[&str] = &[
    "clove", "cloves", "leaf", "leaves", "sprig", "sprigs", "stalk", "stalks", "pinch", "dash",
    "piece", "pieces", "slice", "slices",
];

pub const SIZE_WORDS: &[&str] = &["large", "small", "medium"];

/// Quality and cooking-state descriptors, so "dried tomatoes" reads as "tomatoes"
pub const DESCRIPTOR_WORDS: &[&str] = &[
    "fresh", "extra", "extra-virgin", "low-fat", "fat-free", "reduced", "light", "dried",
    "smoked", "roasted", "grilled", "fried", "baked", "toasted", "cooked", "raw",
];

pub const CONNECTOR_WORDS: &[&str] = &[
    "and", "or", "with", "without", "of", "in", "for", "to", "taste", "divided", "optional",
    "recipe", "can", "package",
];

/// Ubiquitous staples that would otherwise dominate every match
pub const STAPLE_WORDS: &[&str] = &[
    "salt", "pepper", "peppers", "water", "oil", "olive", "olive-oil", "canola", "vegetable",
    "sugar", "flour", "broth", "stock",
];

/// Proteins that win over any other token in a phrase
pub const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "goat", "turkey", "duck", "goose", "fish", "salmon",
    "tilapia", "tuna", "shrimp", "prawn", "prawns", "scallops", "bacon", "sausage", "ham",
];

static DEFAULT_VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::builtin);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    stopwords: HashSet<String>,
    meat_keywords: HashSet<String>,
}

impl Vocabulary {
    pub fn new<S, M>(stopwords: S, meat_keywords: M) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            meat_keywords: meat_keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Shared instance of the built-in tables
    pub fn shared() -> &'static Vocabulary {
        &DEFAULT_VOCABULARY
    }

    fn builtin() -> Self {
        let stopwords = [
            PREPARATION_WORDS,
            UNIT_WORDS,
            FORM_WORDS,
            SIZE_WORDS,
            DESCRIPTOR_WORDS,
            CONNECTOR_WORDS,
            STAPLE_WORDS,
        ]
        .concat();

        Self::new(stopwords, MEAT_KEYWORDS.iter().copied())
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn is_meat(&self, token: &str) -> bool {
        self.meat_keywords.contains(token)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::shared().clone()
    }
}
