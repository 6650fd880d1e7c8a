//! Ingredient phrase normalization
//!
//! Turns a free-text phrase such as "1/2 kg skinless chicken breast" into a
//! single comparable core token ("chicken"). This is a heuristic: unseen words
//! pass through, and the worst case is a plausible wrong token or an empty
//! string. It never fails.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::Vocabulary;

static RE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+/\d+").expect("valid fraction pattern"));
static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number pattern"));
static RE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Tokens this short are never ingredient names
const MIN_TOKEN_CHARS: usize = 3;

/// Ingredient Normalizer
///
/// Stateless apart from its vocabulary. One instance can be shared across
/// threads and queries.
#[derive(Debug, Clone, Default)]
pub struct IngredientNormalizer {
    vocabulary: Vocabulary,
}

impl IngredientNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract the core ingredient token from a raw phrase
    ///
    /// # Algorithm
    /// 1. Lowercase, drop fractions then whole numbers
    /// 2. Replace punctuation with spaces, collapse whitespace
    /// 3. Drop stopwords and tokens of two characters or fewer
    /// 4. A meat keyword anywhere in the phrase wins
    /// 5. Otherwise the last surviving token, singularized
    ///
    /// # Returns
    /// The core token, or an empty string when nothing survives
    pub fn normalize(&self, phrase: &str) -> String {
        let cleaned = clean_phrase(phrase);

        let tokens: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|tok| !self.vocabulary.is_stopword(tok))
            .filter(|tok| tok.chars().count() >= MIN_TOKEN_CHARS)
            .collect();

        if let Some(meat) = tokens.iter().find(|tok| self.vocabulary.is_meat(tok)) {
            return (*meat).to_string();
        }

        match tokens.last() {
            Some(last) => singularize(last).to_string(),
            None => String::new(),
        }
    }

    /// Normalize every phrase, dropping empties and duplicates
    ///
    /// Order of first appearance is preserved.
    pub fn normalize_all<I, S>(&self, phrases: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cores = phrases
            .into_iter()
            .map(|phrase| self.normalize(phrase.as_ref()))
            .filter(|core| !core.is_empty());

        normalize_list(cores)
    }
}

/// Normalize a phrase with the built-in vocabulary
pub fn normalize_to_core(phrase: &str) -> String {
    static NORMALIZER: LazyLock<IngredientNormalizer> = LazyLock::new(IngredientNormalizer::new);
    NORMALIZER.normalize(phrase)
}

/// Lowercase, trim and collapse inner whitespace of each entry, then drop
/// empties and duplicates, keeping first-seen order
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for item in items {
        let entry = item
            .as_ref()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if entry.is_empty() || !seen.insert(entry.clone()) {
            continue;
        }
        normalized.push(entry);
    }

    normalized
}

fn clean_phrase(phrase: &str) -> String {
    let lowered = phrase.to_lowercase();
    let without_fractions = RE_FRACTION.replace_all(&lowered, " ");
    let without_numbers = RE_NUMBER.replace_all(&without_fractions, " ");
    let without_punctuation = RE_PUNCTUATION.replace_all(&without_numbers, " ");

    RE_WHITESPACE
        .replace_all(&without_punctuation, " ")
        .trim()
        .to_string()
}

/// Suffix-stripping plural heuristic
///
/// - "tomatoes" -> "tomato"
/// - "peaches" -> "peach", but "cheese" and "dextrose" stay
/// - "onions" -> "onion", but "glass" stays
///
/// A strip that would leave two characters or fewer is skipped so the
/// result is still a usable core token.
fn singularize(word: &str) -> &str {
    let chars = word.chars().count();

    let stripped = if word.ends_with("oes") {
        &word[..word.len() - 2]
    } else if word.ends_with("es") && chars > 4 {
        if word.ends_with("eese") || word.ends_with("ose") {
            word
        } else {
            &word[..word.len() - 2]
        }
    } else if word.ends_with('s') && chars > 3 && !word.ends_with("ss") {
        &word[..word.len() - 1]
    } else {
        word
    };

    if stripped.chars().count() < MIN_TOKEN_CHARS {
        word
    } else {
        stripped
    }
}
