//! Recipe matching and ranking
//!
//! Scores every matchable recipe against a user's pantry:
//! - pct_recipe = matches / |recipe cores|
//! - pct_user   = matches / |user cores|
//! - jaccard    = matches / |user cores ∪ recipe cores|
//! - score      = 0.7 * pct_recipe + 0.3 * jaccard
//!
//! The weighting favours recipes the user can actually complete over
//! recipes that merely use a lot of the pantry.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dataset::NormalizedRecipe;
use crate::health::health_score;
use crate::normalize::IngredientNormalizer;
use crate::nutrition::Nutrition;
use crate::rating::{HealthBadge, MatchBadge};
use crate::similarity::token_set_ratio;

pub const DEFAULT_QUOTA: usize = 7;
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.82;

const RECIPE_COMPLETION_WEIGHT: f64 = 0.7;
const JACCARD_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// Maximum number of results returned
    pub quota: usize,
    /// Minimum token-set similarity for a fuzzy pairing
    pub fuzzy_threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// One (query, recipe) pair that survived matching
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub name: String,
    pub url: String,
    pub matches: usize,
    pub recipe_size: usize,
    pub pct_recipe: f64,
    pub pct_user: f64,
    pub jaccard: f64,
    pub score: f64,
    pub health_score: f64,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    /// Recipe-side cores that matched, sorted
    pub matched_cores: Vec<String>,
    /// The query's core set, sorted
    pub user_cores: Vec<String>,
}

impl MatchResult {
    pub fn match_badge(&self) -> MatchBadge {
        MatchBadge::for_pct_user(self.pct_user)
    }

    pub fn health_badge(&self) -> HealthBadge {
        HealthBadge::for_score(self.health_score)
    }
}

/// Result of a query, keeping "nothing usable was typed" apart from
/// "nothing matched"
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// No user phrase produced a core ingredient
    NoUsableInput,
    Matches {
        user_cores: Vec<String>,
        results: Vec<MatchResult>,
    },
}

impl MatchOutcome {
    pub fn into_results(self) -> Vec<MatchResult> {
        match self {
            MatchOutcome::NoUsableInput => Vec::new(),
            MatchOutcome::Matches { results, .. } => results,
        }
    }
}

/// Matcher / Ranker
///
/// Pure over its inputs: the recipe table is only read, so one table can
/// serve concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    normalizer: IngredientNormalizer,
    options: MatchOptions,
}

impl Matcher {
    pub fn new(normalizer: IngredientNormalizer) -> Self {
        Self {
            normalizer,
            options: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Normalize user phrases into a deduplicated, sorted core set
    pub fn user_cores<S: AsRef<str>>(&self, user_phrases: &[S]) -> BTreeSet<String> {
        user_phrases
            .iter()
            .map(|phrase| self.normalizer.normalize(phrase.as_ref()))
            .filter(|core| !core.is_empty())
            .collect()
    }

    /// Score and rank recipes for a list of free-text ingredients
    pub fn run<S: AsRef<str>>(
        &self,
        user_phrases: &[S],
        recipes: &[NormalizedRecipe],
    ) -> MatchOutcome {
        let user_cores = self.user_cores(user_phrases);
        if user_cores.is_empty() {
            return MatchOutcome::NoUsableInput;
        }

        let sorted_user: Vec<String> = user_cores.iter().cloned().collect();

        let mut results: Vec<MatchResult> = recipes
            .iter()
            .filter(|recipe| recipe.is_matchable())
            .filter_map(|recipe| self.score_recipe(&user_cores, &sorted_user, recipe))
            .collect();

        // Best score first, then simpler recipes; stable for full ties
        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.recipe_size.cmp(&b.recipe_size))
        });
        results.truncate(self.options.quota);

        tracing::debug!(
            user_cores = sorted_user.len(),
            recipes = recipes.len(),
            results = results.len(),
            "Recipe matching complete"
        );

        MatchOutcome::Matches {
            user_cores: sorted_user,
            results,
        }
    }

    fn score_recipe(
        &self,
        user_cores: &BTreeSet<String>,
        sorted_user: &[String],
        recipe: &NormalizedRecipe,
    ) -> Option<MatchResult> {
        let recipe_cores: BTreeSet<&str> =
            recipe.core_ingredients.iter().map(String::as_str).collect();
        let recipe_size = recipe_cores.len();
        if recipe_size <= 1 {
            return None;
        }

        let matched = fuzzy_intersection(user_cores, &recipe_cores, self.options.fuzzy_threshold);
        let matches = matched.len();
        if matches == 0 {
            return None;
        }

        let exact_overlap = user_cores
            .iter()
            .filter(|core| recipe_cores.contains(core.as_str()))
            .count();
        let union_size = user_cores.len() + recipe_size - exact_overlap;

        let pct_recipe = matches as f64 / recipe_size as f64;
        let pct_user = matches as f64 / user_cores.len() as f64;
        let jaccard = matches as f64 / union_size as f64;
        let score = RECIPE_COMPLETION_WEIGHT * pct_recipe + JACCARD_WEIGHT * jaccard;

        let nutrition = recipe.nutrition;

        Some(MatchResult {
            name: recipe.display_name.clone(),
            url: recipe.url.clone(),
            matches,
            recipe_size,
            pct_recipe,
            pct_user,
            jaccard,
            score,
            health_score: health_score(
                nutrition.protein_g,
                nutrition.fat_g,
                nutrition.sugar_g,
                nutrition.carbs_g,
            ),
            nutrition,
            matched_cores: matched.into_iter().map(str::to_string).collect(),
            user_cores: sorted_user.to_vec(),
        })
    }
}

/// Greedy one-to-one pairing of user cores with recipe cores
///
/// Exact matches are paired first. Each remaining user core, in
/// lexicographic order, then takes the most similar remaining recipe core if
/// the similarity reaches `threshold`. On equal similarity the
/// lexicographically first recipe core wins.
///
/// # Returns
/// The recipe-side cores that were paired
pub fn fuzzy_intersection<'r>(
    user_cores: &BTreeSet<String>,
    recipe_cores: &BTreeSet<&'r str>,
    threshold: f64,
) -> BTreeSet<&'r str> {
    let mut matched: BTreeSet<&'r str> = BTreeSet::new();
    let mut remaining_recipe: BTreeSet<&'r str> = recipe_cores.clone();
    let mut remaining_user: Vec<&str> = Vec::new();

    for user in user_cores {
        match remaining_recipe.take(user.as_str()) {
            Some(recipe) => {
                matched.insert(recipe);
            }
            None => remaining_user.push(user.as_str()),
        }
    }

    for user in remaining_user {
        let mut best: Option<(&'r str, f64)> = None;

        for &candidate in &remaining_recipe {
            let similarity = token_set_ratio(user, candidate);
            if similarity > best.map_or(0.0, |(_, score)| score) {
                best = Some((candidate, similarity));
            }
        }

        if let Some((candidate, similarity)) = best {
            if similarity >= threshold {
                matched.insert(candidate);
                remaining_recipe.remove(candidate);
            }
        }
    }

    matched
}

/// Rank recipes for free-text ingredients with the built-in vocabulary
///
/// Returns at most `quota` results, best first. An empty list means either
/// no usable input or no matches; use [`Matcher::run`] to tell them apart.
pub fn match_recipes<S: AsRef<str>>(
    user_phrases: &[S],
    recipes: &[NormalizedRecipe],
    quota: usize,
) -> Vec<MatchResult> {
    Matcher::default()
        .with_options(MatchOptions {
            quota,
            ..MatchOptions::default()
        })
        .run(user_phrases, recipes)
        .into_results()
}

/// The same results ordered healthiest first
///
/// Stable: equally healthy recipes keep their match order.
pub fn rank_by_health(results: &[MatchResult]) -> Vec<MatchResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.health_score.total_cmp(&a.health_score));
    ranked
}
