use std::collections::HashMap;

use anyhow::Result;
use pantrypal_recipe::{rank_by_health, MatchOptions, MatchOutcome, MatchResult};
use pantrypal::routes::AppState;

/// Rank recipes for ingredients given on the command line
pub fn run_match(
    config: pantrypal::Config,
    ingredients: Vec<String>,
    quota_override: Option<usize>,
    dataset_override: Option<String>,
) -> Result<()> {
    let mut config = config;
    if let Some(dataset) = dataset_override {
        config.dataset.path = dataset;
    }
    if quota_override == Some(0) {
        anyhow::bail!("--quota must be at least 1");
    }

    let state = AppState::new(config);
    let table = state.catalog.get_or_load(state.dataset_path())?;

    let mut options = state.config.matching.options();
    if let Some(quota) = quota_override {
        options = MatchOptions { quota, ..options };
    }

    let (user_cores, results) = match state.matcher().with_options(options).run(&ingredients, &table) {
        MatchOutcome::NoUsableInput => {
            println!("No usable ingredients. Try names like \"chicken\" or \"tomatoes\".");
            return Ok(());
        }
        MatchOutcome::Matches { user_cores, results } => (user_cores, results),
    };

    println!("Searching with: {}", user_cores.join(", "));

    if results.is_empty() {
        println!("No recipes match those ingredients.");
        return Ok(());
    }

    println!("\nBest matches");
    print_results(&results);

    println!("\nHealthiest first");
    print_results(&rank_by_health(&results));

    Ok(())
}

/// Print dataset statistics
pub fn inspect(config: pantrypal::Config, dataset_override: Option<String>) -> Result<()> {
    let mut config = config;
    if let Some(dataset) = dataset_override {
        config.dataset.path = dataset;
    }

    let state = AppState::new(config);
    let resolved = state.catalog.loader().resolve(state.dataset_path())?;
    let table = state.catalog.get_or_load(&resolved)?;

    let mut core_counts: HashMap<&str, usize> = HashMap::new();
    for recipe in table.iter() {
        for core in &recipe.core_ingredients {
            *core_counts.entry(core.as_str()).or_default() += 1;
        }
    }

    let mut common: Vec<(&str, usize)> = core_counts.iter().map(|(k, v)| (*k, *v)).collect();
    common.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("Dataset:        {}", resolved.display());
    println!("Rows:           {}", table.len());
    println!("Matchable rows: {}", table.iter().filter(|r| r.is_matchable()).count());
    println!("Distinct cores: {}", core_counts.len());
    println!("\nMost common cores");
    for (core, count) in common.into_iter().take(10) {
        println!("  {core:<20} {count}");
    }

    Ok(())
}

fn print_results(results: &[MatchResult]) {
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. {} [{} | {}]",
            rank + 1,
            result.name,
            result.match_badge().label(),
            result.health_badge().label(),
        );
        println!(
            "    score {:.2}  matched {}/{} ({})  health {:.2}",
            result.score,
            result.matches,
            result.recipe_size,
            result.matched_cores.join(", "),
            result.health_score,
        );
        if !result.url.is_empty() {
            println!("    {}", result.url);
        }
    }
}
