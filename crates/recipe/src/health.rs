//! Health scoring from per-serving macros
//!
//! Score = (protein * 0.40) + (fat * 0.25) + (sugar * 0.20) + (net carbs * 0.15)
//!
//! Each component is in [0, 1]:
//! - protein: grams / 20, capped (more is better)
//! - fat: 1 - grams / 25, floored (less is better)
//! - sugar: 1 - grams / 40, floored
//! - net carbs: 1 - grams / 120, floored

const PROTEIN_TARGET_G: f64 = 20.0;
const FAT_LIMIT_G: f64 = 25.0;
const SUGAR_LIMIT_G: f64 = 40.0;
const NET_CARBS_LIMIT_G: f64 = 120.0;

const PROTEIN_WEIGHT: f64 = 0.40;
const FAT_WEIGHT: f64 = 0.25;
const SUGAR_WEIGHT: f64 = 0.20;
const NET_CARBS_WEIGHT: f64 = 0.15;

/// Compute a healthiness score in [0, 1]
///
/// Total: NaN and negative grams count as 0, infinite grams saturate
/// their component.
pub fn health_score(protein_g: f64, fat_g: f64, sugar_g: f64, carbs_g: f64) -> f64 {
    let protein = grams(protein_g);
    let fat = grams(fat_g);
    let sugar = grams(sugar_g);
    let net_carbs = grams(carbs_g);

    let protein_score = (protein / PROTEIN_TARGET_G).min(1.0);
    let fat_score = 1.0 - (fat / FAT_LIMIT_G).min(1.0);
    let sugar_score = 1.0 - (sugar / SUGAR_LIMIT_G).min(1.0);
    let net_carbs_score = 1.0 - (net_carbs / NET_CARBS_LIMIT_G).min(1.0);

    let health = PROTEIN_WEIGHT * protein_score
        + FAT_WEIGHT * fat_score
        + SUGAR_WEIGHT * sugar_score
        + NET_CARBS_WEIGHT * net_carbs_score;

    health.clamp(0.0, 1.0)
}

fn grams(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
