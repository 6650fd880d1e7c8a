use serde::Serialize;

/// How much of the user's own list a recipe uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBadge {
    Great,
    Good,
    Loose,
}

impl MatchBadge {
    /// >= 80% of the user's cores used is Great, >= 60% Good, else Loose
    pub fn for_pct_user(pct_user: f64) -> Self {
        let pct = pct_user * 100.0;
        if pct >= 80.0 {
            MatchBadge::Great
        } else if pct >= 60.0 {
            MatchBadge::Good
        } else {
            MatchBadge::Loose
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBadge::Great => "Great Match",
            MatchBadge::Good => "Good Match",
            MatchBadge::Loose => "Loose Match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBadge {
    SuperHealthy,
    Balanced,
    CheatDay,
}

impl HealthBadge {
    pub fn for_score(health_score: f64) -> Self {
        if health_score >= 0.70 {
            HealthBadge::SuperHealthy
        } else if health_score >= 0.40 {
            HealthBadge::Balanced
        } else {
            HealthBadge::CheatDay
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBadge::SuperHealthy => "Super Healthy",
            HealthBadge::Balanced => "Balanced",
            HealthBadge::CheatDay => "Cheat Day-ish",
        }
    }
}
