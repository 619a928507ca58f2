use super::config::ScoringConfig;
use super::factors::{self, Factor};
use super::validation::validate_scoring;
use crate::analysis::DeckAnalysis;
use crate::cards::Card;
use crate::error::{DraftError, Result};

/// Explanation used when no factor is significant enough to mention
pub const FALLBACK_EXPLANATION: &str = "fills a slot";

pub const RARITY_REASON: &str = "rare/mythic power level";

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: &'static str, // e.g. "Curve", "Color", "Synergy"
    pub score: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base_rating: f64,
    pub factors: Vec<FactorContribution>,
    /// Sum of base and factors before clamping and rounding
    pub raw_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Clamped to [min_rating, max_rating] and rounded to one decimal
    pub rating: f64,
    pub reasons: Vec<String>,
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
}

/// Scores candidate cards with one fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct CardScorer {
    config: ScoringConfig,
}

impl CardScorer {
    /// Rejects configs that fail `validate_scoring`
    pub fn new(config: ScoringConfig) -> Result<Self> {
        validate_scoring(&config).map_err(DraftError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, card: &Card, analysis: &DeckAnalysis, picks: &[&Card]) -> ScoreResult {
        calculate_score(card, analysis, picks, &self.config)
    }
}

pub fn calculate_score(
    card: &Card,
    analysis: &DeckAnalysis,
    picks: &[&Card],
    config: &ScoringConfig,
) -> ScoreResult {
    let contributions: [(&'static str, Factor); 6] = [
        ("Curve", factors::curve_fit(card, analysis, &config.curve)),
        ("Color", factors::color_fit(card, analysis, &config.color)),
        ("Balance", factors::balance_fit(card, analysis, &config.balance)),
        ("Synergy", factors::synergy(card, analysis, picks, &config.synergy)),
        ("Power", factors::power_level(card, &config.power)),
        ("Completion", factors::completion(analysis, &config.completion)),
    ];

    let mut total = config.base_rating;
    let mut reasons = Vec::new();
    let mut breakdown = Vec::with_capacity(contributions.len());

    for (label, factor) in contributions {
        total += factor.score;
        if let Some(ref reason) = factor.reason {
            reasons.push(reason.clone());
        }
        breakdown.push(FactorContribution {
            label,
            score: factor.score,
            reason: factor.reason,
        });
    }

    if card.rarity().is_rare_or_mythic() {
        reasons.push(RARITY_REASON.to_string());
    }

    let explanation = if reasons.is_empty() {
        FALLBACK_EXPLANATION.to_string()
    } else {
        reasons.join(", ")
    };

    ScoreResult {
        rating: round_tenth(clamp_rating(total, config)),
        reasons,
        explanation,
        breakdown: ScoreBreakdown {
            base_rating: config.base_rating,
            factors: breakdown,
            raw_total: total,
        },
    }
}

/// Bound a total to [min_rating, max_rating]. Unlike `f64::clamp` this never
/// panics on inverted or NaN bounds; validated configs never have them.
fn clamp_rating(total: f64, config: &ScoringConfig) -> f64 {
    total.max(config.min_rating).min(config.max_rating)
}

/// Round to one decimal, ties to even (5.25 -> 5.2, 5.35 -> 5.4)
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
