use std::cmp::Ordering;
use std::collections::HashSet;

use crate::analysis::{analyze, DeckAnalysis};
use crate::cards::Card;
use crate::error::Result;
use crate::index::{CardIndex, Resolution};
use crate::scoring::{CardScorer, ScoreBreakdown, ScoringConfig};

/// One pool card with its rating against the current picks
#[derive(Debug, Clone, PartialEq)]
pub struct RatedCard<'a> {
    pub name: &'a str,
    pub rating: f64,
    pub explanation: String,
    pub card: &'a Card,
    pub breakdown: ScoreBreakdown,
}

/// Entry point for front ends: owns the pool index and the scorer.
///
/// Holds no per-request state; `rate` and `analyze` recompute everything from
/// the names they are given and can be called concurrently.
#[derive(Debug, Clone)]
pub struct Rater {
    index: CardIndex,
    scorer: CardScorer,
}

impl Rater {
    /// Rejects scoring configs that fail validation
    pub fn new(index: CardIndex, config: ScoringConfig) -> Result<Self> {
        Ok(Self {
            index,
            scorer: CardScorer::new(config)?,
        })
    }

    /// Build the index over `cards`, then validate the config
    pub fn from_cards(cards: Vec<Card>, config: ScoringConfig) -> Result<Self> {
        Self::new(CardIndex::build(cards)?, config)
    }

    pub fn index(&self) -> &CardIndex {
        &self.index
    }

    pub fn config(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    /// Resolve every selected name, reporting misses
    pub fn resolve<S: AsRef<str>>(&self, selected: &[S]) -> Vec<Resolution<'_>> {
        self.index.resolve_all(selected)
    }

    /// Selected names that match no pool card, in the order given
    pub fn unresolved<'q, S: AsRef<str>>(&self, selected: &'q [S]) -> Vec<&'q str> {
        selected
            .iter()
            .map(|name| -> &'q str { name.as_ref() })
            .filter(|name| !self.index.resolve(name).is_found())
            .collect()
    }

    /// Deck statistics for the resolved picks
    pub fn analyze<S: AsRef<str>>(&self, selected: &[S]) -> DeckAnalysis {
        let picks = self.index.resolve_many(selected);
        analyze(picks.iter().copied())
    }

    /// Rate the pool against the selected names, best first.
    ///
    /// Returns nothing when no selected name resolves. Equal ratings keep
    /// pool order.
    pub fn rate<S: AsRef<str>>(&self, selected: &[S]) -> Vec<RatedCard<'_>> {
        let picks = self.index.resolve_many(selected);
        if picks.is_empty() {
            tracing::debug!("No picks resolved from {} names", selected.len());
            return Vec::new();
        }

        let analysis = analyze(picks.iter().copied());
        let picked: HashSet<&str> = picks.iter().map(|c| c.key()).collect();
        let include_picked = self.config().include_picked;

        let mut rated: Vec<RatedCard<'_>> = self
            .index
            .cards()
            .iter()
            .filter(|card| include_picked || !picked.contains(card.key()))
            .map(|card| {
                let result = self.scorer.score(card, &analysis, &picks);
                RatedCard {
                    name: card.name(),
                    rating: result.rating,
                    explanation: result.explanation,
                    card,
                    breakdown: result.breakdown,
                }
            })
            .collect();

        // stable sort: ties keep pool order
        rated.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));

        tracing::debug!(
            "Rated {} cards against {} picks ({} themes)",
            rated.len(),
            picks.len(),
            analysis.synergies.len()
        );
        rated
    }
}
