pub mod fuzzy;

pub use fuzzy::levenshtein;

use std::collections::HashMap;

use crate::cards::{canonical_name, Card};
use crate::error::{DraftError, Result};

/// Edit distance must be strictly below this for a fuzzy match
pub const MAX_EDIT_DISTANCE: usize = 3;

/// How a query was matched to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
    Fuzzy(usize),
}

/// Outcome of resolving one typed-in name
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Found { card: &'a Card, kind: MatchKind },
    NotFound(String),
}

impl<'a> Resolution<'a> {
    pub fn card(&self) -> Option<&'a Card> {
        match self {
            Resolution::Found { card, .. } => Some(card),
            Resolution::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    pub fn into_result(self) -> Result<&'a Card> {
        match self {
            Resolution::Found { card, .. } => Ok(card),
            Resolution::NotFound(query) => Err(DraftError::CardNotFound(query)),
        }
    }
}

/// Read-only lookup structure over a card pool.
///
/// Built once per pool; every method takes `&self`, so one index can serve
/// any number of concurrent rating requests.
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    by_name: HashMap<String, usize>,
}

impl CardIndex {
    /// Index a pool. Names are unique case-insensitively; for repeated names
    /// (reprints, alternate arts) the first record is kept.
    pub fn build(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(DraftError::EmptyPool);
        }

        let mut index = Self {
            cards: Vec::with_capacity(cards.len()),
            by_name: HashMap::with_capacity(cards.len()),
        };

        for card in cards {
            if index.by_name.contains_key(card.key()) {
                tracing::warn!("Duplicate card '{}' in pool, keeping first", card.name());
                continue;
            }
            index.by_name.insert(card.key().to_string(), index.cards.len());
            index.cards.push(card);
        }

        tracing::debug!("Indexed {} cards", index.cards.len());
        Ok(index)
    }

    /// All cards in pool order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Exact case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&canonical_name(name))
            .map(|&i| &self.cards[i])
    }

    pub fn keywords(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Card::keywords)
    }

    pub fn subtypes(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Card::subtypes)
    }

    pub fn power_toughness(&self, name: &str) -> Option<(f64, f64)> {
        self.get(name).map(Card::power_toughness)
    }

    /// Resolve a typed-in name: exact, then first substring hit in pool order,
    /// then the closest name within `MAX_EDIT_DISTANCE` (first wins on ties).
    pub fn resolve(&self, query: &str) -> Resolution<'_> {
        let key = canonical_name(query);
        if key.is_empty() {
            return Resolution::NotFound(query.to_string());
        }

        if let Some(card) = self.by_name.get(&key).map(|&i| &self.cards[i]) {
            return Resolution::Found {
                card,
                kind: MatchKind::Exact,
            };
        }

        if let Some(card) = self
            .cards
            .iter()
            .find(|c| c.key().contains(key.as_str()) || key.contains(c.key()))
        {
            tracing::debug!("'{}' matched '{}' by substring", query, card.name());
            return Resolution::Found {
                card,
                kind: MatchKind::Substring,
            };
        }

        let mut best: Option<(&Card, usize)> = None;
        for card in &self.cards {
            let distance = levenshtein(&key, card.key());
            if distance >= MAX_EDIT_DISTANCE {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((card, distance));
            }
        }

        match best {
            Some((card, distance)) => {
                tracing::debug!(
                    "'{}' matched '{}' at edit distance {}",
                    query,
                    card.name(),
                    distance
                );
                Resolution::Found {
                    card,
                    kind: MatchKind::Fuzzy(distance),
                }
            }
            None => Resolution::NotFound(query.to_string()),
        }
    }

    /// Resolve each query independently, one result per query
    pub fn resolve_all<S: AsRef<str>>(&self, queries: &[S]) -> Vec<Resolution<'_>> {
        queries.iter().map(|q| self.resolve(q.as_ref())).collect()
    }

    /// Resolve each query, dropping the ones that match nothing
    pub fn resolve_many<S: AsRef<str>>(&self, queries: &[S]) -> Vec<&Card> {
        queries
            .iter()
            .filter_map(|q| match self.resolve(q.as_ref()) {
                Resolution::Found { card, .. } => Some(card),
                Resolution::NotFound(query) => {
                    tracing::debug!("Dropping unresolved pick '{}'", query);
                    None
                }
            })
            .collect()
    }
}
