use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::synergy::detect_synergies;
use crate::cards::{Card, Color};

/// Number of display curve buckets: 0..=5 exact, 6 holds "6 or more"
pub const CURVE_BUCKETS: usize = 7;

/// Summary of the current picks. Rebuilt on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckAnalysis {
    pub count: usize,
    pub creatures: usize,
    /// Instants and sorceries
    pub spells: usize,
    pub lands: usize,
    /// Exact whole mana value -> count
    pub cmc_exact: BTreeMap<usize, usize>,
    /// Display curve, bucket 6 folds everything at 6 or above
    pub curve: [usize; CURVE_BUCKETS],
    pub colors: BTreeMap<Color, usize>,
    pub color_identity: BTreeSet<Color>,
    pub keywords: BTreeMap<String, usize>,
    pub total_cmc: f64,
    pub avg_cmc: f64,
    pub synergies: Vec<String>,
}

impl DeckAnalysis {
    pub fn keyword_count(&self, keyword: &str) -> usize {
        self.keywords.get(keyword).copied().unwrap_or(0)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword_count(keyword) > 0
    }

    /// Count in the display curve for a mana value, folding 6+ together
    pub fn curve_count(&self, cmc_whole: usize) -> usize {
        self.curve[curve_bucket(cmc_whole)]
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn curve_bucket(cmc_whole: usize) -> usize {
    cmc_whole.min(CURVE_BUCKETS - 1)
}

/// Reduce the picks, in order, into a `DeckAnalysis`.
pub fn analyze<'a, I>(cards: I) -> DeckAnalysis
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut analysis = DeckAnalysis::default();
    // first-seen order, for deterministic tribal tie-breaks
    let mut subtype_counts: Vec<(String, usize)> = Vec::new();

    for card in cards {
        analysis.count += 1;

        let types = card.types();
        if types.creature {
            analysis.creatures += 1;
        } else if types.is_spell() {
            analysis.spells += 1;
        }
        if types.land {
            analysis.lands += 1;
        }

        let whole = card.cmc_whole();
        analysis.total_cmc += card.cmc();
        *analysis.cmc_exact.entry(whole).or_insert(0) += 1;
        analysis.curve[curve_bucket(whole)] += 1;

        for color in card.colors() {
            *analysis.colors.entry(*color).or_insert(0) += 1;
        }
        analysis
            .color_identity
            .extend(card.color_identity().iter().copied());

        for keyword in card.keywords() {
            *analysis.keywords.entry(keyword.clone()).or_insert(0) += 1;
        }

        for subtype in card.subtypes() {
            match subtype_counts.iter_mut().find(|(s, _)| s == subtype) {
                Some((_, n)) => *n += 1,
                None => subtype_counts.push((subtype.clone(), 1)),
            }
        }
    }

    if analysis.count > 0 {
        analysis.avg_cmc = analysis.total_cmc / analysis.count as f64;
    }

    analysis.synergies = detect_synergies(
        &analysis.keywords,
        &analysis.color_identity,
        &subtype_counts,
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature(name: &str, subtypes: &str, cmc: f64, color: Color, oracle: &str) -> Card {
        Card::new(name, &format!("Creature — {}", subtypes), oracle)
            .with_mana_cost("", cmc)
            .with_colors([color])
    }

    fn spell(name: &str, type_line: &str, cmc: f64, color: Color, oracle: &str) -> Card {
        Card::new(name, type_line, oracle)
            .with_mana_cost("", cmc)
            .with_colors([color])
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze(&[] as &[Card]);
        assert_eq!(analysis.count, 0);
        assert_eq!(analysis.avg_cmc, 0.0);
        assert!(analysis.synergies.is_empty());
        assert!(analysis.keywords.is_empty());
        assert!(analysis.colors.is_empty());
        assert!(analysis.cmc_exact.is_empty());
        assert_eq!(analysis.curve, [0; CURVE_BUCKETS]);
        assert!(analysis.is_empty());
    }

    #[test]
    fn test_type_counters() {
        let cards = vec![
            creature("Bear", "Bear", 2.0, Color::Green, ""),
            spell("Shock", "Instant", 1.0, Color::Red, "Shock deals 2 damage."),
            spell("Divination", "Sorcery", 3.0, Color::Blue, "Draw two cards."),
            Card::new("Forest", "Basic Land — Forest", ""),
            Card::new("Dryad Arbor", "Land Creature — Forest Dryad", ""),
        ];
        let analysis = analyze(&cards);
        assert_eq!(analysis.count, 5);
        assert_eq!(analysis.creatures, 2);
        assert_eq!(analysis.spells, 2);
        assert_eq!(analysis.lands, 2);
    }

    #[test]
    fn test_curve_folds_six_plus() {
        let cards = vec![
            spell("A", "Sorcery", 6.0, Color::Red, ""),
            spell("B", "Sorcery", 8.0, Color::Red, ""),
            spell("C", "Sorcery", 2.0, Color::Red, ""),
        ];
        let analysis = analyze(&cards);
        assert_eq!(analysis.curve[6], 2);
        assert_eq!(analysis.curve[2], 1);
        assert_eq!(analysis.cmc_exact.get(&8), Some(&1));
        assert_eq!(analysis.cmc_exact.get(&6), Some(&1));
        assert_eq!(analysis.curve_count(11), 2);
        assert!((analysis.avg_cmc - 16.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_colors_and_identity() {
        let cards = vec![
            creature("A", "Elf", 1.0, Color::Green, ""),
            creature("B", "Elf", 1.0, Color::Green, ""),
            Card::new("Signet", "Artifact", "").with_color_identity([Color::Black]),
        ];
        let analysis = analyze(&cards);
        assert_eq!(analysis.colors.get(&Color::Green), Some(&2));
        assert_eq!(analysis.colors.get(&Color::Black), None);
        assert!(analysis.color_identity.contains(&Color::Black));
        assert_eq!(analysis.color_identity.len(), 2);
    }

    #[test]
    fn test_keywords_and_synergies() {
        let cards = vec![
            creature("A", "Bird", 2.0, Color::Blue, "Flying"),
            creature("B", "Bird", 2.0, Color::Blue, "Flying"),
            creature("C", "Drake", 3.0, Color::Blue, "Flying. When this enters, draw a card."),
        ];
        let analysis = analyze(&cards);
        assert_eq!(analysis.keyword_count("flying"), 3);
        assert_eq!(analysis.keyword_count("draw"), 1);
        assert!(analysis.has_keyword("draw"));
        assert!(!analysis.has_keyword("mill"));
        assert_eq!(
            analysis.synergies,
            vec!["flying theme", "mono-blue deck", "bird synergy"]
        );
    }

    #[test]
    fn test_tribal_counts_all_cards() {
        let cards = vec![
            creature("A", "Human Soldier", 1.0, Color::White, ""),
            creature("B", "Human Cleric", 2.0, Color::Red, ""),
            spell("Aura", "Enchantment — Aura", 1.0, Color::White, ""),
        ];
        let analysis = analyze(&cards);
        assert!(analysis.synergies.contains(&"human synergy".to_string()));
        assert!(analysis.synergies.contains(&"RW colors".to_string()));
        assert!(!analysis.synergies.contains(&"aura synergy".to_string()));
    }

    #[test]
    fn test_analyze_accepts_references() {
        let pool = vec![creature("A", "Elf", 1.0, Color::Green, "")];
        let picks: Vec<&Card> = pool.iter().collect();
        assert_eq!(analyze(picks.iter().copied()).count, 1);
    }
}
