use crate::analysis::{curve_bucket, DeckAnalysis};
use crate::cards::Card;

use super::config::{
    BalanceWeights, ColorWeights, CompletionWeights, CurveWeights, PowerWeights, SubtypePolicy,
    SynergyWeights,
};

/// One additive sub-score and the reason it produced, if significant
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub score: f64,
    pub reason: Option<String>,
}

impl Factor {
    fn silent(score: f64) -> Self {
        Self { score, reason: None }
    }

    /// Attach `high` when score > threshold, `low` when score < -threshold
    fn with_reason(score: f64, threshold: f64, high: &str, low: Option<&str>) -> Self {
        let reason = if score > threshold {
            Some(format!("{} ({:+.1})", high, score))
        } else if score < -threshold {
            low.map(|l| format!("{} ({:+.1})", l, score))
        } else {
            None
        };
        Self { score, reason }
    }
}

/// Reward mana values the deck is short on, penalize crowded ones
pub fn curve_fit(card: &Card, analysis: &DeckAnalysis, w: &CurveWeights) -> Factor {
    let bucket = curve_bucket(card.cmc_whole());
    let current = analysis.curve[bucket] as f64;
    let ideal = w.ideal[bucket];

    let score = if current < ideal - w.tolerance {
        w.far_below_bonus
    } else if current < ideal {
        w.below_bonus
    } else if current == ideal {
        w.at_ideal
    } else {
        w.crowded_penalty
    };

    Factor::with_reason(
        score,
        w.reason_threshold,
        "good mana curve fit",
        Some("mana curve already crowded"),
    )
}

pub fn color_fit(card: &Card, analysis: &DeckAnalysis, w: &ColorWeights) -> Factor {
    let card_colors = card.colors();
    let deck_colors = &analysis.color_identity;

    let score = if deck_colors.is_empty() {
        if card_colors.is_empty() {
            w.open_colorless
        } else {
            w.open_colored
        }
    } else if !card_colors.is_empty() && card_colors.is_subset(deck_colors) {
        w.on_color
    } else if card_colors.len() == 1 {
        w.off_color_mono
    } else if card_colors.is_empty() {
        w.colorless
    } else if !card_colors.is_disjoint(deck_colors) {
        w.partial_overlap
    } else {
        w.no_overlap
    };

    Factor::with_reason(
        score,
        w.reason_threshold,
        "color synergy",
        Some("color conflict"),
    )
}

/// Share of creatures among creatures and spells, or the default for an empty deck
pub fn creature_ratio(analysis: &DeckAnalysis, default_ratio: f64) -> f64 {
    let total = analysis.creatures + analysis.spells;
    if total == 0 {
        default_ratio
    } else {
        analysis.creatures as f64 / total as f64
    }
}

pub fn balance_fit(card: &Card, analysis: &DeckAnalysis, w: &BalanceWeights) -> Factor {
    let ratio = creature_ratio(analysis, w.default_ratio);

    let score = if card.is_creature() {
        if ratio < w.low_ratio {
            w.creature_scarce
        } else if ratio < w.high_ratio {
            w.creature_ok
        } else {
            w.creature_glut
        }
    } else if ratio > w.high_ratio {
        w.spell_scarce
    } else if ratio > w.low_ratio {
        w.spell_ok
    } else {
        w.spell_glut
    };

    Factor::with_reason(
        score,
        w.reason_threshold,
        "balances deck",
        Some("throws off balance"),
    )
}

/// Keyword overlap, shared creature subtypes, and a few engine pairings
pub fn synergy(card: &Card, analysis: &DeckAnalysis, picks: &[&Card], w: &SynergyWeights) -> Factor {
    let mut score = 0.0;

    for keyword in card.keywords() {
        if analysis.has_keyword(keyword) {
            score += w.keyword_overlap;
        }
    }

    if card.is_creature() {
        let sharing = picks
            .iter()
            .filter(|existing| existing.is_creature() && card.shares_subtype(existing))
            .count();
        let stacks = match w.subtype_policy {
            SubtypePolicy::PerCard => sharing,
            SubtypePolicy::Once => sharing.min(1),
        };
        score += w.shared_subtype * stacks as f64;
    }

    if card.has_keyword("draw") && analysis.has_keyword("draw") {
        score += w.draw_engine;
    }

    if card.has_keyword("sacrifice") && analysis.has_keyword("sacrifice") {
        score += w.sacrifice_engine;
    }

    let evasive = w.evasion_keywords.iter().any(|k| card.has_keyword(k));
    if evasive
        && (analysis.has_keyword("draw")
            || analysis.keyword_count("flying") > w.evasion_flying_min)
    {
        score += w.evasion;
    }

    let reason = if score > w.strong_threshold {
        Some(format!("strong synergies ({:+.1})", score))
    } else if score > 0.0 {
        Some(format!("some synergies ({:+.1})", score))
    } else {
        None
    };

    Factor { score, reason }
}

/// Stat efficiency for creatures, effect text for instants and sorceries
pub fn power_level(card: &Card, w: &PowerWeights) -> Factor {
    let mut score = 0.0;

    if card.is_creature() {
        let (power, toughness) = card.power_toughness();
        let value = (power + toughness) / card.cmc().max(1.0);

        if value >= w.great_value {
            score += w.great_bonus;
        } else if value >= w.good_value {
            score += w.good_bonus;
        } else if value < w.poor_value {
            score += w.poor_penalty;
        }

        if w.evasive_keywords.iter().any(|k| card.has_keyword(k)) {
            score += w.evasive_bonus;
        }
    }

    if card.types().is_spell() {
        let oracle = card.oracle_text().to_lowercase();
        let mentions = |words: &[String]| words.iter().any(|word| oracle.contains(word.as_str()));

        if mentions(&w.removal_words) {
            score += w.removal;
        } else if mentions(&w.draw_words) {
            score += w.card_draw;
        } else if mentions(&w.disruption_words) {
            score += w.disruption;
        }
    }

    let reason = (score > w.reason_threshold)
        .then(|| format!("strong limited card ({:+.1})", score));

    Factor { score, reason }
}

/// Shrinking bonus for filling the deck. Never carries a reason.
pub fn completion(analysis: &DeckAnalysis, w: &CompletionWeights) -> Factor {
    let target = w.target_deck_size.max(1) as f64;
    let remaining = target - analysis.count as f64;
    Factor::silent(w.weight * remaining / target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::cards::Color;
    use crate::scoring::ScoringConfig;

    fn creature(name: &str, subtypes: &str, cmc: f64, pt: (&str, &str), oracle: &str) -> Card {
        Card::new(name, &format!("Creature — {}", subtypes), oracle)
            .with_mana_cost("", cmc)
            .with_power_toughness(Some(pt.0), Some(pt.1))
    }

    fn colored(card: Card, colors: &[Color]) -> Card {
        card.with_colors(colors.iter().copied())
    }

    #[test]
    fn test_curve_far_below_ideal() {
        let config = ScoringConfig::default();
        let analysis = analyze(&[] as &[Card]);
        let card = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        let f = curve_fit(&card, &analysis, &config.curve);
        assert_eq!(f.score, 2.0);
        assert_eq!(f.reason.as_deref(), Some("good mana curve fit (+2.0)"));
    }

    #[test]
    fn test_curve_just_below_ideal() {
        let config = ScoringConfig::default();
        let picks: Vec<Card> = (0..3)
            .map(|i| creature(&format!("B{}", i), "Bear", 2.0, ("2", "2"), ""))
            .collect();
        let analysis = analyze(&picks);
        let card = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        // 3 two-drops against an ideal of 3.5
        let f = curve_fit(&card, &analysis, &config.curve);
        assert_eq!(f.score, 1.0);
        assert_eq!(f.reason, None);
    }

    #[test]
    fn test_curve_at_and_over_ideal() {
        let config = ScoringConfig::default();
        let three: Vec<Card> = (0..3)
            .map(|i| Card::new(&format!("S{}", i), "Sorcery", "").with_mana_cost("", 3.0))
            .collect();
        let card = Card::new("Three", "Sorcery", "").with_mana_cost("", 3.0);
        assert_eq!(curve_fit(&card, &analyze(&three), &config.curve).score, 0.0);

        let four: Vec<Card> = (0..4)
            .map(|i| Card::new(&format!("S{}", i), "Sorcery", "").with_mana_cost("", 3.0))
            .collect();
        let f = curve_fit(&card, &analyze(&four), &config.curve);
        assert_eq!(f.score, -1.5);
        assert_eq!(f.reason.as_deref(), Some("mana curve already crowded (-1.5)"));
    }

    #[test]
    fn test_curve_six_plus_bucket() {
        let config = ScoringConfig::default();
        let picks = vec![Card::new("Big", "Sorcery", "").with_mana_cost("", 7.0)];
        let card = Card::new("Bigger", "Sorcery", "").with_mana_cost("", 9.0);
        // one 6+ drop against an ideal of 1.5
        assert_eq!(curve_fit(&card, &analyze(&picks), &config.curve).score, 1.0);
    }

    #[test]
    fn test_color_open_deck() {
        let w = ColorWeights::default();
        let analysis = analyze(&[] as &[Card]);
        let colorless = Card::new("Rock", "Artifact", "");
        let red = colored(Card::new("Shock", "Instant", ""), &[Color::Red]);
        assert_eq!(color_fit(&colorless, &analysis, &w).score, 0.5);
        let f = color_fit(&red, &analysis, &w);
        assert_eq!(f.score, 0.3);
        assert_eq!(f.reason, None);
    }

    #[test]
    fn test_color_on_color() {
        let w = ColorWeights::default();
        let picks = vec![colored(Card::new("A", "Instant", ""), &[Color::Blue, Color::Black])];
        let card = colored(Card::new("B", "Instant", ""), &[Color::Blue]);
        let f = color_fit(&card, &analyze(&picks), &w);
        assert_eq!(f.score, 1.5);
        assert_eq!(f.reason.as_deref(), Some("color synergy (+1.5)"));
    }

    #[test]
    fn test_color_off_color_mono_is_minus_two() {
        let w = ColorWeights::default();
        let picks = vec![colored(Card::new("A", "Instant", ""), &[Color::Blue, Color::Black])];
        let card = colored(Card::new("B", "Instant", ""), &[Color::White]);
        let f = color_fit(&card, &analyze(&picks), &w);
        assert_eq!(f.score, -2.0);
        assert_eq!(f.reason.as_deref(), Some("color conflict (-2.0)"));
    }

    #[test]
    fn test_color_colorless_partial_and_none() {
        let w = ColorWeights::default();
        let picks = vec![colored(Card::new("A", "Instant", ""), &[Color::Blue])];
        let analysis = analyze(&picks);

        let rock = Card::new("Rock", "Artifact", "");
        assert_eq!(color_fit(&rock, &analysis, &w).score, 0.5);

        let gold = colored(Card::new("Gold", "Instant", ""), &[Color::Blue, Color::Red]);
        assert_eq!(color_fit(&gold, &analysis, &w).score, 0.0);

        let other = colored(Card::new("Other", "Instant", ""), &[Color::Red, Color::Green]);
        assert_eq!(color_fit(&other, &analysis, &w).score, -1.5);
    }

    #[test]
    fn test_balance_default_ratio() {
        let w = BalanceWeights::default();
        let analysis = analyze(&[] as &[Card]);
        assert_eq!(creature_ratio(&analysis, w.default_ratio), 0.5);

        let bear = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        let f = balance_fit(&bear, &analysis, &w);
        assert_eq!(f.score, 1.5);
        assert_eq!(f.reason.as_deref(), Some("balances deck (+1.5)"));

        let bolt = Card::new("Bolt", "Instant", "");
        assert_eq!(balance_fit(&bolt, &analysis, &w).score, -0.5);
    }

    #[test]
    fn test_balance_creature_heavy() {
        let w = BalanceWeights::default();
        let picks: Vec<Card> = (0..4)
            .map(|i| creature(&format!("C{}", i), "Elf", 1.0, ("1", "1"), ""))
            .collect();
        let analysis = analyze(&picks);
        let bear = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        let f = balance_fit(&bear, &analysis, &w);
        assert_eq!(f.score, -1.0);
        assert_eq!(f.reason.as_deref(), Some("throws off balance (-1.0)"));

        let bolt = Card::new("Bolt", "Instant", "");
        assert_eq!(balance_fit(&bolt, &analysis, &w).score, 1.5);
    }

    #[test]
    fn test_balance_middle_band() {
        let w = BalanceWeights::default();
        let mut picks: Vec<Card> = (0..2)
            .map(|i| creature(&format!("C{}", i), "Elf", 1.0, ("1", "1"), ""))
            .collect();
        picks.push(Card::new("Bolt", "Instant", ""));
        // ratio 2/3
        let analysis = analyze(&picks);
        let bear = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        let f = balance_fit(&bear, &analysis, &w);
        assert_eq!(f.score, 0.5);
        assert_eq!(f.reason, None);
        assert_eq!(balance_fit(&picks[2], &analysis, &w).score, 0.5);
    }

    #[test]
    fn test_synergy_sacrifice_stacks_with_overlap() {
        let w = SynergyWeights::default();
        let picks = vec![
            Card::new("Altar", "Artifact", "Sacrifice a creature: add {C}{C}."),
            Card::new("Fodder", "Sorcery", "As an additional cost, sacrifice a creature."),
        ];
        let analysis = analyze(&picks);
        assert_eq!(analysis.keyword_count("sacrifice"), 2);

        let card = Card::new("Bomb", "Instant", "Sacrifice an artifact.");
        let refs: Vec<&Card> = picks.iter().collect();
        let f = synergy(&card, &analysis, &refs, &w);
        // +1.0 keyword overlap, +1.0 sacrifice engine
        assert_eq!(f.score, 2.0);
        assert_eq!(f.reason.as_deref(), Some("strong synergies (+2.0)"));
    }

    #[test]
    fn test_synergy_draw_engine() {
        let w = SynergyWeights::default();
        let picks = vec![Card::new("Opt", "Instant", "Scry 1. Draw a card.")];
        let analysis = analyze(&picks);
        let card = Card::new("Divination", "Sorcery", "Draw two cards.");
        let refs: Vec<&Card> = picks.iter().collect();
        let f = synergy(&card, &analysis, &refs, &w);
        assert_eq!(f.score, 1.5);
    }

    #[test]
    fn test_synergy_subtypes_per_card_and_once() {
        let picks = vec![
            creature("H1", "Human Soldier", 1.0, ("1", "1"), ""),
            creature("H2", "Human Cleric", 2.0, ("1", "2"), ""),
            creature("E1", "Elf", 1.0, ("1", "1"), ""),
        ];
        let analysis = analyze(&picks);
        let refs: Vec<&Card> = picks.iter().collect();
        let card = creature("H3", "Human Wizard", 2.0, ("2", "1"), "");

        let per_card = SynergyWeights::default();
        let f = synergy(&card, &analysis, &refs, &per_card);
        assert_eq!(f.score, 1.0);
        assert_eq!(f.reason.as_deref(), Some("some synergies (+1.0)"));

        let once = SynergyWeights {
            subtype_policy: SubtypePolicy::Once,
            ..SynergyWeights::default()
        };
        assert_eq!(synergy(&card, &analysis, &refs, &once).score, 0.5);
    }

    #[test]
    fn test_synergy_subtypes_ignore_noncreatures() {
        let picks = vec![Card::new("Aura", "Enchantment — Aura", "")];
        let analysis = analyze(&picks);
        let refs: Vec<&Card> = picks.iter().collect();
        let card = Card::new("Other Aura", "Enchantment — Aura", "");
        assert_eq!(synergy(&card, &analysis, &refs, &SynergyWeights::default()).score, 0.0);
    }

    #[test]
    fn test_synergy_evasion_with_flyers() {
        let picks = vec![
            creature("F1", "Bird", 1.0, ("1", "1"), "Flying"),
            creature("F2", "Bat", 1.0, ("1", "1"), "Flying"),
        ];
        let analysis = analyze(&picks);
        let refs: Vec<&Card> = picks.iter().collect();
        let card = creature("Ogre", "Ogre", 3.0, ("3", "3"), "Menace");
        // no overlap, no subtypes shared, menace + two flyers
        let f = synergy(&card, &analysis, &refs, &SynergyWeights::default());
        assert_eq!(f.score, 0.5);
    }

    #[test]
    fn test_synergy_none() {
        let analysis = analyze(&[] as &[Card]);
        let card = creature("Bear", "Bear", 2.0, ("2", "2"), "");
        let f = synergy(&card, &analysis, &[], &SynergyWeights::default());
        assert_eq!(f, Factor { score: 0.0, reason: None });
    }

    #[test]
    fn test_power_efficient_evasive_creature() {
        let w = PowerWeights::default();
        let card = creature("Drake", "Drake", 2.0, ("2", "2"), "Flying");
        // (2+2)/2 = 2.0
        let f = power_level(&card, &w);
        assert_eq!(f.score, 2.0);
        assert_eq!(f.reason.as_deref(), Some("strong limited card (+2.0)"));
    }

    #[test]
    fn test_power_poor_creature() {
        let w = PowerWeights::default();
        let card = creature("Wall", "Wall", 5.0, ("0", "3"), "");
        assert_eq!(power_level(&card, &w).score, -1.0);
    }

    #[test]
    fn test_power_zero_cost_uses_min_denominator() {
        let w = PowerWeights::default();
        let card = creature("Ornithopter", "Thopter", 0.0, ("0", "2"), "Flying");
        // (0+2)/max(1,0) = 2.0
        assert_eq!(power_level(&card, &w).score, 2.0);
    }

    #[test]
    fn test_power_unparseable_stats() {
        let w = PowerWeights::default();
        let card = creature("Goyf", "Lhurgoyf", 2.0, ("*", "1+*"), "");
        assert_eq!(power_level(&card, &w).score, -1.0);
    }

    #[test]
    fn test_power_spell_tiers() {
        let w = PowerWeights::default();
        let removal = Card::new("Murder", "Instant", "Destroy target creature.");
        let draw = Card::new("Divination", "Sorcery", "Draw two cards.");
        let fog = Card::new("Fog", "Instant", "Prevent all combat damage.");
        let fizzle = Card::new("Nothing", "Sorcery", "Gain 3 life.");

        let f = power_level(&removal, &w);
        assert_eq!(f.score, 1.5);
        assert!(f.reason.is_some());
        // "damage" matches the removal tier before "prevent"
        assert_eq!(power_level(&fog, &w).score, 1.5);
        let f = power_level(&draw, &w);
        assert_eq!(f.score, 1.0);
        assert_eq!(f.reason, None);
        assert_eq!(power_level(&fizzle, &w).score, 0.0);

        let stifle = Card::new("Silence", "Instant", "Your opponents can't cast spells this turn.");
        assert_eq!(power_level(&stifle, &w).score, 0.5);
    }

    #[test]
    fn test_power_ignores_other_types() {
        let w = PowerWeights::default();
        let card = Card::new("Pacifism", "Enchantment — Aura", "Enchanted creature can't attack.");
        assert_eq!(power_level(&card, &w).score, 0.0);
    }

    #[test]
    fn test_completion_bonus() {
        let w = CompletionWeights::default();
        assert_eq!(completion(&analyze(&[] as &[Card]), &w).score, 0.5);

        let picks: Vec<Card> = (0..20)
            .map(|i| Card::new(&format!("C{}", i), "Sorcery", ""))
            .collect();
        let f = completion(&analyze(&picks), &w);
        assert_eq!(f.score, 0.25);
        assert_eq!(f.reason, None);
    }
}
