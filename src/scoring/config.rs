use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Every weight and threshold the scorer uses lives here. Each section can be
/// partially overridden; unnamed fields keep their defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   base_rating: 5
///   include_picked: false
///   curve:
///     ideal: [0, 2.5, 3.5, 3, 2.5, 2, 1.5]
///   synergy:
///     subtype_policy: once
///   completion:
///     target_deck_size: 40
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Rating every card starts from before factors are added (default: 5.0)
    pub base_rating: f64,

    /// Final ratings are clamped into [min_rating, max_rating]
    pub min_rating: f64,
    pub max_rating: f64,

    /// Whether `rate` also lists cards that are already picked
    pub include_picked: bool,

    pub curve: CurveWeights,
    pub color: ColorWeights,
    pub balance: BalanceWeights,
    pub synergy: SynergyWeights,
    pub power: PowerWeights,
    pub completion: CompletionWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_rating: 5.0,
            min_rating: 1.0,
            max_rating: 10.0,
            include_picked: false,
            curve: CurveWeights::default(),
            color: ColorWeights::default(),
            balance: BalanceWeights::default(),
            synergy: SynergyWeights::default(),
            power: PowerWeights::default(),
            completion: CompletionWeights::default(),
        }
    }
}

/// Mana-curve fit.
///
/// `ideal[n]` is the target count of n-drops; index 6 covers 6 and above.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CurveWeights {
    pub ideal: [f64; 7],
    /// How far below ideal counts as "far below"
    pub tolerance: f64,
    pub far_below_bonus: f64,
    pub below_bonus: f64,
    pub at_ideal: f64,
    pub crowded_penalty: f64,
    pub reason_threshold: f64,
}

impl Default for CurveWeights {
    fn default() -> Self {
        Self {
            ideal: [0.0, 2.5, 3.5, 3.0, 2.5, 2.0, 1.5],
            tolerance: 1.0,
            far_below_bonus: 2.0,
            below_bonus: 1.0,
            at_ideal: 0.0,
            crowded_penalty: -1.5,
            reason_threshold: 1.0,
        }
    }
}

/// Color fit against the deck's color identity.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColorWeights {
    /// Deck has no colors yet, card is colorless
    pub open_colorless: f64,
    /// Deck has no colors yet, card is colored
    pub open_colored: f64,
    /// Card colors are a subset of the deck's
    pub on_color: f64,
    /// Single-color card outside the deck's colors
    pub off_color_mono: f64,
    pub colorless: f64,
    /// Multicolor card sharing at least one color
    pub partial_overlap: f64,
    pub no_overlap: f64,
    pub reason_threshold: f64,
}

impl Default for ColorWeights {
    fn default() -> Self {
        Self {
            open_colorless: 0.5,
            open_colored: 0.3,
            on_color: 1.5,
            off_color_mono: -2.0,
            colorless: 0.5,
            partial_overlap: 0.0,
            no_overlap: -1.5,
            reason_threshold: 0.5,
        }
    }
}

/// Creature/spell balance. The ratio is creatures / (creatures + spells).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BalanceWeights {
    /// Ratio assumed when the deck has neither creatures nor spells
    pub default_ratio: f64,
    pub low_ratio: f64,
    pub high_ratio: f64,
    pub creature_scarce: f64,
    pub creature_ok: f64,
    pub creature_glut: f64,
    pub spell_scarce: f64,
    pub spell_ok: f64,
    pub spell_glut: f64,
    pub reason_threshold: f64,
}

impl Default for BalanceWeights {
    fn default() -> Self {
        Self {
            default_ratio: 0.5,
            low_ratio: 0.55,
            high_ratio: 0.75,
            creature_scarce: 1.5,
            creature_ok: 0.5,
            creature_glut: -1.0,
            spell_scarce: 1.5,
            spell_ok: 0.5,
            spell_glut: -0.5,
            reason_threshold: 0.5,
        }
    }
}

/// How shared creature subtypes are rewarded
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubtypePolicy {
    /// Once per existing creature sharing a subtype (stacks)
    #[default]
    PerCard,
    /// At most once per candidate
    Once,
}

/// Synergy with cards already picked.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SynergyWeights {
    /// Per candidate keyword already present in the deck
    pub keyword_overlap: f64,
    pub shared_subtype: f64,
    pub subtype_policy: SubtypePolicy,
    /// Candidate draws and the deck already draws
    pub draw_engine: f64,
    /// Candidate sacrifices and the deck already sacrifices
    pub sacrifice_engine: f64,
    pub evasion: f64,
    pub evasion_keywords: Vec<String>,
    /// Evasion bonus also applies when the deck has more flyers than this
    pub evasion_flying_min: usize,
    /// Above this the reason reads "strong synergies"
    pub strong_threshold: f64,
}

impl Default for SynergyWeights {
    fn default() -> Self {
        Self {
            keyword_overlap: 1.0,
            shared_subtype: 0.5,
            subtype_policy: SubtypePolicy::PerCard,
            draw_engine: 0.5,
            sacrifice_engine: 1.0,
            evasion: 0.5,
            evasion_keywords: vec![
                "flying".to_string(),
                "menace".to_string(),
                "evasion".to_string(),
            ],
            evasion_flying_min: 1,
            strong_threshold: 1.0,
        }
    }
}

/// Intrinsic power level in limited.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PowerWeights {
    /// Creature stat value is (power + toughness) / max(1, cmc)
    pub great_value: f64,
    pub great_bonus: f64,
    pub good_value: f64,
    pub good_bonus: f64,
    pub poor_value: f64,
    pub poor_penalty: f64,
    pub evasive_keywords: Vec<String>,
    pub evasive_bonus: f64,
    /// Instant/sorcery oracle words, checked in tiers: removal, draw, disruption
    pub removal_words: Vec<String>,
    pub removal: f64,
    pub draw_words: Vec<String>,
    pub card_draw: f64,
    pub disruption_words: Vec<String>,
    pub disruption: f64,
    pub reason_threshold: f64,
}

impl Default for PowerWeights {
    fn default() -> Self {
        Self {
            great_value: 2.0,
            great_bonus: 1.5,
            good_value: 1.5,
            good_bonus: 0.5,
            poor_value: 0.8,
            poor_penalty: -1.0,
            evasive_keywords: strings(&["flying", "menace", "trample"]),
            evasive_bonus: 0.5,
            removal_words: strings(&["destroy", "exile", "damage", "discard", "counter"]),
            removal: 1.5,
            draw_words: strings(&["draw"]),
            card_draw: 1.0,
            disruption_words: strings(&["can't", "prevent"]),
            disruption: 0.5,
            reason_threshold: 1.0,
        }
    }
}

/// Bonus that shrinks as the deck approaches its target size.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionWeights {
    pub target_deck_size: usize,
    pub weight: f64,
}

impl Default for CompletionWeights {
    fn default() -> Self {
        Self {
            target_deck_size: 40,
            weight: 0.5,
        }
    }
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
