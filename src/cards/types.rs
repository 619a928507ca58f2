use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::keywords::{extract_keywords, extract_subtypes};

/// One of the five colors of mana. Ordered W, U, B, R, G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];

    /// Parse a single-letter color symbol ("W", "u", ...)
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Parse a rarity name. Unrecognized values ("special", "bonus", ...) are
    /// returned as `None` so the caller can decide on a fallback.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "mythic" => Some(Rarity::Mythic),
            _ => None,
        }
    }

    pub fn is_rare_or_mythic(self) -> bool {
        matches!(self, Rarity::Rare | Rarity::Mythic)
    }
}

/// Card type predicates read off the type line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardTypes {
    pub creature: bool,
    pub instant: bool,
    pub sorcery: bool,
    pub land: bool,
    pub artifact: bool,
    pub enchantment: bool,
}

impl CardTypes {
    pub fn from_type_line(type_line: &str) -> Self {
        Self {
            creature: type_line.contains("Creature"),
            instant: type_line.contains("Instant"),
            sorcery: type_line.contains("Sorcery"),
            land: type_line.contains("Land"),
            artifact: type_line.contains("Artifact"),
            enchantment: type_line.contains("Enchantment"),
        }
    }

    pub fn is_spell(&self) -> bool {
        self.instant || self.sorcery
    }
}

/// A single card of the pool.
///
/// Keywords, subtypes and type predicates are derived once at construction
/// from the oracle text and type line and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    name: String,
    key: String,
    mana_cost: String,
    cmc: f64,
    type_line: String,
    oracle_text: String,
    colors: BTreeSet<Color>,
    color_identity: BTreeSet<Color>,
    rarity: Rarity,
    power: Option<f64>,
    toughness: Option<f64>,
    types: CardTypes,
    keywords: Vec<String>,
    subtypes: Vec<String>,
}

impl Card {
    pub fn new(name: &str, type_line: &str, oracle_text: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            key: canonical_name(name),
            mana_cost: String::new(),
            cmc: 0.0,
            type_line: type_line.to_string(),
            oracle_text: oracle_text.to_string(),
            colors: BTreeSet::new(),
            color_identity: BTreeSet::new(),
            rarity: Rarity::Common,
            power: None,
            toughness: None,
            types: CardTypes::from_type_line(type_line),
            keywords: extract_keywords(&oracle_text.to_lowercase()),
            subtypes: extract_subtypes(type_line),
        }
    }

    pub fn with_mana_cost(mut self, mana_cost: &str, cmc: f64) -> Self {
        self.mana_cost = mana_cost.to_string();
        self.cmc = if cmc.is_finite() { cmc.max(0.0) } else { 0.0 };
        self
    }

    /// Set the casting colors. Colors are also folded into the color identity.
    pub fn with_colors<I: IntoIterator<Item = Color>>(mut self, colors: I) -> Self {
        self.colors = colors.into_iter().collect();
        self.color_identity.extend(self.colors.iter().copied());
        self
    }

    pub fn with_color_identity<I: IntoIterator<Item = Color>>(mut self, identity: I) -> Self {
        self.color_identity = identity.into_iter().collect();
        self.color_identity.extend(self.colors.iter().copied());
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Power and toughness as printed. Values like "*" or "1+*" become `None`.
    pub fn with_power_toughness(mut self, power: Option<&str>, toughness: Option<&str>) -> Self {
        self.power = power.and_then(parse_stat);
        self.toughness = toughness.and_then(parse_stat);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased, trimmed name used as the lookup key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mana_cost(&self) -> &str {
        &self.mana_cost
    }

    pub fn cmc(&self) -> f64 {
        self.cmc
    }

    /// Mana value truncated to a whole number, as used for curve buckets
    pub fn cmc_whole(&self) -> usize {
        self.cmc.floor() as usize
    }

    pub fn type_line(&self) -> &str {
        &self.type_line
    }

    pub fn oracle_text(&self) -> &str {
        &self.oracle_text
    }

    pub fn colors(&self) -> &BTreeSet<Color> {
        &self.colors
    }

    pub fn color_identity(&self) -> &BTreeSet<Color> {
        &self.color_identity
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn types(&self) -> CardTypes {
        self.types
    }

    pub fn is_creature(&self) -> bool {
        self.types.creature
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn subtypes(&self) -> &[String] {
        &self.subtypes
    }

    pub fn shares_subtype(&self, other: &Card) -> bool {
        self.subtypes.iter().any(|s| other.subtypes.contains(s))
    }

    /// Printed power/toughness, if any
    pub fn printed_stats(&self) -> (Option<f64>, Option<f64>) {
        (self.power, self.toughness)
    }

    /// Power and toughness with absent or unparseable values treated as 0
    pub fn power_toughness(&self) -> (f64, f64) {
        (self.power.unwrap_or(0.0), self.toughness.unwrap_or(0.0))
    }
}

/// Canonical lookup key for a card name
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn parse_stat(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
