use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::{Card, Color, Rarity};

/// A card record in the card database's JSON field naming.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub name: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_identity: Option<Vec<String>>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub power: Option<StatValue>,
    #[serde(default)]
    pub toughness: Option<StatValue>,
    /// Faces of split, adventure and double-faced cards
    #[serde(default)]
    pub card_faces: Option<Vec<RawFace>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFace {
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub power: Option<StatValue>,
    #[serde(default)]
    pub toughness: Option<StatValue>,
}

/// Power/toughness arrive as strings ("2", "*") but hand-written pools often use numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    fn as_text(&self) -> String {
        match self {
            StatValue::Number(n) => n.to_string(),
            StatValue::Text(s) => s.clone(),
        }
    }
}

/// A pool file is either a bare array or a search-result page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PoolFile {
    Page { data: Vec<RawCard> },
    List(Vec<RawCard>),
}

impl RawCard {
    /// Normalize into a `Card`. Returns `None` for records without a name.
    pub fn into_card(self) -> Option<Card> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let faces = self.card_faces.unwrap_or_default();
        let front = faces.first();

        let oracle_text = match self.oracle_text {
            Some(text) => text,
            None => faces
                .iter()
                .filter_map(|f| f.oracle_text.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        let mana_cost = self
            .mana_cost
            .or_else(|| front.and_then(|f| f.mana_cost.clone()))
            .unwrap_or_default();
        let colors = self
            .colors
            .or_else(|| front.and_then(|f| f.colors.clone()))
            .unwrap_or_default();
        let power = self.power.or_else(|| front.and_then(|f| f.power.clone()));
        let toughness = self
            .toughness
            .or_else(|| front.and_then(|f| f.toughness.clone()));

        let rarity = match self.rarity.as_deref() {
            None => Rarity::Common,
            Some(r) => Rarity::parse(r).unwrap_or_else(|| {
                tracing::debug!("Unknown rarity '{}' on {}, treating as common", r, name);
                Rarity::Common
            }),
        };

        let power = power.map(|p| p.as_text());
        let toughness = toughness.map(|t| t.as_text());

        Some(
            Card::new(&name, self.type_line.as_deref().unwrap_or(""), &oracle_text)
                .with_mana_cost(&mana_cost, self.cmc.unwrap_or(0.0))
                .with_colors(parse_colors(&colors))
                .with_color_identity(parse_colors(&self.color_identity.unwrap_or_default()))
                .with_rarity(rarity)
                .with_power_toughness(power.as_deref(), toughness.as_deref()),
        )
    }
}

fn parse_colors(symbols: &[String]) -> Vec<Color> {
    symbols.iter().filter_map(|s| Color::from_symbol(s)).collect()
}

/// Parse a pool from JSON text. Records without a name are skipped.
pub fn parse_pool(json: &str) -> Result<Vec<Card>> {
    let file: PoolFile = serde_json::from_str(json).context("Failed to parse card pool JSON")?;
    Ok(normalize(file))
}

/// Load a card pool from a local JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a card array or
/// search-result page.
pub fn load_pool(path: &Path) -> Result<Vec<Card>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open card pool at {}", path.display()))?;
    let pool: PoolFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse card pool in {}", path.display()))?;
    let cards = normalize(pool);
    tracing::debug!("Loaded {} cards from {}", cards.len(), path.display());
    Ok(cards)
}

fn normalize(file: PoolFile) -> Vec<Card> {
    let raw = match file {
        PoolFile::Page { data } => data,
        PoolFile::List(list) => list,
    };
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let card = record.into_card();
            if card.is_none() {
                tracing::warn!("Skipping pool record {} without a name", i);
            }
            card
        })
        .collect()
}
