use std::collections::{BTreeMap, BTreeSet};

use crate::cards::Color;

/// Keyword themes, checked in order: (keyword, minimum occurrences, label)
pub const KEYWORD_THEMES: &[(&str, usize, &str)] = &[
    ("flying", 3, "flying theme"),
    ("lifelink", 2, "lifelink synergy"),
    ("token", 2, "token generation"),
    ("sacrifice", 2, "sacrifice synergy"),
    ("graveyard", 2, "graveyard synergy"),
    ("proliferate", 1, "proliferate theme"),
    ("mill", 2, "mill synergy"),
    ("draw", 3, "card draw theme"),
    ("counterspell", 2, "control theme"),
];

/// How many of the most common subtypes are considered for tribal labels
pub const TRIBAL_CANDIDATES: usize = 3;

/// Occurrences a subtype needs to earn a tribal label
pub const TRIBAL_MIN_COUNT: usize = 2;

/// Theme labels for a finished deck: keyword themes, then a color label,
/// then up to three tribal labels.
///
/// `subtype_counts` must be in first-seen order so that ties among equally
/// common subtypes resolve the same way every time.
pub fn detect_synergies(
    keywords: &BTreeMap<String, usize>,
    color_identity: &BTreeSet<Color>,
    subtype_counts: &[(String, usize)],
) -> Vec<String> {
    let mut labels: Vec<String> = KEYWORD_THEMES
        .iter()
        .filter(|(kw, min, _)| keywords.get(*kw).copied().unwrap_or(0) >= *min)
        .map(|(_, _, label)| label.to_string())
        .collect();

    if let Some(label) = color_label(color_identity) {
        labels.push(label);
    }

    labels.extend(tribal_labels(subtype_counts));
    labels
}

/// "mono-red deck" for one color, "BR colors" for two, nothing otherwise
pub fn color_label(identity: &BTreeSet<Color>) -> Option<String> {
    match identity.len() {
        1 => identity
            .iter()
            .next()
            .map(|c| format!("mono-{} deck", c.name())),
        2 => {
            let mut letters: Vec<char> = identity.iter().map(|c| c.symbol()).collect();
            letters.sort_unstable();
            Some(format!("{} colors", letters.into_iter().collect::<String>()))
        }
        _ => None,
    }
}

fn tribal_labels(subtype_counts: &[(String, usize)]) -> Vec<String> {
    let mut ranked: Vec<&(String, usize)> = subtype_counts.iter().collect();
    // stable: equal counts keep first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TRIBAL_CANDIDATES)
        .filter(|(_, count)| *count >= TRIBAL_MIN_COUNT)
        .map(|(subtype, _)| format!("{} synergy", subtype))
        .collect()
}
