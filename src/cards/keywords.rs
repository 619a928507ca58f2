/// Fixed keyword vocabulary. A card has a keyword when its lowercased oracle
/// text contains the entry as a substring.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "flying",
    "lifelink",
    "vigilance",
    "haste",
    "deathtouch",
    "double strike",
    "trample",
    "shroud",
    "indestructible",
    "regenerate",
    "menace",
    "hexproof",
    "flash",
    "prowess",
    "drain",
    "ramp",
    "tutor",
    "draw",
    "discard",
    "mill",
    "etb",
    "enter the battlefield",
    "sacrifice",
    "token",
    "scry",
    "surveil",
    "adapt",
    "mutate",
    "kicker",
    "spell mastery",
    "aftermath",
    "flashback",
    "madness",
    "delve",
    "revolt",
    "enrage",
    "proliferate",
    "graveyard",
    "recurring",
    "protection",
    "evasion",
    "bounce",
    "counterspell",
];

/// Separator between card types and subtypes on a type line
pub const SUBTYPE_SEPARATOR: char = '—';

/// Keywords found in already-lowercased oracle text, in vocabulary order
pub fn extract_keywords(oracle_lower: &str) -> Vec<String> {
    KEYWORD_VOCABULARY
        .iter()
        .filter(|kw| oracle_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// Lowercased subtype tokens following the em-dash of a type line.
///
/// "Creature — Human Wizard" yields ["human", "wizard"]. Only the segment
/// directly after the first separator is read.
pub fn extract_subtypes(type_line: &str) -> Vec<String> {
    match type_line.split(SUBTYPE_SEPARATOR).nth(1) {
        Some(part) => part.split_whitespace().map(|t| t.to_lowercase()).collect(),
        None => Vec::new(),
    }
}
