use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::analysis::DeckAnalysis;
use crate::cards::Card;
use crate::index::{MatchKind, Resolution};
use crate::rater::RatedCard;

/// Deck size the statistics view measures against
const DECK_TARGET: usize = 40;

/// Highest mana value given its own bar in the statistics view
const STATS_MAX_CMC: usize = 6;

const RULE_WIDTH: usize = 60;

/// Column widths of the ranked table
const NAME_WIDTH: usize = 25;
const MANA_WIDTH: usize = 15;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Mana cost with braces swapped for brackets ("{1}{R}" -> "[1][R]").
/// Cards without a cost show "0".
pub fn format_mana_cost(mana_cost: &str) -> String {
    if mana_cost.is_empty() {
        return "0".to_string();
    }
    mana_cost.replace('{', "[").replace('}', "]")
}

/// Rating as "R.R/10", right-aligned to 4 chars before the slash
pub fn format_rating(rating: f64) -> String {
    format!("{:4.1}/10", rating)
}

/// Color a rating string by band: >=8 bright green, >=6 green, >=4 yellow,
/// >=2 bright red, below that red
fn color_rating(text: &str, rating: f64) -> String {
    if rating >= 8.0 {
        text.bright_green().to_string()
    } else if rating >= 6.0 {
        text.green().to_string()
    } else if rating >= 4.0 {
        text.yellow().to_string()
    } else if rating >= 2.0 {
        text.bright_red().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format the best `top` ratings as a ranked table.
///
/// Each card takes two lines: "NN. R.R/10  name  mana  type" and an indented
/// "→ explanation". The type column is cut to the terminal width when stdout
/// is a terminal.
pub fn format_rated_table(rated: &[RatedCard], top: usize, use_colors: bool) -> String {
    if rated.is_empty() {
        return "No recommendations. Add picks that match the pool.".to_string();
    }

    let term_width = get_terminal_width();
    // "NN. " + "RR.R/10 " + name + " " + mana + " "
    let fixed_width = 4 + 8 + NAME_WIDTH + 1 + MANA_WIDTH + 1;

    rated
        .iter()
        .take(top)
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>2}.", idx + 1);
            let rating_str = format_rating(entry.rating);
            let name = format!("{:<width$}", entry.name, width = NAME_WIDTH);
            let mana = format!(
                "{:<width$}",
                format_mana_cost(entry.card.mana_cost()),
                width = MANA_WIDTH
            );

            let type_line = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(entry.card.type_line(), width - fixed_width)
                }
                Some(_) => truncate_text(entry.card.type_line(), 20),
                None => entry.card.type_line().to_string(),
            };

            let explanation = format!("→ {}", entry.explanation);

            if use_colors {
                format!(
                    "{} {} {} {} {}\n      {}",
                    index_str.dimmed(),
                    color_rating(&rating_str, entry.rating),
                    name.bold(),
                    mana,
                    type_line,
                    explanation.dimmed()
                )
            } else {
                format!(
                    "{} {} {} {} {}\n      {}",
                    index_str, rating_str, name, mana, type_line, explanation
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ratings as tab-separated values for scripting
/// Columns: rating, name, mana_cost, type_line, explanation (no headers, no colors)
pub fn format_tsv(rated: &[RatedCard], top: usize) -> String {
    rated
        .iter()
        .take(top)
        .map(|entry| {
            format!(
                "{:.1}\t{}\t{}\t{}\t{}",
                entry.rating,
                entry.name,
                entry.card.mana_cost(),
                entry.card.type_line(),
                entry.explanation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deck statistics: size, creature/spell split, average mana value, a bar
/// per mana value 0..=6, colors and detected themes
pub fn format_stats(analysis: &DeckAnalysis, title: Option<&str>, use_colors: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let heading = match title {
        Some(t) => format!("DECK STATISTICS - {}", t),
        None => "DECK STATISTICS".to_string(),
    };

    let highlight = |value: String| {
        if use_colors {
            value.yellow().to_string()
        } else {
            value
        }
    };
    let section = |label: &str| {
        if use_colors {
            label.cyan().to_string()
        } else {
            label.to_string()
        }
    };

    let creature_pct = analysis.creatures * 100 / analysis.count.max(1);

    let mut lines = vec![
        rule.clone(),
        heading,
        rule.clone(),
        String::new(),
        format!(
            "Deck Size: {}/{} cards",
            highlight(analysis.count.to_string()),
            DECK_TARGET
        ),
        format!(
            "Creatures: {} ({}%)",
            highlight(analysis.creatures.to_string()),
            creature_pct
        ),
        format!("Spells: {}", highlight(analysis.spells.to_string())),
        format!(
            "Average CMC: {}",
            highlight(format!("{:.2}", analysis.avg_cmc))
        ),
        String::new(),
        section("Mana Curve:"),
    ];

    for cmc in 0..=STATS_MAX_CMC {
        let count = analysis.cmc_exact.get(&cmc).copied().unwrap_or(0);
        let bar = "█".repeat(count);
        let bar = if use_colors {
            bar.bright_green().to_string()
        } else {
            bar
        };
        lines.push(format!("  {}: {} ({})", cmc, bar, count));
    }

    if !analysis.color_identity.is_empty() {
        let names: Vec<&str> = analysis.color_identity.iter().map(|c| c.name()).collect();
        lines.push(String::new());
        lines.push(format!("{} {}", section("Colors:"), names.join(", ")));
    }

    if !analysis.synergies.is_empty() {
        lines.push(String::new());
        lines.push(section("Detected Themes/Synergies:"));
        for synergy in &analysis.synergies {
            lines.push(format!("  • {}", synergy));
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "*".to_string(), |v| v.to_string())
}

/// Format a single card with detailed multi-line output
pub fn format_card_detail(card: &Card, use_colors: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = Vec::new();

    if use_colors {
        lines.push(rule.cyan().to_string());
        lines.push(card.name().yellow().to_string());
        lines.push(card.type_line().dimmed().to_string());
    } else {
        lines.push(rule.clone());
        lines.push(card.name().to_string());
        lines.push(card.type_line().to_string());
    }

    if !card.mana_cost().is_empty() {
        lines.push(format!("Mana Cost: {}", format_mana_cost(card.mana_cost())));
    }

    if card.is_creature() {
        let (power, toughness) = card.printed_stats();
        lines.push(format!(
            "Power/Toughness: {}/{}",
            format_stat(power),
            format_stat(toughness)
        ));
    }

    let oracle = if card.oracle_text().is_empty() {
        "No text"
    } else {
        card.oracle_text()
    };
    lines.push(String::new());
    if use_colors {
        lines.push(oracle.dimmed().to_string());
    } else {
        lines.push(oracle.to_string());
    }

    if !card.keywords().is_empty() {
        let label = if use_colors {
            "Keywords:".yellow().to_string()
        } else {
            "Keywords:".to_string()
        };
        lines.push(String::new());
        lines.push(format!("{} {}", label, card.keywords().join(", ")));
    }

    if use_colors {
        lines.push(rule.cyan().to_string());
    } else {
        lines.push(rule);
    }
    lines.join("\n")
}

/// One "Card not found in pool: NAME" line per unmatched pick, for stderr
pub fn format_not_found(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("Card not found in pool: {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_match(kind: MatchKind) -> String {
    match kind {
        MatchKind::Exact => "exact".to_string(),
        MatchKind::Substring => "partial name".to_string(),
        MatchKind::Fuzzy(distance) => format!("fuzzy, distance {}", distance),
    }
}

/// One line per query: "query -> Card Name (how)" or "query -> not found"
pub fn format_resolution(query: &str, resolution: &Resolution, use_colors: bool) -> String {
    match resolution {
        Resolution::Found { card, kind } => {
            let how = describe_match(*kind);
            if use_colors {
                format!("{} -> {} ({})", query, card.name().green(), how.dimmed())
            } else {
                format!("{} -> {} ({})", query, card.name(), how)
            }
        }
        Resolution::NotFound(_) => {
            if use_colors {
                format!("{} -> {}", query, "not found".red())
            } else {
                format!("{} -> not found", query)
            }
        }
    }
}
