use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Every weight must be a real number
    for (name, value) in numeric_fields(config) {
        if !value.is_finite() {
            errors.push(format!("scoring.{}: must be a finite number", name));
        }
    }

    // Rating bounds
    if config.min_rating > config.max_rating {
        errors.push(format!(
            "scoring.min_rating: {} is above max_rating {}",
            config.min_rating, config.max_rating
        ));
    }
    if config.base_rating < config.min_rating || config.base_rating > config.max_rating {
        errors.push(format!(
            "scoring.base_rating: {} is outside [{}, {}]",
            config.base_rating, config.min_rating, config.max_rating
        ));
    }

    // Ideal curve
    for (i, ideal) in config.curve.ideal.iter().enumerate() {
        if *ideal < 0.0 {
            errors.push(format!("scoring.curve.ideal[{}]: must be non-negative", i));
        }
    }
    if config.curve.tolerance < 0.0 {
        errors.push("scoring.curve.tolerance: must be non-negative".to_string());
    }

    // Creature ratio band
    let balance = &config.balance;
    for (name, value) in [
        ("default_ratio", balance.default_ratio),
        ("low_ratio", balance.low_ratio),
        ("high_ratio", balance.high_ratio),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("scoring.balance.{}: must be between 0 and 1", name));
        }
    }
    if balance.low_ratio > balance.high_ratio {
        errors.push("scoring.balance.low_ratio: must not exceed high_ratio".to_string());
    }

    // Power value tiers
    let power = &config.power;
    if !(power.poor_value <= power.good_value && power.good_value <= power.great_value) {
        errors.push(
            "scoring.power: value tiers must satisfy poor_value <= good_value <= great_value"
                .to_string(),
        );
    }

    // Reason thresholds
    for (name, value) in [
        ("curve.reason_threshold", config.curve.reason_threshold),
        ("color.reason_threshold", config.color.reason_threshold),
        ("balance.reason_threshold", config.balance.reason_threshold),
        ("synergy.strong_threshold", config.synergy.strong_threshold),
        ("power.reason_threshold", config.power.reason_threshold),
    ] {
        if value < 0.0 {
            errors.push(format!("scoring.{}: must be non-negative", name));
        }
    }

    if config.completion.target_deck_size == 0 {
        errors.push("scoring.completion.target_deck_size: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn numeric_fields(config: &ScoringConfig) -> Vec<(&'static str, f64)> {
    let c = config;
    vec![
        ("base_rating", c.base_rating),
        ("min_rating", c.min_rating),
        ("max_rating", c.max_rating),
        ("curve.tolerance", c.curve.tolerance),
        ("curve.far_below_bonus", c.curve.far_below_bonus),
        ("curve.below_bonus", c.curve.below_bonus),
        ("curve.at_ideal", c.curve.at_ideal),
        ("curve.crowded_penalty", c.curve.crowded_penalty),
        ("color.open_colorless", c.color.open_colorless),
        ("color.open_colored", c.color.open_colored),
        ("color.on_color", c.color.on_color),
        ("color.off_color_mono", c.color.off_color_mono),
        ("color.colorless", c.color.colorless),
        ("color.partial_overlap", c.color.partial_overlap),
        ("color.no_overlap", c.color.no_overlap),
        ("balance.creature_scarce", c.balance.creature_scarce),
        ("balance.creature_ok", c.balance.creature_ok),
        ("balance.creature_glut", c.balance.creature_glut),
        ("balance.spell_scarce", c.balance.spell_scarce),
        ("balance.spell_ok", c.balance.spell_ok),
        ("balance.spell_glut", c.balance.spell_glut),
        ("synergy.keyword_overlap", c.synergy.keyword_overlap),
        ("synergy.shared_subtype", c.synergy.shared_subtype),
        ("synergy.draw_engine", c.synergy.draw_engine),
        ("synergy.sacrifice_engine", c.synergy.sacrifice_engine),
        ("synergy.evasion", c.synergy.evasion),
        ("power.great_bonus", c.power.great_bonus),
        ("power.good_bonus", c.power.good_bonus),
        ("power.poor_penalty", c.power.poor_penalty),
        ("power.evasive_bonus", c.power.evasive_bonus),
        ("power.removal", c.power.removal),
        ("power.card_draw", c.power.card_draw),
        ("power.disruption", c.power.disruption),
        ("completion.weight", c.completion.weight),
    ]
}
