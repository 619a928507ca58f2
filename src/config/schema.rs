use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

/// Rows shown by `rate` when neither the CLI nor the config says otherwise
pub const DEFAULT_TOP: usize = 20;

/// Application config file.
///
/// ```yaml
/// pool: ~/drafts/blb.json
/// deck_dir: ~/drafts/decks
/// top: 15
/// scoring:
///   include_picked: false
///   synergy:
///     subtype_policy: once
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Card pool used when `--pool` is not given
    #[serde(default)]
    pub pool: Option<PathBuf>,
    #[serde(default)]
    pub deck_dir: Option<PathBuf>,
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

fn default_top() -> usize {
    DEFAULT_TOP
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool: None,
            deck_dir: None,
            top: DEFAULT_TOP,
            scoring: None,
        }
    }
}

impl Config {
    /// Scoring section, or the built-in tunables when absent
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SubtypePolicy;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top, 20);
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
pool: /tmp/pool.json
deck_dir: /tmp/decks
top: 5
scoring:
  include_picked: true
  synergy:
    subtype_policy: once
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.pool, Some(PathBuf::from("/tmp/pool.json")));
        assert_eq!(config.deck_dir, Some(PathBuf::from("/tmp/decks")));
        assert_eq!(config.top, 5);

        let scoring = config.effective_scoring();
        assert!(scoring.include_picked);
        assert_eq!(scoring.synergy.subtype_policy, SubtypePolicy::Once);
        assert_eq!(scoring.synergy.keyword_overlap, 1.0);
        assert_eq!(scoring.base_rating, 5.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }
}
