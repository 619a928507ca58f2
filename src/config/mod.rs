mod schema;

pub use schema::{Config, DEFAULT_TOP};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/draft-rater/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("draft-rater"))
}

/// Get the default config file path (~/.config/draft-rater/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Create `dir` and its parents if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/draft-rater/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error and yields `Config::default()`.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            explicit
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!("No config at {}, using defaults", default_path.display());
                return Ok(Config::default());
            }
            default_path
        }
    };

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = env::temp_dir().join("draft_rater_test_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("draft_rater_test_config.yaml");
        fs::write(&path, "top: 7\nscoring:\n  base_rating: 4.5\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.top, 7);
        assert_eq!(config.effective_scoring().base_rating, 4.5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_names_path() {
        let path = env::temp_dir().join("draft_rater_test_bad_config.yaml");
        fs::write(&path, "top: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("draft_rater_test_bad_config.yaml"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = env::temp_dir().join("draft_rater_test_ensure").join("nested");
        let _ = fs::remove_dir_all(dir.parent().unwrap());

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Idempotent
        ensure_dir(&dir).unwrap();

        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
