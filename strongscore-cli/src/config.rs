/// Config file loading and creation for the strongscore CLI.
///
/// Config lives at ~/.config/strongscore/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct StrongscoreConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub retries: Option<usize>,
    pub prompt_template: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# strongscore configuration
# All values here can be overridden by CLI flags.
# Only the `announce` command talks to a model; scoring never needs these.

# OpenAI-compatible API endpoint
# endpoint = \"http://localhost:8000\"

# Model ID
# model = \"gpt-4o-mini\"

# API key: use OPENAI_API_KEY env var or --api-key flag (not stored in config)

# Sampling temperature for announcements
# temperature = 0.8

# Retries on HTTP errors
# retries = 2

# Path to a custom announcement template file.
# The template must contain these variables: $competition, $standings
# If not set, the built-in default prompt is used.
# prompt_template = \"/path/to/my-announcement.txt\"
";

/// Returns the default config path: ~/.config/strongscore/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("strongscore").join("config.toml")
}

/// Parse config file contents.
pub fn parse_config(content: &str) -> Result<StrongscoreConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> StrongscoreConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            StrongscoreConfig::default()
        }
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses_to_empty_config() {
        let cfg = parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(cfg, StrongscoreConfig::default());
    }

    #[test]
    fn test_parse_config_values() {
        let cfg = parse_config("endpoint = \"http://localhost:8000\"\nretries = 5\ntemperature = 0.5\n").unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cfg.retries, Some(5));
        assert_eq!(cfg.temperature, Some(0.5));
        assert!(cfg.model.is_none());
    }

    #[test]
    fn test_parse_config_rejects_wrong_types() {
        assert!(parse_config("retries = \"many\"").is_err());
    }
}
