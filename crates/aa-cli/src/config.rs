use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use aa_agents::AgentConfig;
use aa_tools::ArticlesConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Article fetcher settings
    #[serde(default)]
    pub articles: ArticlesConfig,

    /// Assistant agent settings
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Expand environment variables in a path string
/// Supports: $VAR, ${VAR}, ~
pub fn expand_path(path: &str) -> PathBuf {
    static VAR_RE: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = path.to_string();

    // Expand ~ at the start
    if result.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            result = format!("{}{}", home.display(), &result[1..]);
        }
    } else if result == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    // Expand $VAR and ${VAR}
    let re = VAR_RE.get_or_init(|| {
        regex::Regex::new(r"\$\{?([A-Za-z_][A-Za-z0-9_]*)\}?").expect("static regex is valid")
    });
    let expanded = re.replace_all(&result, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    });

    PathBuf::from(expanded.to_string())
}

impl Config {
    /// Load the configuration file, falling back to defaults when it is absent.
    pub fn load(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("article-assistant"))
    }

    /// Conversation store location with `~` and variables expanded.
    pub fn memory_storage(&self) -> PathBuf {
        expand_path(&self.agent.memory.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [articles]
            timeout_secs = 10

            [articles.endpoints]
            zenn = "http://localhost:8080"

            [agent]
            model = "gemini-2.5-pro"

            [agent.memory]
            last_messages = 4
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.articles.timeout_secs, 10);
        assert_eq!(config.articles.endpoints.zenn, "http://localhost:8080");
        assert_eq!(config.articles.endpoints.qiita, "https://qiita.com");
        assert_eq!(config.agent.model, "gemini-2.5-pro");
        assert_eq!(config.agent.memory.last_messages, 4);
        assert!(!config.agent.memory.semantic_recall);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[articles]\ntimeout_secs = \"soon\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_expand_path() {
        std::env::set_var("AA_TEST_DIR", "/tmp/aa");
        assert_eq!(expand_path("$AA_TEST_DIR/memory.db"), PathBuf::from("/tmp/aa/memory.db"));
        assert_eq!(expand_path("${AA_TEST_DIR}/x"), PathBuf::from("/tmp/aa/x"));
        assert_eq!(
            expand_path("$AA_SURELY_UNSET_VAR/x"),
            PathBuf::from("$AA_SURELY_UNSET_VAR/x")
        );

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/notes.db"), home.join("notes.db"));
            assert_eq!(expand_path("~"), home);
        }
    }
}
