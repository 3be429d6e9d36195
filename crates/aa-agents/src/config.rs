//! Configuration types for the assistant agent.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_storage() -> String {
    "~/.config/article-assistant/memory.db".to_string()
}

fn default_last_messages() -> usize {
    10
}

/// How the agent runtime should keep conversation history.
///
/// The store itself belongs to the runtime; these are the options it is
/// started with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryOptions {
    /// Location of the conversation store (supports $HOME, ~)
    #[serde(default = "default_storage")]
    pub storage: String,

    /// Number of most recent messages replayed into each turn
    #[serde(default = "default_last_messages")]
    pub last_messages: usize,

    /// Retrieve older messages by similarity
    #[serde(default)]
    pub semantic_recall: bool,

    /// Let the runtime generate thread titles
    #[serde(default)]
    pub generate_title: bool,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            last_messages: default_last_messages(),
            semantic_recall: false,
            generate_title: false,
        }
    }
}

/// `[agent]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Model the runtime should drive the assistant with
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub memory: MemoryOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            memory: MemoryOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.memory.last_messages, 10);
        assert!(!config.memory.semantic_recall);
        assert!(!config.memory.generate_title);
    }

    #[test]
    fn test_parse_partial() {
        let toml = r#"
            model = "gemini-2.5-pro"

            [memory]
            last_messages = 20
        "#;

        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.memory.last_messages, 20);
        assert_eq!(config.memory.storage, "~/.config/article-assistant/memory.db");
    }

    #[test]
    fn test_parse_empty() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config, AgentConfig::default());
    }
}
