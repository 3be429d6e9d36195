//! Agent definitions for article-assistant.
//!
//! This crate provides:
//! - `InternalAgent` trait describing what an agent runtime needs to host an agent
//! - The article assistant (instructions, tools, model, memory options)
//! - Configuration types for the `[agent]` section of the config file

use aa_core::ToolRegistry;
use aa_tools::{create_article_tools_arc, ArticlesConfig};

mod article_assistant;
mod config;

pub use article_assistant::{ArticleAssistantAgent, FALLBACK_MESSAGE};
pub use config::{AgentConfig, MemoryOptions, DEFAULT_MODEL};

/// Trait for internal agents.
///
/// The agent runtime itself (turn-taking, memory persistence) lives outside
/// this workspace; an internal agent only describes how it should be driven.
pub trait InternalAgent: Send + Sync {
    /// Get the agent name (e.g., "article-assistant")
    fn name(&self) -> &str;

    /// Get the agent description for display
    fn description(&self) -> &str;

    /// Get the system prompt for this agent
    fn system_prompt(&self) -> &str;

    /// Get the tool names this agent needs
    fn tool_names(&self) -> &[&str];

    /// Get the model the runtime should use
    fn model(&self) -> &str;

    /// Get the conversation memory options
    fn memory(&self) -> &MemoryOptions;

    /// Message shown to the end user when a tool call fails.
    ///
    /// Tool error details are for logs, not for the conversation.
    fn fallback_message(&self) -> &str;

    /// Select this agent's tools from `available`.
    ///
    /// Tools the agent names but `available` lacks are left out.
    fn tools(&self, available: &ToolRegistry) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        for name in self.tool_names() {
            if let Some(tool) = available.get(name) {
                registry.register(tool);
            }
        }
        registry
    }
}

/// Registry of every built-in tool, configured from `articles`.
pub fn build_tool_registry(articles: &ArticlesConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in create_article_tools_arc(articles) {
        registry.register(tool);
    }
    registry
}
