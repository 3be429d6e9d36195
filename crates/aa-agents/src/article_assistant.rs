//! Assistant that drafts new articles from a writer's past posts.

use aa_tools::{Platform, TOOL_NAME};

use crate::config::{AgentConfig, MemoryOptions};
use crate::InternalAgent;

/// Shown to the end user whenever article retrieval fails.
pub const FALLBACK_MESSAGE: &str =
    "記事の取得に失敗しました。プラットフォーム名とユーザー名を確認して、もう一度お試しください。";

const TOOL_NAMES: &[&str] = &[TOOL_NAME];

/// Joins `items` as "a, b and c".
fn join_choices(items: &[&str], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}

fn render_system_prompt() -> String {
    let names: Vec<&str> = Platform::ALL.iter().map(|p| p.display_name()).collect();
    let identifiers: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();

    format!(
        r#"You help users create new articles based on their past posts on {names}.

## How You Work
1. Ask the user for the platform ({identifiers}) and their user name or id on it.
2. Call `{tool}` with that platform and user name to retrieve up to 5 recent articles.
3. Discuss ideas for a new article, referring to their past content by title and link.
4. When the user asks for it, output a markdown draft of the article.

## When Retrieval Fails
If `{tool}` returns an error, do not show the error text. Tell the user exactly:
"{fallback}"
Then ask them to confirm the platform and user name.

## Anti-patterns to Avoid
- Don't invent articles the tool did not return
- Don't call `{tool}` again with the same platform and user name in one conversation"#,
        names = join_choices(&names, "and"),
        identifiers = join_choices(&identifiers, "or"),
        tool = TOOL_NAME,
        fallback = FALLBACK_MESSAGE,
    )
}

pub struct ArticleAssistantAgent {
    system_prompt: String,
    config: AgentConfig,
}

impl ArticleAssistantAgent {
    pub fn new() -> Self {
        Self::with_config(AgentConfig::default())
    }

    pub fn with_config(config: AgentConfig) -> Self {
        Self {
            system_prompt: render_system_prompt(),
            config,
        }
    }
}

impl Default for ArticleAssistantAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalAgent for ArticleAssistantAgent {
    fn name(&self) -> &str {
        "article-assistant"
    }

    fn description(&self) -> &str {
        "Helps draft new articles based on past posts on Qiita, Zenn and note"
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn tool_names(&self) -> &[&str] {
        TOOL_NAMES
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn memory(&self) -> &MemoryOptions {
        &self.config.memory
    }

    fn fallback_message(&self) -> &str {
        FALLBACK_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;

    #[test]
    fn test_article_assistant() {
        let agent = ArticleAssistantAgent::new();
        assert_eq!(agent.name(), "article-assistant");
        assert!(!agent.description().is_empty());
        assert_eq!(agent.tool_names(), &["fetch_user_articles"]);
        assert_eq!(agent.model(), DEFAULT_MODEL);
        assert_eq!(agent.memory().last_messages, 10);
    }

    #[test]
    fn test_prompt_lists_every_platform() {
        let agent = ArticleAssistantAgent::new();
        let prompt = agent.system_prompt();
        for platform in Platform::ALL {
            assert!(prompt.contains(platform.as_str()), "missing {}", platform);
            assert!(prompt.contains(platform.display_name()));
        }
        assert!(prompt.contains("(qiita, zenn or note)"));
        assert!(prompt.contains("Qiita, Zenn and note"));
        assert!(prompt.contains(TOOL_NAME));
        assert!(prompt.contains(FALLBACK_MESSAGE));
    }

    #[test]
    fn test_join_choices() {
        assert_eq!(join_choices(&[], "or"), "");
        assert_eq!(join_choices(&["a"], "or"), "a");
        assert_eq!(join_choices(&["a", "b"], "or"), "a or b");
        assert_eq!(join_choices(&["a", "b", "c"], "and"), "a, b and c");
    }

    #[test]
    fn test_config_overrides_model() {
        let config = AgentConfig {
            model: "gemini-2.5-pro".to_string(),
            ..AgentConfig::default()
        };
        let agent = ArticleAssistantAgent::with_config(config);
        assert_eq!(agent.model(), "gemini-2.5-pro");
        assert_eq!(agent.fallback_message(), FALLBACK_MESSAGE);
    }
}
