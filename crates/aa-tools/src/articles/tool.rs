//! The `fetch_user_articles` tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use aa_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use super::{
    platform_names, Article, ArticleError, ArticlesConfig, FetchError, FetchRequest, FetchResult,
    NoteFetcher, Platform, QiitaFetcher, UnknownPlatform, ZennFetcher, MAX_ARTICLES,
};

pub const TOOL_NAME: &str = "fetch_user_articles";

/// Validates article requests and routes them to the matching platform.
pub struct ArticleFetcher {
    qiita: QiitaFetcher,
    zenn: ZennFetcher,
    note: NoteFetcher,
}

impl ArticleFetcher {
    pub fn new(config: &ArticlesConfig) -> Self {
        let client = config.build_client();
        Self {
            qiita: QiitaFetcher::new(client.clone()).with_base_url(&config.endpoints.qiita),
            zenn: ZennFetcher::new(client.clone()).with_base_url(&config.endpoints.zenn),
            note: NoteFetcher::new(client).with_base_url(&config.endpoints.note),
        }
    }

    /// Fetch up to [`MAX_ARTICLES`] recent articles for the requested user.
    ///
    /// The platform is checked before the username, and both before any
    /// network traffic.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, ArticleError> {
        let platform: Platform = request
            .platform
            .parse()
            .map_err(|e: UnknownPlatform| ArticleError::validation(e.to_string()))?;

        let username = request.username.trim();
        if username.is_empty() {
            return Err(ArticleError::validation("username is required"));
        }

        let articles = self.fetch_platform(platform, username).await?;
        check_articles(&articles)?;

        Ok(FetchResult { articles })
    }

    pub async fn fetch_platform(
        &self,
        platform: Platform,
        username: &str,
    ) -> Result<Vec<Article>, FetchError> {
        match platform {
            Platform::Qiita => self.qiita.fetch(username).await,
            Platform::Zenn => self.zenn.fetch(username).await,
            Platform::Note => self.note.fetch(username).await,
        }
    }
}

/// Output contract every fetcher must honor.
fn check_articles(articles: &[Article]) -> Result<(), ArticleError> {
    if articles.len() > MAX_ARTICLES || articles.iter().any(|a| a.url.is_empty()) {
        return Err(ArticleError::internal("invalid articles data"));
    }
    Ok(())
}

// =============================================================================
// Fetch User Articles Tool
// =============================================================================

pub struct FetchUserArticlesTool {
    fetcher: ArticleFetcher,
}

impl Default for FetchUserArticlesTool {
    fn default() -> Self {
        Self::new(&ArticlesConfig::default())
    }
}

impl FetchUserArticlesTool {
    pub fn new(config: &ArticlesConfig) -> Self {
        Self {
            fetcher: ArticleFetcher::new(config),
        }
    }

    async fn run(&self, arguments: Value) -> Result<FetchResult, ArticleError> {
        let request: FetchRequest = serde_json::from_value(arguments)
            .map_err(|e| ArticleError::validation(format!("invalid arguments: {}", e)))?;
        self.fetcher.fetch(&request).await
    }
}

#[async_trait]
impl Tool for FetchUserArticlesTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetch up to 5 recent articles (title and url) for a user on Qiita, Zenn or note."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property(
                    "platform",
                    PropertySchema::enum_string("Target platform", platform_names()),
                    true,
                )
                .add_property(
                    "username",
                    PropertySchema::string("Username or ID on the platform"),
                    true,
                ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        debug!(tool = TOOL_NAME, arguments = %arguments, "Executing tool");

        let result = match self.run(arguments).await {
            Ok(result) => result,
            Err(e) => {
                match &e {
                    ArticleError::Fetch(fetch) => {
                        warn!(tool = TOOL_NAME, platform = %fetch.platform(), error = %e, "Article fetch failed")
                    }
                    _ => warn!(tool = TOOL_NAME, error = %e, "Article request rejected"),
                }
                return Err(Error::tool(TOOL_NAME, e.to_string()));
            }
        };

        Ok(ToolOutput::success(serde_json::to_string(&result)?))
    }
}
