//! aa-tools: Built-in tools for article-assistant
//!
//! This crate provides the tool the assistant uses to look up a writer's
//! past posts:
//! - Platform registry: the closed set of supported content platforms
//! - Fetchers: one HTTP client per platform, normalizing to `{title, url}`
//! - `fetch_user_articles`: validates a request and dispatches to a fetcher

pub mod articles;

pub use articles::{
    create_article_tools, create_article_tools_arc, is_supported, platform_names, Article,
    ArticleError, ArticleFetcher, ArticlesConfig, Endpoints, FetchError, FetchRequest,
    FetchResult, FetchUserArticlesTool, NoteFetcher, Platform, QiitaFetcher, UnknownPlatform,
    ZennFetcher, MAX_ARTICLES, TOOL_NAME,
};
