//! Article tools: look up a user's recent posts on Qiita, Zenn or note.
//!
//! Each platform has its own fetcher that knows the endpoint, the response
//! envelope and how to build a link. [`ArticleFetcher`] validates a request
//! and dispatches to one of them; [`FetchUserArticlesTool`] exposes that to
//! an agent as the `fetch_user_articles` tool.

mod http;
mod note;
mod platform;
mod qiita;
mod tool;
mod zenn;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aa_core::Tool;

pub use note::NoteFetcher;
pub use platform::{is_supported, platform_names, Platform, UnknownPlatform};
pub use qiita::QiitaFetcher;
pub use tool::{ArticleFetcher, FetchUserArticlesTool, TOOL_NAME};
pub use zenn::ZennFetcher;

/// Upper bound on articles returned for a single request.
pub const MAX_ARTICLES: usize = 5;

// =============================================================================
// Data model
// =============================================================================

/// A post on one of the platforms, reduced to what the assistant needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Arguments of `fetch_user_articles`.
///
/// `platform` stays a plain string so unknown values reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub username: String,
}

impl FetchRequest {
    pub fn new(platform: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
        }
    }
}

/// Most-recent-first articles, as ordered by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub articles: Vec<Article>,
}

// =============================================================================
// Errors
// =============================================================================

/// A platform request that did not produce articles.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{platform} request failed with HTTP status {status}")]
    Status { platform: Platform, status: u16 },

    #[error("{platform} request failed: {message}")]
    Transport { platform: Platform, message: String },

    #[error("unexpected {platform} response: {message}")]
    Shape { platform: Platform, message: String },
}

impl FetchError {
    pub fn platform(&self) -> Platform {
        match self {
            FetchError::Status { platform, .. }
            | FetchError::Transport { platform, .. }
            | FetchError::Shape { platform, .. } => *platform,
        }
    }
}

#[derive(Error, Debug)]
pub enum ArticleError {
    /// The request itself is unusable; the caller can fix it.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetcher broke its output contract.
    #[error("{0}")]
    Internal(String),
}

impl ArticleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// API base URLs, one per platform.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_qiita_url")]
    pub qiita: String,
    #[serde(default = "default_zenn_url")]
    pub zenn: String,
    #[serde(default = "default_note_url")]
    pub note: String,
}

fn default_qiita_url() -> String {
    qiita::DEFAULT_BASE_URL.to_string()
}

fn default_zenn_url() -> String {
    zenn::DEFAULT_BASE_URL.to_string()
}

fn default_note_url() -> String {
    note::DEFAULT_BASE_URL.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            qiita: default_qiita_url(),
            zenn: default_zenn_url(),
            note: default_note_url(),
        }
    }
}

impl Endpoints {
    /// Point every platform at the same host (mirrors, test servers).
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            qiita: base_url.clone(),
            zenn: base_url.clone(),
            note: base_url,
        }
    }
}

/// Settings for the article fetchers
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticlesConfig {
    /// Request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent to every platform
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("article-assistant/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ArticlesConfig {
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// HTTP client shared by all three fetchers.
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if self.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout_secs));
        }
        builder.build().unwrap_or_default()
    }
}

// =============================================================================
// Factory functions
// =============================================================================

/// Create all article tools (boxed version)
pub fn create_article_tools(config: &ArticlesConfig) -> Vec<Box<dyn Tool>> {
    vec![Box::new(FetchUserArticlesTool::new(config))]
}

/// Create all article tools (Arc version)
pub fn create_article_tools_arc(config: &ArticlesConfig) -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(FetchUserArticlesTool::new(config))]
}
