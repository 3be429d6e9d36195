//! Qiita: `GET /api/v2/users/{user}/items`, a bare JSON array.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::http::{decode_entry, endpoint, get_json};
use super::{Article, FetchError, Platform, MAX_ARTICLES};

pub const DEFAULT_BASE_URL: &str = "https://qiita.com";

#[derive(Deserialize)]
struct QiitaItem {
    title: String,
    url: String,
}

pub struct QiitaFetcher {
    client: Client,
    base_url: String,
}

impl QiitaFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// First page of the user's items, already limited to [`MAX_ARTICLES`].
    pub fn request_url(&self, username: &str) -> Result<Url, FetchError> {
        let mut url = endpoint(
            Platform::Qiita,
            &self.base_url,
            &["api", "v2", "users", username, "items"],
        )?;
        url.query_pairs_mut()
            .append_pair("page", "1")
            .append_pair("per_page", &MAX_ARTICLES.to_string());
        Ok(url)
    }

    pub async fn fetch(&self, username: &str) -> Result<Vec<Article>, FetchError> {
        let items: Vec<Value> =
            get_json(&self.client, Platform::Qiita, self.request_url(username)?).await?;

        let articles = items
            .into_iter()
            .take(MAX_ARTICLES)
            .map(|entry| {
                decode_entry::<QiitaItem>(Platform::Qiita, entry)
                    .map(|item| Article::new(item.title, item.url))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(platform = "qiita", count = articles.len(), "Fetched articles");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn fetcher(base_url: &str) -> QiitaFetcher {
        QiitaFetcher::new(Client::new()).with_base_url(base_url)
    }

    #[test]
    fn test_request_url() {
        let url = QiitaFetcher::new(Client::new()).request_url("alice").unwrap();
        assert_eq!(
            url.as_str(),
            "https://qiita.com/api/v2/users/alice/items?page=1&per_page=5"
        );
    }

    #[test]
    fn test_request_url_encodes_username() {
        let url = QiitaFetcher::new(Client::new()).request_url("a/b c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://qiita.com/api/v2/users/a%2Fb%20c/items?page=1&per_page=5"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_items_verbatim() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v2/users/alice/items")
                    .query_param("page", "1")
                    .query_param("per_page", "5");
                then.status(200).json_body(json!([
                    {"title": "T1", "url": "https://qiita.com/alice/items/1", "likes_count": 3},
                    {"title": "T2", "url": "https://qiita.com/alice/items/2"}
                ]));
            })
            .await;

        let articles = fetcher(&server.base_url()).fetch("alice").await.unwrap();
        assert_eq!(
            articles,
            vec![
                Article::new("T1", "https://qiita.com/alice/items/1"),
                Article::new("T2", "https://qiita.com/alice/items/2"),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_truncates_oversized_page() {
        let server = MockServer::start_async().await;
        let items: Vec<_> = (1..=8)
            .map(|i| json!({"title": format!("T{i}"), "url": format!("https://qiita.com/alice/items/{i}")}))
            .collect();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v2/users/alice/items");
                then.status(200).json_body(json!(items));
            })
            .await;

        let articles = fetcher(&server.base_url()).fetch("alice").await.unwrap();
        assert_eq!(articles.len(), MAX_ARTICLES);
        assert_eq!(articles[0].title, "T1");
        assert_eq!(articles[4].title, "T5");
    }

    #[tokio::test]
    async fn test_fetch_ignores_entries_past_max() {
        let server = MockServer::start_async().await;
        let mut items: Vec<_> = (1..=5)
            .map(|i| json!({"title": format!("T{i}"), "url": format!("https://qiita.com/alice/items/{i}")}))
            .collect();
        items.push(json!({"title": null}));
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v2/users/alice/items");
                then.status(200).json_body(json!(items));
            })
            .await;

        let articles = fetcher(&server.base_url()).fetch("alice").await.unwrap();
        assert_eq!(articles.len(), MAX_ARTICLES);
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v2/users/ghost/items");
                then.status(404).json_body(json!({"message": "Not found", "type": "not_found"}));
            })
            .await;

        let err = fetcher(&server.base_url()).fetch("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { platform: Platform::Qiita, status: 404 }
        ));
    }

    #[tokio::test]
    async fn test_fetch_object_body_is_shape_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v2/users/alice/items");
                then.status(200).json_body(json!({"items": []}));
            })
            .await;

        let err = fetcher(&server.base_url()).fetch("alice").await.unwrap_err();
        assert!(matches!(err, FetchError::Shape { platform: Platform::Qiita, .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_is_shape_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v2/users/alice/items");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = fetcher(&server.base_url()).fetch("alice").await.unwrap_err();
        assert!(matches!(err, FetchError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // listener is dropped, so nothing accepts on `addr`
        let err = fetcher(&format!("http://{}", addr))
            .fetch("alice")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { platform: Platform::Qiita, .. }));
    }
}
