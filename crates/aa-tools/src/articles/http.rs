//! Request plumbing shared by the platform fetchers.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{FetchError, Platform};

/// Join `path` onto a configured base URL.
pub(crate) fn endpoint(platform: Platform, base_url: &str, path: &[&str]) -> Result<Url, FetchError> {
    let invalid = |message: String| FetchError::Transport { platform, message };

    let mut url = Url::parse(base_url)
        .map_err(|e| invalid(format!("invalid base url '{}': {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| invalid(format!("base url '{}' cannot carry a path", base_url)))?
        .pop_if_empty()
        .extend(path);
    Ok(url)
}

/// GET `url` and decode the body as `T`.
///
/// Non-2xx statuses and transport failures are reported before the body is
/// looked at; a body that does not decode as `T` is a shape error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    platform: Platform,
    url: Url,
) -> Result<T, FetchError> {
    debug!(platform = %platform, url = %url, "Fetching articles");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            platform,
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!(platform = %platform, url = %url, status = status.as_u16(), "Platform returned an error status");
        return Err(FetchError::Status {
            platform,
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Transport {
        platform,
        message: format!("failed to read response: {}", e),
    })?;

    serde_json::from_str(&body).map_err(|e| FetchError::Shape {
        platform,
        message: e.to_string(),
    })
}

/// Entries of a list field, still undecoded; an absent or `null` field is an
/// empty list.
pub(crate) fn entries(platform: Platform, field: Option<Value>) -> Result<Vec<Value>, FetchError> {
    match field {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(FetchError::Shape {
            platform,
            message: format!("expected a list of entries, got {}", json_kind(&other)),
        }),
    }
}

/// Decode a single list entry.
pub(crate) fn decode_entry<T: DeserializeOwned>(platform: Platform, entry: Value) -> Result<T, FetchError> {
    serde_json::from_value(entry).map_err(|e| FetchError::Shape {
        platform,
        message: format!("invalid entry: {}", e),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
