//! HTTP implementation of [`RemoteService`] against the reader's `/api/*`
//! surface.
//!
//! Requests carry their inputs as query parameters; responses are either
//! empty (status-only) or JSON. The client is built once per process with
//! a request timeout from config and shared by all view scopes.

use super::{AddFeedResponse, FetchedEntry, RemoteError, RemoteItem, RemoteService};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Production remote service speaking to a reader server.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base: Url,
}

/// Wire shape of an add-feed response.
#[derive(Debug, serde::Deserialize)]
struct AddFeedBody {
    outcome: AddFeedOutcomeTag,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum AddFeedOutcomeTag {
    Created,
    Duplicate,
    NotFound,
}

impl HttpRemote {
    /// Build a remote against `base` with the given request timeout.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Network)?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base
            .join(path)
            .map_err(|e| RemoteError::Decode(format!("bad endpoint {}: {}", path, e)))
    }

    /// Issue a GET and return the body on 2xx.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, RemoteError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "server returned error status");
            return Err(RemoteError::HttpStatus(status.as_u16()));
        }
        response.text().await.map_err(map_reqwest_error)
    }

    /// Issue a GET where only the status matters.
    async fn get_ok(&self, path: &str, query: &[(&str, &str)]) -> Result<(), RemoteError> {
        self.get(path, query).await.map(|_| ())
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteError> {
        let body = self.get(path, query).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "failed to decode response body");
            RemoteError::Decode(e.to_string())
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Network(e)
    }
}

impl RemoteService for HttpRemote {
    async fn mark_read(&self, feed_key: &str, link: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/read", &[("id", link), ("feed_key", feed_key)])
            .await
    }

    async fn mark_feed_read(&self, feed_key: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/readfeed", &[("key", feed_key)]).await
    }

    async fn mark_folder_read(&self, folder_key: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/readfolder", &[("key", folder_key)]).await
    }

    async fn refresh_feed(&self, feed_key: &str) -> Result<Vec<FetchedEntry>, RemoteError> {
        self.get_json("/api/updatefeed", &[("key", feed_key)]).await
    }

    async fn refresh_folder(
        &self,
        folder_key: &str,
    ) -> Result<HashMap<String, i64>, RemoteError> {
        self.get_json("/api/updatefolder", &[("key", folder_key)])
            .await
    }

    async fn add_folder(&self, name: &str, parent_key: &str) -> Result<String, RemoteError> {
        #[derive(serde::Deserialize)]
        struct Body {
            key: String,
        }
        let body: Body = self
            .get_json(
                "/api/addfolder",
                &[("folder_name", name), ("folder_key", parent_key)],
            )
            .await?;
        Ok(body.key)
    }

    async fn add_feed(&self, url: &Url, parent_key: &str) -> Result<AddFeedResponse, RemoteError> {
        let body: AddFeedBody = self
            .get_json(
                "/api/addfeed",
                &[("url", url.as_str()), ("folder_key", parent_key)],
            )
            .await?;
        match body.outcome {
            AddFeedOutcomeTag::Created => {
                let key = body
                    .key
                    .ok_or_else(|| RemoteError::Decode("created outcome missing key".into()))?;
                let name = body
                    .name
                    .ok_or_else(|| RemoteError::Decode("created outcome missing name".into()))?;
                Ok(AddFeedResponse::Created {
                    key,
                    name,
                    unread: body.count,
                })
            }
            AddFeedOutcomeTag::Duplicate => Ok(AddFeedResponse::Duplicate),
            AddFeedOutcomeTag::NotFound => Ok(AddFeedResponse::NotFound),
        }
    }

    async fn rename_feed(&self, key: &str, name: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/renamefeed", &[("key", key), ("name", name)])
            .await
    }

    async fn rename_folder(&self, key: &str, name: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/renamefolder", &[("key", key), ("name", name)])
            .await
    }

    async fn remove_feed(&self, key: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/removefeed", &[("key", key)]).await
    }

    async fn remove_folder(&self, key: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/removefolder", &[("key", key)]).await
    }

    async fn start_import(&self, folder_key: &str) -> Result<(), RemoteError> {
        self.get_ok("/api/importxml", &[("key", folder_key)]).await
    }

    async fn load_folder(&self, key: &str) -> Result<Vec<RemoteItem>, RemoteError> {
        self.get_json("/api/folder", &[("key", key)]).await
    }

    async fn load_feed(&self, key: &str) -> Result<Vec<FetchedEntry>, RemoteError> {
        self.get_json("/api/feed", &[("key", key)]).await
    }
}
