//! Remote service boundary.
//!
//! The controller treats the server as a narrow set of request/response
//! contracts; transport, retries, and timeout policy live behind this
//! trait. [`http::HttpRemote`] is the production implementation, tests
//! substitute scripted mocks.

mod http;

pub use http::HttpRemote;

use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Errors crossing the remote boundary.
///
/// The coordinator only distinguishes "error" from "success"; the variants
/// exist for diagnostics and user-facing notices, not for control flow.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}

/// One entry as returned by the server for a feed.
///
/// Batch order on the wire is the server's business; the reconciler defines
/// the order it requires (oldest to newest, see `EntryList::merge`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FetchedEntry {
    pub link: String,
    pub title: String,
}

/// Semantic outcome of an add-feed call.
///
/// `Duplicate` and `NotFound` are successful calls at the transport level;
/// they carry a distinct user-visible message and mutate nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFeedResponse {
    /// Feed registered; the tree gains a node with these attributes.
    Created {
        key: String,
        name: String,
        unread: i64,
    },
    /// The feed was already registered for this user.
    Duplicate,
    /// No syndication file was found at the URL.
    NotFound,
}

/// Attributes of one folder child as returned by the server.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RemoteItem {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub unread: i64,
    #[serde(rename = "type")]
    pub kind: RemoteItemKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteItemKind {
    Feed,
    Folder,
}

/// Request/response contracts consumed by the controller.
///
/// Success with no body is `Ok(())`; every method maps transport failure to
/// [`RemoteError`]. Implementations must not retry mutating calls: the
/// action gate guarantees at most one in flight, and a hidden retry would
/// break that accounting.
pub trait RemoteService {
    /// Mark one entry read.
    fn mark_read(
        &self,
        feed_key: &str,
        link: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    /// Mark every entry of a feed read.
    fn mark_feed_read(
        &self,
        feed_key: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    /// Mark everything under a folder read.
    fn mark_folder_read(
        &self,
        folder_key: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    /// Fetch the server's current entry batch for a feed.
    fn refresh_feed(
        &self,
        feed_key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<FetchedEntry>, RemoteError>>;

    /// Refresh a folder; returns new unread counts keyed by feed key.
    fn refresh_folder(
        &self,
        folder_key: &str,
    ) -> impl std::future::Future<Output = Result<HashMap<String, i64>, RemoteError>>;

    /// Create a folder; returns the server-assigned key.
    fn add_folder(
        &self,
        name: &str,
        parent_key: &str,
    ) -> impl std::future::Future<Output = Result<String, RemoteError>>;

    /// Subscribe a feed by URL.
    fn add_feed(
        &self,
        url: &Url,
        parent_key: &str,
    ) -> impl std::future::Future<Output = Result<AddFeedResponse, RemoteError>>;

    fn rename_feed(
        &self,
        key: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    fn rename_folder(
        &self,
        key: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    fn remove_feed(&self, key: &str)
        -> impl std::future::Future<Output = Result<(), RemoteError>>;

    fn remove_folder(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    /// Kick off the server-side import job for a folder.
    fn start_import(
        &self,
        folder_key: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;

    /// Load the children of a folder to build the view projection.
    fn load_folder(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RemoteItem>, RemoteError>>;

    /// Load the current unread entries of a feed.
    fn load_feed(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<FetchedEntry>, RemoteError>>;
}
