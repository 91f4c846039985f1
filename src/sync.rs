//! Mutation coordinator.
//!
//! Every user affordance maps to one guarded unit of work: validate local
//! input, enter the view's action gate, issue the remote call, apply the
//! confirmed result to the view's projection, release the gate. There is no
//! optimistic mutation and no rollback: the projection reflects
//! server-confirmed state only, so a remote failure applies nothing.
//!
//! All outcomes are reported through [`ActionOutcome`]; nothing propagates
//! past the call site. Presenters decide what each variant looks like.

use crate::entry::Entry;
use crate::remote::{AddFeedResponse, RemoteError, RemoteService};
use crate::tree::{FeedItem, ItemKind};
use crate::util::{validate_feed_url, UrlValidationError};
use crate::view::{FeedView, FolderView, ImportView};
use thiserror::Error;

/// Local input rejections, raised before the action gate is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error(transparent)]
    InvalidFeedUrl(#[from] UrlValidationError),
    /// No edit target is selected, or the targeted item no longer exists.
    #[error("no item is selected for editing")]
    NoEditTarget,
}

/// Result of one coordinated mutation.
///
/// `Busy` means a gesture arrived while the scope's gate was held; it is
/// debounced, not an error, and presenters drop it silently. `Invalid`
/// rejections never reached the network. `Failed` operations released the
/// gate and applied no local change.
#[derive(Debug)]
pub enum ActionOutcome {
    Busy,
    Invalid(ValidationError),
    Failed(RemoteError),
    FolderAdded { key: String },
    FeedAdded { key: String, name: String, unread: i64 },
    /// The feed is already registered; nothing was appended.
    DuplicateFeed,
    /// No syndication file was found at the URL; nothing was appended.
    FeedNotFound,
    Renamed { name: String },
    Removed { kind: ItemKind },
    EntryRead,
    FeedCleared,
    FolderCountsCleared,
    /// `added == 0` is the distinct "no new entries" result.
    FeedRefreshed { added: usize },
    /// `any_new` reports whether any feed's displayed count increased.
    FolderRefreshed { any_new: bool },
    ImportStarted { folder_key: String },
}

/// Issues guarded mutations against a remote service.
///
/// The coordinator is stateless; all per-page state lives in the view
/// scopes handed to each call. Projection borrows are taken only before
/// the gate and after the remote call returns, never across the await.
#[derive(Debug)]
pub struct Coordinator<R> {
    remote: R,
}

impl<R: RemoteService> Coordinator<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Add a sub-folder under the open folder.
    pub async fn add_folder(&self, view: &FolderView, name: &str) -> ActionOutcome {
        let name = name.trim();
        if name.is_empty() {
            return ActionOutcome::Invalid(ValidationError::EmptyName);
        }
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.add_folder(name, view.key()).await {
            Ok(key) => {
                view.tree
                    .borrow_mut()
                    .append(FeedItem::folder(key.as_str(), name));
                tracing::info!(key = %key, name, "folder added");
                ActionOutcome::FolderAdded { key }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Subscribe a feed by URL under the open folder.
    pub async fn add_feed(&self, view: &FolderView, url_str: &str) -> ActionOutcome {
        let url = match validate_feed_url(url_str.trim()) {
            Ok(url) => url,
            Err(e) => return ActionOutcome::Invalid(e.into()),
        };
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.add_feed(&url, view.key()).await {
            Ok(AddFeedResponse::Created { key, name, unread }) => {
                view.tree
                    .borrow_mut()
                    .append(FeedItem::feed(key.as_str(), name.as_str(), unread));
                tracing::info!(key = %key, name = %name, unread, "feed added");
                ActionOutcome::FeedAdded { key, name, unread }
            }
            Ok(AddFeedResponse::Duplicate) => {
                tracing::info!(url = %url, "feed already registered");
                ActionOutcome::DuplicateFeed
            }
            Ok(AddFeedResponse::NotFound) => {
                tracing::info!(url = %url, "no syndication file at url");
                ActionOutcome::FeedNotFound
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Rename the current edit target.
    pub async fn rename_target(&self, view: &FolderView, new_name: &str) -> ActionOutcome {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return ActionOutcome::Invalid(ValidationError::EmptyName);
        }
        let Some((key, kind)) = target_of(view) else {
            return ActionOutcome::Invalid(ValidationError::NoEditTarget);
        };
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        let result = match kind {
            ItemKind::Feed => self.remote.rename_feed(&key, new_name).await,
            ItemKind::Folder => self.remote.rename_folder(&key, new_name).await,
        };
        match result {
            Ok(()) => {
                if !view.tree.borrow_mut().rename_target(new_name) {
                    tracing::warn!(key = %key, "edit target vanished before rename applied");
                }
                ActionOutcome::Renamed {
                    name: new_name.to_string(),
                }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Remove the current edit target's node.
    pub async fn remove_target(&self, view: &FolderView) -> ActionOutcome {
        let Some((key, kind)) = target_of(view) else {
            return ActionOutcome::Invalid(ValidationError::NoEditTarget);
        };
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        let result = match kind {
            ItemKind::Feed => self.remote.remove_feed(&key).await,
            ItemKind::Folder => self.remote.remove_folder(&key).await,
        };
        match result {
            Ok(()) => {
                view.tree.borrow_mut().remove_target();
                tracing::info!(key = %key, ?kind, "tree node removed");
                ActionOutcome::Removed { kind }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Mark one entry read; removal happens only on confirmed success.
    pub async fn read_entry(&self, view: &FeedView, link: &str) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.mark_read(view.key(), link).await {
            Ok(()) => {
                view.entries.borrow_mut().remove(link);
                ActionOutcome::EntryRead
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Mark every entry of the feed read.
    pub async fn read_all_feed(&self, view: &FeedView) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.mark_feed_read(view.key()).await {
            Ok(()) => {
                let removed = view.entries.borrow_mut().clear();
                tracing::info!(feed = view.key(), removed, "feed marked read");
                ActionOutcome::FeedCleared
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Mark everything under the folder read.
    ///
    /// Clears the unread-count display for every item presently in the
    /// view's projection; no re-query of the server-side tree.
    pub async fn read_all_folder(&self, view: &FolderView) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.mark_folder_read(view.key()).await {
            Ok(()) => {
                view.tree.borrow_mut().clear_counts();
                tracing::info!(folder = view.key(), "folder marked read");
                ActionOutcome::FolderCountsCleared
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Refresh the feed and merge the fetched batch into the list.
    pub async fn refresh_feed(&self, view: &FeedView) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.refresh_feed(view.key()).await {
            Ok(batch) => {
                let batch: Vec<Entry> = batch
                    .into_iter()
                    .map(|e| Entry::new(e.link, e.title))
                    .collect();
                let added = view.entries.borrow_mut().merge(batch);
                ActionOutcome::FeedRefreshed { added }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Refresh the folder: update the displayed count for every feed key in
    /// the server's response, reporting whether any count increased.
    pub async fn refresh_folder(&self, view: &FolderView) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.refresh_folder(view.key()).await {
            Ok(counts) => {
                let mut tree = view.tree.borrow_mut();
                let mut any_new = false;
                for (key, unread) in counts {
                    if let Some(old) = tree.count(&key) {
                        any_new |= unread > old;
                    }
                    tree.set_count(&key, unread);
                }
                ActionOutcome::FolderRefreshed { any_new }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Start the server-side import job for the view's folder.
    ///
    /// On success the collaborator is expected to navigate to the folder
    /// view; progress arrives separately over the push channel.
    pub async fn start_import(&self, view: &ImportView) -> ActionOutcome {
        let Some(_gate) = view.gate.try_enter() else {
            return ActionOutcome::Busy;
        };

        match self.remote.start_import(view.folder_key()).await {
            Ok(()) => {
                tracing::info!(folder = view.folder_key(), "import started");
                ActionOutcome::ImportStarted {
                    folder_key: view.folder_key().to_string(),
                }
            }
            Err(e) => ActionOutcome::Failed(e),
        }
    }
}

/// Revalidate the edit target and copy out its identity.
///
/// Taken before the gate so a stale target is a local rejection, and the
/// tree borrow is released before any await.
fn target_of(view: &FolderView) -> Option<(String, ItemKind)> {
    let tree = view.tree.borrow();
    tree.target().map(|item| (item.key.to_string(), item.kind))
}
