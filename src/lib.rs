//! Client-side controller for a folder-based feed reader.
//!
//! The controller owns no markup and no transport details. It models one
//! open page as a *view scope* (a folder view, a feed view, or the import
//! view), guards every mutating action behind a per-scope reentrancy gate,
//! reconciles server entry batches into the displayed list, and drives the
//! folder tree's navigate/edit mode switch. The remote service is a narrow
//! trait; everything the user sees is derived from [`sync::ActionOutcome`].

pub mod config;
pub mod entry;
pub mod gate;
pub mod import;
pub mod remote;
pub mod sync;
pub mod tree;
pub mod util;
pub mod view;

pub use config::Config;
pub use entry::{Entry, EntryList};
pub use gate::ActionGate;
pub use remote::{AddFeedResponse, FetchedEntry, RemoteError, RemoteService};
pub use sync::{ActionOutcome, Coordinator, ValidationError};
pub use tree::{FeedItem, FolderTree, ItemKind, TapAction, TreeMode};
pub use view::{FeedView, FolderView, ImportView};
