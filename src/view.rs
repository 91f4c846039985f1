//! View scopes.
//!
//! One scope exists per rendered page instance and owns that page's state:
//! its server key, its action gate, and its transient projection (folder
//! children or unread entries). Scopes are never shared across pages, and
//! all access happens on the single UI thread, so interior mutability is
//! `Cell`/`RefCell` with no borrow ever held across an await.

use crate::entry::{Entry, EntryList};
use crate::gate::ActionGate;
use crate::import::ImportProgress;
use crate::tree::{FeedItem, FolderTree};
use std::cell::RefCell;
use std::sync::Arc;

/// Scope for one open folder page.
#[derive(Debug)]
pub struct FolderView {
    key: Arc<str>,
    pub gate: ActionGate,
    pub tree: RefCell<FolderTree>,
}

impl FolderView {
    pub fn new(key: impl Into<Arc<str>>, tree: FolderTree) -> Self {
        Self {
            key: key.into(),
            gate: ActionGate::new(),
            tree: RefCell::new(tree),
        }
    }

    /// Scope with an empty projection, for pages populated later.
    pub fn empty(key: impl Into<Arc<str>>) -> Self {
        Self::new(key, FolderTree::default())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current children for rendering.
    pub fn items(&self) -> Vec<FeedItem> {
        self.tree.borrow().items().to_vec()
    }
}

/// Scope for one open feed page.
#[derive(Debug)]
pub struct FeedView {
    key: Arc<str>,
    pub gate: ActionGate,
    pub entries: RefCell<EntryList>,
}

impl FeedView {
    pub fn new(key: impl Into<Arc<str>>, entries: EntryList) -> Self {
        Self {
            key: key.into(),
            gate: ActionGate::new(),
            entries: RefCell::new(entries),
        }
    }

    pub fn empty(key: impl Into<Arc<str>>) -> Self {
        Self::new(key, EntryList::new())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current unread entries for rendering.
    pub fn entry_list(&self) -> Vec<Entry> {
        self.entries.borrow().entries().to_vec()
    }

    pub fn unread(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Scope for the import confirmation page.
///
/// Holds the gate for the start-import mutation and the progress state fed
/// by the push channel.
#[derive(Debug)]
pub struct ImportView {
    folder_key: Arc<str>,
    pub gate: ActionGate,
    pub progress: RefCell<ImportProgress>,
}

impl ImportView {
    pub fn new(folder_key: impl Into<Arc<str>>) -> Self {
        Self {
            folder_key: folder_key.into(),
            gate: ActionGate::new(),
            progress: RefCell::new(ImportProgress::new()),
        }
    }

    pub fn folder_key(&self) -> &str {
        &self.folder_key
    }
}
