//! Folder tree projection and the navigate/edit mode switch.
//!
//! A folder view holds a transient projection of its children: the
//! authoritative tree lives server-side, the client keeps just enough to
//! render the open page and apply confirmed mutations. Taps route through a
//! single dispatcher per item that consults the item's binding stamp at
//! dispatch time instead of rewiring handlers on every mode toggle.

use std::sync::Arc;

/// Tree node type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Feed,
    Folder,
}

/// One child of the open folder: a subscribed feed or a sub-folder.
///
/// `key` is the stable server-assigned identifier and the only thing the
/// client ever sends back. `edit_bound` is the binding stamp applied by the
/// edit-mode pass; a stamped item opens its action menu instead of
/// navigating.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub key: Arc<str>,
    pub name: String,
    pub unread: i64,
    pub kind: ItemKind,
    edit_bound: bool,
}

impl FeedItem {
    pub fn feed(key: impl Into<Arc<str>>, name: impl Into<String>, unread: i64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            unread,
            kind: ItemKind::Feed,
            edit_bound: false,
        }
    }

    pub fn folder(key: impl Into<Arc<str>>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            unread: 0,
            kind: ItemKind::Folder,
            edit_bound: false,
        }
    }

    /// Whether a tap on this item currently opens its action menu.
    pub fn is_edit_bound(&self) -> bool {
        self.edit_bound
    }
}

/// Tree interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeMode {
    #[default]
    Navigate,
    Edit,
}

/// What a tap on an item dispatches to.
///
/// Menu actions carry the item's current name so the rename field can be
/// pre-filled the way the original popups were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapAction {
    /// Follow the item to its folder or feed page.
    Navigate { key: Arc<str>, kind: ItemKind },
    /// Item selected as edit target; open the feed rename/remove menu.
    OpenFeedMenu { name: String },
    /// Item selected as edit target; open the folder rename/remove menu.
    OpenFolderMenu { name: String },
    /// Tap landed outside the item list.
    Ignored,
}

/// Ordered children of one open folder view, plus edit-mode state.
#[derive(Debug, Default)]
pub struct FolderTree {
    items: Vec<FeedItem>,
    mode: TreeMode,
    /// Edit target as a stable key, revalidated by lookup before every use.
    edit_target: Option<Arc<str>>,
    /// Whether the transient "tap a title to edit" divider is shown.
    edit_prompt: bool,
    /// Policy for items appended while in edit mode: stamp them immediately,
    /// or leave them navigation-bound until the next full toggle.
    edit_binds_new_items: bool,
}

impl FolderTree {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Set the mid-edit append policy (see `Config::edit_binds_new_items`).
    pub fn with_edit_binding_for_new_items(mut self, enabled: bool) -> Self {
        self.edit_binds_new_items = enabled;
        self
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    /// Whether the edit-prompt divider is currently shown.
    pub fn edit_prompt_visible(&self) -> bool {
        self.edit_prompt
    }

    /// Toggle between navigate and edit mode, returning the new mode.
    ///
    /// Entering edit stamps every current item and shows the prompt
    /// divider. Leaving edit clears all stamps, hides the divider, and
    /// drops the edit target.
    pub fn toggle_mode(&mut self) -> TreeMode {
        match self.mode {
            TreeMode::Navigate => {
                self.mode = TreeMode::Edit;
                for item in &mut self.items {
                    item.edit_bound = true;
                }
                self.edit_prompt = true;
            }
            TreeMode::Edit => {
                self.mode = TreeMode::Navigate;
                for item in &mut self.items {
                    item.edit_bound = false;
                }
                self.edit_prompt = false;
                self.edit_target = None;
            }
        }
        tracing::debug!(mode = ?self.mode, items = self.items.len(), "tree mode toggled");
        self.mode
    }

    /// Dispatch a tap on the item at `index`.
    ///
    /// An edit-bound item becomes the edit target and yields its
    /// type-appropriate menu; it never navigates. Anything else follows the
    /// item's link.
    pub fn tap(&mut self, index: usize) -> TapAction {
        let Some(item) = self.items.get(index) else {
            return TapAction::Ignored;
        };
        if item.edit_bound {
            self.edit_target = Some(Arc::clone(&item.key));
            match item.kind {
                ItemKind::Feed => TapAction::OpenFeedMenu {
                    name: item.name.clone(),
                },
                ItemKind::Folder => TapAction::OpenFolderMenu {
                    name: item.name.clone(),
                },
            }
        } else {
            TapAction::Navigate {
                key: Arc::clone(&item.key),
                kind: item.kind,
            }
        }
    }

    /// Append a newly added item (confirmed add-feed/add-folder result).
    ///
    /// In edit mode the binding stamp follows the configured policy; the
    /// historical default leaves new items navigation-bound until the next
    /// toggle.
    pub fn append(&mut self, mut item: FeedItem) {
        item.edit_bound = self.mode == TreeMode::Edit && self.edit_binds_new_items;
        self.items.push(item);
    }

    /// Current edit target, revalidated by key lookup.
    ///
    /// Returns `None` when no target is selected or the targeted item no
    /// longer exists in the projection.
    pub fn target(&self) -> Option<&FeedItem> {
        let key = self.edit_target.as_deref()?;
        self.items.iter().find(|i| &*i.key == key)
    }

    /// Clear the edit target (menu closed without action).
    pub fn clear_target(&mut self) {
        self.edit_target = None;
    }

    /// Rename the edit target in place. Returns whether a target was found.
    ///
    /// The target stays selected; the caller clears it when the menu
    /// closes.
    pub fn rename_target(&mut self, name: &str) -> bool {
        let Some(key) = self.edit_target.clone() else {
            return false;
        };
        match self.items.iter_mut().find(|i| i.key == key) {
            Some(item) => {
                item.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove the edit target's node. Returns whether a node was removed.
    pub fn remove_target(&mut self) -> bool {
        let Some(key) = self.edit_target.take() else {
            return false;
        };
        let before = self.items.len();
        self.items.retain(|i| i.key != key);
        before != self.items.len()
    }

    /// Update one feed's displayed unread count. Returns whether the key
    /// was present in the projection.
    pub fn set_count(&mut self, key: &str, unread: i64) -> bool {
        match self.items.iter_mut().find(|i| &*i.key == key) {
            Some(item) => {
                item.unread = unread;
                true
            }
            None => false,
        }
    }

    /// Current unread count for a feed key, if it is in the projection.
    pub fn count(&self, key: &str) -> Option<i64> {
        self.items.iter().find(|i| &*i.key == key).map(|i| i.unread)
    }

    /// Clear the unread-count display for every item presently registered
    /// under this view (mark-all-read on the folder).
    pub fn clear_counts(&mut self) {
        for item in &mut self.items {
            item.unread = 0;
        }
    }
}
