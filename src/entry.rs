//! Unread entry list and the merge reconciler.
//!
//! An entry's identifying link is its identity; read state is modeled as
//! list membership, not a flag. Reading an entry removes it, refreshing a
//! feed merges the server's batch in without duplicating anything already
//! on screen.

use std::collections::HashSet;
use std::sync::Arc;

/// One displayed feed entry.
///
/// The link is unique within a feed's displayed list at any time; the
/// reconciler never inserts a second entry sharing a link already present.
/// `Arc<str>` keeps clones cheap when entries cross into presenters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub link: Arc<str>,
    pub title: Arc<str>,
}

impl Entry {
    pub fn new(link: impl Into<Arc<str>>, title: impl Into<Arc<str>>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
        }
    }
}

/// Ordered unread entries for one feed view, newest first.
#[derive(Debug, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from entries already in newest-first display order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.entries.iter().any(|e| &*e.link == link)
    }

    /// Merge a fetched batch into the list, returning the number of entries
    /// actually inserted.
    ///
    /// The batch is the server's current known state for the feed, ordered
    /// oldest to newest; each link not already displayed is prepended, so
    /// the resulting list stays newest-first regardless of what was already
    /// present. Entries already present are neither duplicated nor
    /// reordered, and duplicates within the batch itself collapse to their
    /// first occurrence.
    ///
    /// A return of 0 is the "no new entries" signal, distinct from a failed
    /// refresh; an empty batch is a valid, successful result.
    pub fn merge(&mut self, batch: Vec<Entry>) -> usize {
        if batch.is_empty() {
            return 0;
        }

        let mut seen: HashSet<Arc<str>> =
            self.entries.iter().map(|e| Arc::clone(&e.link)).collect();

        let mut added = 0;
        for entry in batch {
            if seen.contains(&entry.link) {
                continue;
            }
            seen.insert(Arc::clone(&entry.link));
            self.entries.insert(0, entry);
            added += 1;
        }

        if added > 0 {
            tracing::debug!(added, total = self.entries.len(), "merged entry batch");
        }
        added
    }

    /// Remove the entry with the given link. Returns whether it was present.
    ///
    /// Called only after the server confirms the read; the coordinator never
    /// removes speculatively.
    pub fn remove(&mut self, link: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &*e.link != link);
        before != self.entries.len()
    }

    /// Clear the whole list (mark-all-read). Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}
