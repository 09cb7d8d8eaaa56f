use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A saved destination. Either a whole system, a body within it, or a
/// specific station (`is_station` distinguishes station rows in mixed lists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Bookmark {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub is_station: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookmarkError {
    #[error("bookmark index {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Change notification delivered to store subscribers after a mutation has
/// been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Added { index: usize },
    Removed { index: usize },
    Refreshed,
}

/// Ordered bookmark list with change notifications.
///
/// Panel-side editors add and remove entries; the search core never mutates
/// bookmarks and only observes the change signal. Persistence rides along in
/// [`MonitorConfig::bookmarks`](crate::config::MonitorConfig) via
/// [`snapshot`](Self::snapshot) and [`replace_all`](Self::replace_all).
#[derive(Default)]
pub struct BookmarkStore {
    entries: Vec<Bookmark>,
    subscribers: Vec<Sender<BookmarkEvent>>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted entries.
    pub fn from_entries(entries: Vec<Bookmark>) -> Self {
        Self {
            entries,
            subscribers: Vec::new(),
        }
    }

    /// Subscribe to change notifications. Dropped receivers are pruned on the
    /// next notification.
    pub fn subscribe(&mut self) -> Receiver<BookmarkEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Append a bookmark and return its index.
    pub fn add(&mut self, bookmark: Bookmark) -> usize {
        let index = self.entries.len();
        tracing::debug!(index, name = %bookmark.name, "bookmark added");
        self.entries.push(bookmark);
        self.notify(BookmarkEvent::Added { index });
        index
    }

    /// Remove the bookmark at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        if index >= self.entries.len() {
            return Err(BookmarkError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        tracing::debug!(index, name = %removed.name, "bookmark removed");
        self.notify(BookmarkEvent::Removed { index });
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }

    /// Copy of the current entries, in order, for persisting.
    pub fn snapshot(&self) -> Vec<Bookmark> {
        self.entries.clone()
    }

    /// Replace the whole list after an upstream change (e.g. the persisted
    /// configuration was rewritten) and signal subscribers to re-read.
    pub fn replace_all(&mut self, entries: Vec<Bookmark>) {
        self.entries = entries;
        tracing::debug!(len = self.entries.len(), "bookmark list refreshed");
        self.notify(BookmarkEvent::Refreshed);
    }

    fn notify(&mut self, event: BookmarkEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
