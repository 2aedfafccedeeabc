use std::collections::VecDeque;

use crate::parse::Command;

/// History entries are stored as the command that was run.
pub type HistoryEntry = Command;

/// Default number of entries kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded log of executed commands with an Up/Down navigation cursor.
///
/// The cursor ranges over `0..=len`; `len` means "past the newest entry",
/// which is where it sits after every append.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    cursor: usize,
    /// Entries ever appended, including evicted ones.
    total: usize,
    /// Value of `total` at the last flush to a history file.
    flushed: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A store holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
            total: 0,
            flushed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, evicting the oldest when full, and park the cursor
    /// past the newest entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total += 1;
        self.cursor = self.entries.len();
    }

    /// Entries oldest first; with `limit`, only the newest `limit` of them.
    pub fn list(&self, limit: Option<usize>) -> impl Iterator<Item = &HistoryEntry> {
        let skip = limit.map_or(0, |n| self.entries.len().saturating_sub(n));
        self.entries.iter().skip(skip)
    }

    /// Like [`list`](Self::list), paired with each entry's 1-based sequence
    /// number. Numbers keep counting across evictions.
    pub fn numbered(&self, limit: Option<usize>) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        let evicted = self.total - self.entries.len();
        let skip = limit.map_or(0, |n| self.entries.len().saturating_sub(n));
        self.entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(move |(i, e)| (evicted + i + 1, e))
    }

    /// Step back one entry. `None` at the oldest entry; the cursor stays put.
    pub fn previous(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. `None` once past the newest entry.
    pub fn next(&mut self) -> Option<&HistoryEntry> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Entries appended since the last [`mark_flushed`](Self::mark_flushed),
    /// limited to those still held.
    pub fn unflushed(&self) -> impl Iterator<Item = &HistoryEntry> {
        let pending = (self.total - self.flushed).min(self.entries.len());
        self.entries.iter().skip(self.entries.len() - pending)
    }

    pub fn mark_flushed(&mut self) {
        self.flushed = self.total;
    }
}
