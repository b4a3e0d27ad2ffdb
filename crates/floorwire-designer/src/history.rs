//! Linear undo/redo over whole-state snapshots.
//!
//! The stack always holds at least one entry: the baseline recorded when the
//! document was created or loaded. The pointer addresses the snapshot that
//! matches the current state, so undo is possible whenever it is above zero.

use std::collections::VecDeque;

/// Default number of retained snapshots.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Bounded snapshot stack with a current pointer.
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    entries: VecDeque<T>,
    index: usize,
    max_depth: usize,
}

impl<T: Clone> HistoryManager<T> {
    /// Creates a history holding only `baseline`.
    ///
    /// A depth of zero is treated as one.
    pub fn new(max_depth: usize, baseline: T) -> Self {
        let mut entries = VecDeque::with_capacity(max_depth.max(1));
        entries.push_back(baseline);
        Self {
            entries,
            index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Drops every entry and starts over from `baseline`.
    pub fn reset(&mut self, baseline: T) {
        self.entries.clear();
        self.entries.push_back(baseline);
        self.index = 0;
    }

    /// Appends a snapshot after the pointer.
    ///
    /// Redo entries are discarded first; the oldest entries are evicted once
    /// the depth limit is exceeded.
    pub fn record(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.max_depth {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    /// Steps back and returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps forward and returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.index
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.index - 1
    }

    /// Snapshot matching the current state.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Changes the depth limit.
    ///
    /// Redo entries go first, then the oldest undo entries; the entry
    /// matching the current state is always kept.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        while self.entries.len() > self.max_depth && self.can_redo() {
            self.entries.pop_back();
        }
        while self.entries.len() > self.max_depth && self.index > 0 {
            self.entries.pop_front();
            self.index -= 1;
        }
    }
}
