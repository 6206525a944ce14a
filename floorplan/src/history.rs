//! Linear undo/redo history of full snapshots.
//!
//! The caller records the state *before* each mutation. Undo hands back the
//! most recent recorded state and stashes the current one for redo. Recording
//! after an undo discards the redo branch. The default history is unbounded;
//! [`History::with_limit`] opts into dropping the oldest steps.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: Vec<T>,
    limit: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self { past: VecDeque::new(), future: Vec::new(), limit: None }
    }
}

impl<T> History<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo steps (minimum 1). Oldest steps are dropped first.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self { past: VecDeque::new(), future: Vec::new(), limit: Some(limit.max(1)) }
    }

    /// Push the pre-mutation state and drop any redo branch.
    pub fn record(&mut self, snapshot: T) {
        self.future.clear();
        self.past.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }

    /// Step back. `current` is kept for redo; the returned snapshot replaces it.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
