//! Reconciling bookmark list.
//!
//! A keyed collection fed by three kinds of input: full snapshots (initial
//! load and polls), change-feed events, and local optimistic updates. Every
//! operation is idempotent, so the same change arriving over several paths
//! is applied once.
//!
//! Rows are kept ordered newest first by `created_at`; rows created in the
//! same instant are ordered by id so snapshots are deterministic.

mod reconcile_tests;

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::{Bookmark, BookmarkChange, BookmarkId};

type OrderKey = (Reverse<DateTime<Utc>>, BookmarkId);

#[derive(Debug, Clone, Default)]
pub struct BookmarkView {
    rows: HashMap<BookmarkId, Bookmark>,
    order: BTreeSet<OrderKey>,
}

impl BookmarkView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view from an initial snapshot. Duplicate ids keep the first row.
    #[must_use]
    pub fn from_snapshot(snapshot: Vec<Bookmark>) -> Self {
        let mut view = Self::new();
        for bookmark in snapshot {
            view.apply_created(bookmark);
        }
        view
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &BookmarkId) -> bool {
        self.rows.contains_key(id)
    }

    /// Rows newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> + '_ {
        self.order.iter().filter_map(|(_, id)| self.rows.get(id))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Bookmark> {
        self.iter().cloned().collect()
    }

    /// Insert `bookmark` unless a row with the same id is present.
    /// Returns `true` if the view changed.
    pub fn apply_created(&mut self, bookmark: Bookmark) -> bool {
        if self.rows.contains_key(&bookmark.id) {
            return false;
        }
        self.order.insert((Reverse(bookmark.created_at), bookmark.id));
        self.rows.insert(bookmark.id, bookmark);
        true
    }

    /// Remove the row with `id`. Returns `true` if the view changed.
    pub fn apply_deleted(&mut self, id: &BookmarkId) -> bool {
        match self.rows.remove(id) {
            Some(removed) => {
                self.order.remove(&(Reverse(removed.created_at), removed.id));
                true
            },
            None => false,
        }
    }

    pub fn apply(&mut self, change: BookmarkChange) -> bool {
        match change {
            BookmarkChange::Created(bookmark) => self.apply_created(bookmark),
            BookmarkChange::Deleted { id, .. } => self.apply_deleted(&id),
        }
    }

    /// Replace the whole list with a fetched snapshot, discarding local-only rows.
    /// Returns `true` if the visible list changed.
    pub fn replace(&mut self, snapshot: Vec<Bookmark>) -> bool {
        let next = Self::from_snapshot(snapshot);
        let changed = !self.iter().eq(next.iter());
        *self = next;
        changed
    }
}
