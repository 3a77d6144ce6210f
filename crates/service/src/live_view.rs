//! Live, reconciled bookmark list for one owner.
//!
//! Three independent sources feed a single [`BookmarkView`]: a fixed-interval
//! poll that replaces the list wholesale, the storage change feed, and local
//! events published by [`BookmarkService`]. All merges run on one task, one at
//! a time. Any source may deliver an event another source already applied;
//! the reducer makes those no-ops.

use std::time::Duration;

use futures_util::StreamExt;
use smartmark_core::{Bookmark, BookmarkChange, BookmarkView, UserId};
use smartmark_storage::ChangeStream;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{BookmarkService, ServiceError};

/// Handle to a running live view. Dropping it stops the task and releases
/// the feed subscription.
pub struct LiveView {
    owner: UserId,
    changes: watch::Receiver<Vec<Bookmark>>,
    task: JoinHandle<()>,
}

impl LiveView {
    /// Fetches the initial snapshot, then starts reconciling in the background.
    ///
    /// A failed snapshot is returned to the caller. A failed feed subscription
    /// only degrades the view to poll plus local updates.
    pub async fn start(
        owner: UserId,
        service: &BookmarkService,
        poll_interval: Duration,
    ) -> Result<Self, ServiceError> {
        let local = service.subscribe_local();
        let view = BookmarkView::from_snapshot(service.list(owner).await?);

        let feed = match service.subscribe_feed(owner).await {
            Ok(stream) => Some(stream),
            Err(e) => {
                tracing::warn!(user_id = %owner, error = %e, "Change feed unavailable, relying on poll");
                None
            },
        };

        let (tx, changes) = watch::channel(view.snapshot());
        let task = tokio::spawn(run(owner, view, service.clone(), feed, local, tx, poll_interval));
        tracing::debug!(user_id = %owner, "Live view started");
        Ok(Self { owner, changes, task })
    }

    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Receiver yielding a fresh snapshot every time the list changes.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<Vec<Bookmark>> {
        self.changes.clone()
    }

    #[must_use]
    pub fn current(&self) -> Vec<Bookmark> {
        self.changes.borrow().clone()
    }
}

impl Drop for LiveView {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!(user_id = %self.owner, "Live view stopped");
    }
}

async fn run(
    owner: UserId,
    mut view: BookmarkView,
    service: BookmarkService,
    mut feed: Option<ChangeStream>,
    mut local: broadcast::Receiver<BookmarkChange>,
    tx: watch::Sender<Vec<Bookmark>>,
    poll_interval: Duration,
) {
    let mut poll = tokio::time::interval_at(Instant::now() + poll_interval, poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let changed = tokio::select! {
            _ = poll.tick() => match service.list(owner).await {
                Ok(rows) => view.replace(rows),
                Err(e) if e.is_transient() => {
                    tracing::debug!(user_id = %owner, error = %e, "Poll failed, retrying next tick");
                    false
                },
                Err(e) => {
                    tracing::warn!(user_id = %owner, error = %e, "Poll failed, retrying next tick");
                    false
                },
            },
            event = next_feed_event(&mut feed) => match event {
                Some(change) => merge(&mut view, owner, change),
                None => {
                    tracing::warn!(user_id = %owner, "Change feed ended, relying on poll");
                    feed = None;
                    false
                },
            },
            event = local.recv() => match event {
                Ok(change) => merge(&mut view, owner, change),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(user_id = %owner, skipped = n, "Live view lagged on local events");
                    false
                },
                Err(broadcast::error::RecvError::Closed) => break,
            },
        };

        if changed && tx.send(view.snapshot()).is_err() {
            break;
        }
    }
}

/// Pends forever once the feed is gone so `select!` keeps serving the other sources.
async fn next_feed_event(feed: &mut Option<ChangeStream>) -> Option<BookmarkChange> {
    match feed {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

fn merge(view: &mut BookmarkView, owner: UserId, change: BookmarkChange) -> bool {
    if change.owner() != owner {
        return false;
    }
    tracing::debug!(user_id = %owner, id = %change.bookmark_id(), "Merging change");
    view.apply(change)
}
