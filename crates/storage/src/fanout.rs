//! Per-owner views over a process-wide change broadcast.

use smartmark_core::{BookmarkChange, UserId};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::traits::ChangeStream;

/// Filter a shared broadcast receiver down to one owner's changes.
///
/// Ends when every sender is gone.
pub(crate) fn owner_stream(
    mut rx: broadcast::Receiver<BookmarkChange>,
    owner: UserId,
) -> ChangeStream {
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(change) if change.owner() == owner => yield change,
                Ok(_) => {},
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "change feed subscriber lagged");
                },
                Err(RecvError::Closed) => break,
            }
        }
    };
    Box::pin(stream)
}
