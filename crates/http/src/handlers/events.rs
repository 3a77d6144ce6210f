use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use smartmark_core::{Bookmark, BookmarkRow};
use smartmark_service::LiveView;

use crate::AppState;
use crate::api_error::ApiError;
use crate::session::CurrentUser;

/// Streams the reconciled bookmark list as `bookmarks` events: once on
/// connect, then on every change.
pub async fn sse_bookmarks(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let live = LiveView::start(user.id, &state.bookmarks, state.poll_interval).await?;
    let mut rx = live.changes();
    tracing::info!(user_id = %user.id, "SSE client connected");

    let stream = async_stream::stream! {
        // Client disconnect drops the stream, and with it the live view.
        let _live = live;
        let mut rows = rx.borrow_and_update().clone();
        loop {
            match bookmarks_event(rows) {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::warn!(error = %e, "Failed to encode bookmarks event"),
            }
            if rx.changed().await.is_err() {
                break;
            }
            rows = rx.borrow_and_update().clone();
        }
    };
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn bookmarks_event(rows: Vec<Bookmark>) -> Result<Event, axum::Error> {
    let rows: Vec<BookmarkRow> = rows.into_iter().map(BookmarkRow::from).collect();
    Event::default().event("bookmarks").json_data(rows)
}
