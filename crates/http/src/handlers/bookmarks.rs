use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use smartmark_core::{BookmarkDraft, BookmarkId, BookmarkRow, User};

use crate::AppState;
use crate::api_error::ApiError;
use crate::session::CurrentUser;

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<BookmarkRow>>, ApiError> {
    let rows = state.bookmarks.list(user.id).await?;
    Ok(Json(rows.into_iter().map(BookmarkRow::from).collect()))
}

pub async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<BookmarkDraft>,
) -> Result<(StatusCode, Json<BookmarkRow>), ApiError> {
    let row = state.bookmarks.add(user.id, draft).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<BookmarkId>,
) -> Result<StatusCode, ApiError> {
    state.bookmarks.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
