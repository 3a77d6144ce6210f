use crate::{Bookmark, BookmarkId, UserId};

/// One change observed on the bookmarks table.
///
/// Produced by the backend change feed and by local optimistic updates;
/// consumed by [`crate::BookmarkView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkChange {
    Created(Bookmark),
    Deleted { id: BookmarkId, user_id: UserId },
}

impl BookmarkChange {
    /// Owner of the affected row.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        match self {
            Self::Created(bookmark) => bookmark.user_id,
            Self::Deleted { user_id, .. } => *user_id,
        }
    }

    #[must_use]
    pub const fn bookmark_id(&self) -> BookmarkId {
        match self {
            Self::Created(bookmark) => bookmark.id,
            Self::Deleted { id, .. } => *id,
        }
    }
}
