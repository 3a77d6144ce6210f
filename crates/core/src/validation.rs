//! Add-form validation.
//!
//! Runs before any backend call; a failed draft never reaches the store.

use serde::Deserialize;
use url::Url;

use crate::{NewBookmark, UserId, ValidationError};

/// Raw add-form input, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookmarkDraft {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl BookmarkDraft {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self { url: url.into(), title: title.into() }
    }

    /// Check the URL first, then the title.
    ///
    /// # Errors
    /// [`ValidationError::InvalidUrl`] when the URL is not absolute,
    /// [`ValidationError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if Url::parse(self.url.trim()).is_err() {
            return Err(ValidationError::InvalidUrl);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Validate and build the trimmed insert payload for `user_id`.
    ///
    /// # Errors
    /// Same as [`Self::validate`].
    pub fn into_new_bookmark(self, user_id: UserId) -> Result<NewBookmark, ValidationError> {
        self.validate()?;
        Ok(NewBookmark {
            url: self.url.trim().to_owned(),
            title: self.title.trim().to_owned(),
            user_id,
        })
    }
}
