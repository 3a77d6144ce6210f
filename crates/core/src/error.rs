use thiserror::Error;

/// Add-form validation failures. The display text is shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid URL (include https://)")]
    InvalidUrl,

    #[error("Please enter a title")]
    EmptyTitle,
}
