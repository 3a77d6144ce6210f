//! Core types and logic for smartmark
//!
//! Domain types shared across all other crates, draft validation for the
//! add form, and the reconciling [`BookmarkView`] that merges snapshots,
//! change-feed events and local updates into one ordered list.

mod bookmark;
mod change;
mod constants;
mod display;
mod env_config;
mod error;
mod user;
mod validation;
mod view;

pub use bookmark::*;
pub use change::*;
pub use constants::*;
pub use display::*;
pub use env_config::*;
pub use error::*;
pub use user::*;
pub use validation::*;
pub use view::*;
