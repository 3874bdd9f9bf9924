//! Search session state split into submodules.
//!
//! `types` holds the catalog item model shared by every layer; `search`
//! holds the per-session [`SearchState`] mutated by query input, toggle
//! changes, and scroll events.

pub mod search;
pub mod types;

pub use search::{SUGGESTION_COOLDOWN, SearchState};
pub use types::{PackageItem, Source};
