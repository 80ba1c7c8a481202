//! Configuration loading and merging
//!
//! Resolves a defaults document and an environment document from the first
//! available tier (dev-local files, embedded assets, external files), merges
//! them and exposes the result as [`Settings`].

pub mod loader;
pub mod merge;
pub mod origin;
pub mod read;
pub mod settings;

/// One parsed JSON configuration file.
pub type Document = serde_json::Map<String, serde_json::Value>;

pub use loader::{ConfigLayout, Loader, LoaderOptions, Tier, DEFAULT_OVERLAY_VAR};
pub use merge::{merge, MergeStrategy};
pub use origin::Origin;
pub use read::{parse_document, read_json};
pub use settings::{Section, Settings};
