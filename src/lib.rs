//! tiered-config: layered JSON application configuration
//!
//! Locates a defaults document and an environment override across three
//! tiers, merges them, and hands back an immutable [`Settings`] value with
//! key lookup and checked accessors for the `logger`, `http` and `static`
//! sections.
//!
//! ```no_run
//! use tiered_config::{assets, Loader, Runtime};
//!
//! let settings = Loader::new(Runtime::detect(), assets::bundled()).load()?;
//! let level = settings.logger()?.get("level");
//! # Ok::<(), tiered_config::ConfigError>(())
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod runtime;

pub use assets::{AssetStore, EmptyAssets, MemoryAssets};
pub use config::{
    read_json, ConfigLayout, Loader, LoaderOptions, MergeStrategy, Origin, Section, Settings,
};
pub use error::{ConfigError, ConfigResult};
pub use runtime::{RunMode, Runtime};
