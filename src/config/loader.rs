//! Tiered config resolution
//!
//! Two documents are needed: a set of defaults and an environment-specific
//! override. Tiers are probed in order (dev, embedded, external) and the first
//! one holding both documents wins. An empty dev document defers to the next
//! tier; an empty embedded or external document ends resolution.

use super::merge::{merge, MergeStrategy};
use super::read::{parse_document, read_bytes};
use super::{Document, Origin, Settings};
use crate::assets::AssetStore;
use crate::error::{ConfigError, ConfigResult};
use crate::runtime::Runtime;
use std::borrow::Cow;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding an optional JSON object merged last.
pub const DEFAULT_OVERLAY_VAR: &str = "APP_CONFIG";

/// File names and locations probed by each tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayout {
    /// Developer-local directory, relative to the base directory.
    pub dev_dir: PathBuf,
    pub dev_defaults: String,
    pub dev_environment: String,
    /// Logical path in the asset store, and path relative to the base
    /// directory for the external tier.
    pub defaults: String,
    pub environment: String,
}

impl Default for ConfigLayout {
    fn default() -> Self {
        Self {
            dev_dir: PathBuf::from("go").join("config"),
            dev_defaults: "config.default.json".to_string(),
            dev_environment: "config.local.json".to_string(),
            defaults: "public/config/config.default.json".to_string(),
            environment: "public/config/config.prod.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub layout: ConfigLayout,
    pub strategy: MergeStrategy,
    /// Variable to read a JSON overlay from; `None` disables the overlay.
    pub env_overlay: Option<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            layout: ConfigLayout::default(),
            strategy: MergeStrategy::default(),
            env_overlay: Some(DEFAULT_OVERLAY_VAR.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Dev,
    Embedded,
    External,
}

impl Tier {
    pub const ORDER: [Tier; 3] = [Tier::Dev, Tier::Embedded, Tier::External];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Dev => "dev",
            Tier::Embedded => "embedded",
            Tier::External => "external",
        })
    }
}

struct Located {
    origin: Origin,
    document: Document,
}

struct Resolved {
    tier: Tier,
    defaults: Located,
    environment: Located,
}

/// Resolves, merges and stores application configuration.
pub struct Loader<A> {
    runtime: Runtime,
    assets: A,
    options: LoaderOptions,
}

impl<A: AssetStore> Loader<A> {
    pub fn new(runtime: Runtime, assets: A) -> Self {
        Self { runtime, assets, options: LoaderOptions::default() }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Resolve both documents, merge the environment document over the
    /// defaults, apply the overlay and return the resulting settings.
    ///
    /// Every call redoes the whole resolution.
    pub fn load(&self) -> ConfigResult<Settings> {
        let Resolved { tier, defaults, environment } = self.resolve()?;
        tracing::info!(
            "Loaded {} config: {} + {}",
            tier,
            defaults.origin,
            environment.origin
        );

        let strategy = self.options.strategy;
        let environment_keys: Vec<String> = environment.document.keys().cloned().collect();

        let mut merged = defaults.document;
        merge(&mut merged, environment.document, strategy);

        let mut overlay_keys = Vec::new();
        let mut overlay_origin = None;
        if let Some(overlay) = self.read_overlay() {
            overlay_keys.extend(overlay.document.keys().cloned());
            merge(&mut merged, overlay.document, strategy);
            overlay_origin = Some(overlay.origin);
        }

        let mut settings = Settings::new(defaults.origin.clone());
        settings.store(merged, &defaults.origin);
        for key in &environment_keys {
            settings.record_origin(key, &environment.origin);
        }
        if let Some(origin) = &overlay_origin {
            for key in &overlay_keys {
                settings.record_origin(key, origin);
            }
        }

        Ok(settings)
    }

    fn resolve(&self) -> ConfigResult<Resolved> {
        for tier in Tier::ORDER {
            if tier == Tier::Dev && !self.runtime.is_dev() {
                continue;
            }

            match self.probe(tier)? {
                Some(resolved)
                    if !resolved.defaults.document.is_empty()
                        && !resolved.environment.document.is_empty() =>
                {
                    return Ok(resolved);
                }
                // Only the dev pair may be empty and still defer to later tiers.
                Some(_) if tier == Tier::Dev => {
                    tracing::debug!("Skipping {} config: a document is empty", tier);
                }
                Some(_) => {
                    tracing::debug!("Found {} config but a document is empty", tier);
                    break;
                }
                None => {
                    tracing::debug!("No {} config found", tier);
                }
            }
        }

        let layout = &self.options.layout;
        Err(ConfigError::NoConfigSource {
            defaults: layout.defaults.clone(),
            environment: layout.environment.clone(),
        })
    }

    /// Fetch both documents of `tier`. Parsing only starts once both are
    /// known to exist, so a broken file in an incomplete tier is not fatal.
    fn probe(&self, tier: Tier) -> ConfigResult<Option<Resolved>> {
        let layout = &self.options.layout;
        let (defaults, environment) = match tier {
            Tier::Dev => {
                let dir = self.runtime.base_dir.join(&layout.dev_dir);
                (
                    Origin::Dev(dir.join(&layout.dev_defaults)),
                    Origin::Dev(dir.join(&layout.dev_environment)),
                )
            }
            Tier::Embedded => (
                Origin::Embedded(layout.defaults.clone()),
                Origin::Embedded(layout.environment.clone()),
            ),
            Tier::External => (
                Origin::External(self.runtime.base_dir.join(&layout.defaults)),
                Origin::External(self.runtime.base_dir.join(&layout.environment)),
            ),
        };

        let Some(defaults_bytes) = self.fetch(&defaults)? else {
            return Ok(None);
        };
        let Some(environment_bytes) = self.fetch(&environment)? else {
            return Ok(None);
        };

        Ok(Some(Resolved {
            tier,
            defaults: Located {
                document: parse_document(&defaults_bytes, defaults.clone())?,
                origin: defaults,
            },
            environment: Located {
                document: parse_document(&environment_bytes, environment.clone())?,
                origin: environment,
            },
        }))
    }

    fn fetch(&self, origin: &Origin) -> ConfigResult<Option<Cow<'_, [u8]>>> {
        match origin {
            Origin::Dev(path) | Origin::External(path) => {
                Ok(read_bytes(path, origin)?.map(Cow::Owned))
            }
            Origin::Embedded(path) => Ok(self.assets.get(path)),
            // Overlays are read by `read_overlay`, never as a tier.
            Origin::Environment(_) => Ok(None),
        }
    }

    /// Read the overlay variable. Unset or blank is no overlay; content that
    /// is not a JSON object is logged and ignored.
    fn read_overlay(&self) -> Option<Located> {
        let var = self.options.env_overlay.as_deref()?;
        let raw = match env::var(var) {
            Ok(raw) if raw.trim().is_empty() => return None,
            Ok(raw) => raw,
            Err(env::VarError::NotPresent) => return None,
            Err(err) => {
                tracing::warn!("Ignoring ${}: {}", var, err);
                return None;
            }
        };

        let origin = Origin::Environment(var.to_string());
        match parse_document(raw.as_bytes(), origin.clone()) {
            Ok(document) => {
                tracing::debug!("Applying config overlay from ${}", var);
                Some(Located { origin, document })
            }
            Err(err) => {
                tracing::warn!("${} is not a valid JSON object, ignoring it: {}", var, err);
                None
            }
        }
    }
}
