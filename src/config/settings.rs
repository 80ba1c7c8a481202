//! The merged, read-only settings store

use super::{Document, Origin};
use crate::error::{ConfigError, ConfigResult};
use figment::providers::Serialized;
use figment::Figment;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level sections every application config must carry as objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Logger,
    Http,
    Static,
}

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Section::Logger => "logger",
            Section::Http => "http",
            Section::Static => "static",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Merged configuration, built once by [`Loader::load`](super::Loader::load)
/// and shared read-only afterwards.
///
/// Keys are case-insensitive: object keys are lowercased on store, at every
/// depth, and lookups lowercase the requested key.
#[derive(Debug, Clone)]
pub struct Settings {
    values: Map<String, Value>,
    origins: BTreeMap<String, Origin>,
    source: Origin,
}

impl Settings {
    pub(crate) fn new(source: Origin) -> Self {
        Self { values: Map::new(), origins: BTreeMap::new(), source }
    }

    /// Store every key of `document`, replacing prior values, and remember
    /// `origin` as the place each key was last written from.
    pub(crate) fn store(&mut self, document: Document, origin: &Origin) {
        for (key, value) in document {
            let key = key.to_lowercase();
            self.origins.insert(key.clone(), origin.clone());
            self.values.insert(key, lowercase_keys(value));
        }
    }

    pub(crate) fn record_origin(&mut self, key: &str, origin: &Origin) {
        let key = key.to_lowercase();
        if self.values.contains_key(&key) {
            self.origins.insert(key, origin.clone());
        }
    }

    /// Look up `key`. A key that is not stored at the top level but contains
    /// dots is walked as a path through nested objects (`http.port`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = key.to_lowercase();
        if let Some(value) = self.values.get(&key) {
            return Some(value);
        }
        if !key.contains('.') {
            return None;
        }

        let mut parts = key.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn all(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.values
    }

    /// The tier whose documents seeded these settings.
    pub fn source(&self) -> &Origin {
        &self.source
    }

    /// The document that last wrote a top-level key.
    ///
    /// Tracking is per top-level key: an overlay that only sets
    /// `http.enable` is reported as the origin of all of `http`.
    pub fn origin(&self, key: &str) -> Option<&Origin> {
        self.origins.get(&key.to_lowercase())
    }

    pub fn origins(&self) -> impl Iterator<Item = (&str, &Origin)> {
        self.origins.iter().map(|(k, o)| (k.as_str(), o))
    }

    /// Fetch a required section, which must be a JSON object.
    pub fn section(&self, section: Section) -> ConfigResult<&Map<String, Value>> {
        self.values
            .get(section.key())
            .and_then(Value::as_object)
            .ok_or(ConfigError::Section(section))
    }

    pub fn logger(&self) -> ConfigResult<&Map<String, Value>> {
        self.section(Section::Logger)
    }

    pub fn http(&self) -> ConfigResult<&Map<String, Value>> {
        self.section(Section::Http)
    }

    pub fn static_section(&self) -> ConfigResult<&Map<String, Value>> {
        self.section(Section::Static)
    }

    /// Deserialize a section into a caller-defined type.
    ///
    /// The section's presence and shape are checked first, so a missing or
    /// non-object section reports the section error rather than a type error.
    pub fn extract_section<T: DeserializeOwned>(&self, section: Section) -> ConfigResult<T> {
        self.section(section)?;
        self.figment().extract_inner(section.key()).map_err(|err| ConfigError::Extract {
            key: section.key().to_string(),
            source: Box::new(err),
        })
    }

    /// Deserialize the whole settings map into a caller-defined type.
    pub fn extract<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        self.figment()
            .extract()
            .map_err(|err| ConfigError::Extract { key: "settings".to_string(), source: Box::new(err) })
    }

    fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(&self.values))
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k.to_lowercase(), lowercase_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
