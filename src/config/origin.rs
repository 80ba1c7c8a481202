//! Where a configuration document came from

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum Origin {
    /// Developer-local file, only consulted in development mode.
    Dev(PathBuf),
    /// Logical path inside the embedded asset store.
    Embedded(String),
    /// File on disk relative to the base directory.
    External(PathBuf),
    /// JSON overlay read from an environment variable.
    Environment(String),
}

impl Origin {
    pub fn tier_name(&self) -> &'static str {
        match self {
            Origin::Dev(_) => "dev",
            Origin::Embedded(_) => "embedded",
            Origin::External(_) => "external",
            Origin::Environment(_) => "environment",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Dev(path) | Origin::External(path) => write!(f, "{}", path.display()),
            Origin::Embedded(path) => write!(f, "embedded:{path}"),
            Origin::Environment(var) => write!(f, "${var}"),
        }
    }
}
