//! Read-only asset stores for configuration bundled into the binary

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// A read-only filesystem addressed by logical, `/`-separated paths.
pub trait AssetStore {
    fn get(&self, path: &str) -> Option<Cow<'_, [u8]>>;

    fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}

/// Store with no files. Resolution always falls through its tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyAssets;

impl AssetStore for EmptyAssets {
    fn get(&self, _path: &str) -> Option<Cow<'_, [u8]>> {
        None
    }
}

/// Map-backed store, used for compiled-in files and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Cow<'static, [u8]>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, normalizing `\` separators and a leading `./` or `/`.
    pub fn with_file(mut self, path: &str, content: impl Into<Cow<'static, [u8]>>) -> Self {
        self.files.insert(normalize(path), content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetStore for MemoryAssets {
    fn get(&self, path: &str) -> Option<Cow<'_, [u8]>> {
        self.files.get(&normalize(path)).map(|c| Cow::Borrowed(&**c))
    }
}

impl<T: AssetStore + ?Sized> AssetStore for &T {
    fn get(&self, path: &str) -> Option<Cow<'_, [u8]>> {
        (**self).get(path)
    }
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}

static BUNDLED: Lazy<MemoryAssets> = Lazy::new(|| {
    MemoryAssets::new()
        .with_file(
            "public/config/config.default.json",
            include_bytes!("../public/config/config.default.json").as_slice(),
        )
        .with_file(
            "public/config/config.prod.json",
            include_bytes!("../public/config/config.prod.json").as_slice(),
        )
});

/// Configuration files compiled into this crate from `public/config/`.
pub fn bundled() -> &'static MemoryAssets {
    &BUNDLED
}
