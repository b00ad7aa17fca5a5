//! JSON fixture store
//!
//! Fixtures are static JSON files that seed default field values for a
//! masterdata record before per-run overrides are applied. They live in
//! a directory tree and are addressed by their relative path without the
//! `.json` extension, e.g. `product/simple_product`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Directory-backed fixture store
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
    files: BTreeMap<String, PathBuf>,
}

impl FixtureStore {
    /// Scan a directory tree for `.json` fixtures
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut files = BTreeMap::new();

        for entry in walkdir::WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        {
            let rel = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or(entry.path())
                .with_extension("");
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(key, entry.path().to_path_buf());
        }

        debug!(root = %root.display(), count = files.len(), "fixture store opened");
        Ok(Self { root, files })
    }

    /// Root directory this store was opened on
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of all fixtures found, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Deserialize a fixture into a record
    ///
    /// Fields missing from the fixture take the record's defaults, which
    /// is what lets a minimal fixture seed a full form.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.files.get(name).ok_or_else(|| Error::FixtureNotFound {
            name: name.to_string(),
        })?;

        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::FixtureParse {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}
