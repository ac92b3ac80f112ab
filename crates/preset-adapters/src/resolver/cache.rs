//! Deterministic on-disk cache for remote presets.
//!
//! ```text
//! <root>/
//! ├── github/
//! │   ├── owner_2Frepo/
//! │   └── owner_2Frepo@v1/
//! ├── gist/<id>/
//! └── git/<host_2Fpath>/
//! ```
//!
//! Keys and refs go through [`encode_cache_key`], which never emits `@`, so
//! the `key@ref` split is unambiguous.
//!
//! Each fetch lands in a unique hidden staging directory next to its entry
//! and is renamed into place, so a failed or concurrent fetch never leaves a
//! half-written entry behind.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use preset_core::{
    domain::{SourceKind, encode_cache_key},
    error::PresetResult,
};

use crate::filesystem::map_io_error;

#[derive(Debug, Clone)]
pub struct PresetCache {
    root: PathBuf,
}

impl PresetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<kind>/<key>[@<ref>]`.
    pub fn entry(&self, kind: SourceKind, key: &str, git_ref: Option<&str>) -> PathBuf {
        let mut name = encode_cache_key(key);
        if let Some(r) = git_ref {
            name.push('@');
            name.push_str(&encode_cache_key(r));
        }
        self.root.join(kind.as_str()).join(name)
    }

    /// Refresh `entry` by running `fetch` into a staging directory.
    ///
    /// `fetch` receives a path that does not exist yet.
    pub fn refresh<F>(&self, entry: &Path, fetch: F) -> PresetResult<PathBuf>
    where
        F: FnOnce(&Path) -> PresetResult<()>,
    {
        let parent = entry.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create cache directory"))?;

        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staging = parent.join(format!(".{}.{}.tmp", name, Uuid::new_v4()));

        if let Err(e) = fetch(&staging) {
            discard(&staging);
            return Err(e);
        }

        // Move the previous entry aside first; rename cannot replace a
        // non-empty directory.
        let previous = entry.exists().then(|| parent.join(format!(".{}.{}.old", name, Uuid::new_v4())));
        if let Some(old) = &previous {
            if let Err(e) = std::fs::rename(entry, old) {
                discard(&staging);
                return Err(map_io_error(entry, e, "replace cache entry"));
            }
        }

        if let Err(e) = std::fs::rename(&staging, entry) {
            discard(&staging);
            if let Some(old) = &previous {
                let _ = std::fs::rename(old, entry);
            }
            return Err(map_io_error(entry, e, "install cache entry"));
        }

        if let Some(old) = previous {
            discard(&old);
        }
        debug!(entry = %entry.display(), "Cache entry refreshed");
        Ok(entry.to_path_buf())
    }
}

fn discard(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_dir_all(path) {
            warn!(path = %path.display(), error = %e, "Could not remove stale cache directory");
        }
    }
}
