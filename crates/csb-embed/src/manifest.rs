//! Upward `package.json` discovery.
//!
//! CodeSandbox needs a manifest to know how to run an example. Examples often
//! share one manifest further up the tree, so the lookup walks from the
//! example directory towards the root and falls back to a minimal manifest
//! when none is found.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{FALLBACK_MANIFEST, MANIFEST_FILENAME};
use crate::error::EmbedError;
use crate::walker::read_text;

/// Where the manifest for an example came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A `package.json` found on disk.
    File {
        /// Path of the manifest.
        path: PathBuf,
        /// Raw manifest text.
        content: String,
    },
    /// No manifest up to and including the root; use the built-in default.
    Fallback,
}

impl ManifestSource {
    /// Raw manifest text.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::File { content, .. } => content,
            Self::Fallback => FALLBACK_MANIFEST,
        }
    }

    /// Location used in error messages.
    #[must_use]
    pub fn location(&self) -> PathBuf {
        match self {
            Self::File { path, .. } => path.clone(),
            Self::Fallback => PathBuf::from(format!("<default {MANIFEST_FILENAME}>")),
        }
    }
}

/// Find the manifest for the example directory `start`.
///
/// Checks `start` and each ancestor up to and including `root`. Both paths
/// must be absolute and normalized. The search never leaves `root`.
///
/// # Errors
///
/// Returns [`EmbedError::Io`] if a directory cannot be listed or the manifest
/// cannot be read, and [`EmbedError::OutsideRoot`] if `start` is not inside
/// `root`.
pub fn resolve_manifest(start: &Path, root: &Path) -> Result<ManifestSource, EmbedError> {
    if !start.starts_with(root) {
        return Err(EmbedError::OutsideRoot {
            link: start.display().to_string(),
        });
    }

    let mut current = start;
    loop {
        tracing::trace!(dir = %current.display(), "Looking for manifest");
        if contains_manifest(current)? {
            let path = current.join(MANIFEST_FILENAME);
            let content = read_text(&path)?;
            return Ok(ManifestSource::File { path, content });
        }
        if current == root {
            tracing::debug!(dir = %start.display(), "No manifest found, using default");
            return Ok(ManifestSource::Fallback);
        }
        // `start` is inside `root`, so every parent up to `root` exists.
        current = current.parent().ok_or_else(|| EmbedError::OutsideRoot {
            link: start.display().to_string(),
        })?;
    }
}

/// Whether `dir` has an entry named `package.json`.
fn contains_manifest(dir: &Path) -> Result<bool, EmbedError> {
    let entries = fs::read_dir(dir).map_err(|e| EmbedError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| EmbedError::io(dir, e))?;
        if entry.file_name() == MANIFEST_FILENAME {
            return Ok(true);
        }
    }
    Ok(false)
}
