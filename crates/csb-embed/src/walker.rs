//! Recursive listing of an example directory.
//!
//! Paths are reported relative to the example directory with `/` separators,
//! which is how CodeSandbox expects file names in the payload.

use std::fs;
use std::path::Path;

use crate::consts::MANIFEST_FILENAME;
use crate::error::EmbedError;

/// A file bundled into the sandbox payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the example directory (e.g. `src/index.js`).
    pub name: String,
    /// File content, decoded as UTF-8 (invalid sequences replaced).
    pub content: String,
}

/// List all files below `dir`, relative to `dir`.
///
/// Recurses without a depth limit. Directory detection uses the entry's own
/// file type, so symlinks are listed as files. Entries are sorted by name
/// within each directory.
///
/// # Errors
///
/// Returns [`EmbedError::Io`] if any directory cannot be listed.
pub fn collect_files(dir: &Path) -> Result<Vec<String>, EmbedError> {
    let mut files = Vec::new();
    collect_into(dir, "", &mut files)?;
    Ok(files)
}

fn collect_into(dir: &Path, prefix: &str, files: &mut Vec<String>) -> Result<(), EmbedError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|e| EmbedError::io(dir, e))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| EmbedError::io(&path, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        if file_type.is_dir() {
            collect_into(&path, &relative, files)?;
        } else {
            files.push(relative);
        }
    }
    Ok(())
}

/// Read every file below `dir` except the top-level manifest.
///
/// The manifest is contributed separately by
/// [`resolve_manifest`](crate::manifest::resolve_manifest), so a stale or
/// duplicate `package.json` entry can never appear in the payload.
///
/// # Errors
///
/// Returns [`EmbedError::Io`] if listing or reading fails.
pub fn read_files(dir: &Path) -> Result<Vec<FileEntry>, EmbedError> {
    collect_files(dir)?
        .into_iter()
        .filter(|name| name != MANIFEST_FILENAME)
        .map(|name| {
            let path = dir.join(&name);
            let content = read_text(&path)?;
            Ok(FileEntry { name, content })
        })
        .collect()
}

/// Read a file as text, replacing invalid UTF-8.
pub(crate) fn read_text(path: &Path) -> Result<String, EmbedError> {
    let bytes = fs::read(path).map_err(|e| EmbedError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
