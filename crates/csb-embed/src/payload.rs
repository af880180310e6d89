//! Sandbox payload and its URL-safe encoding.
//!
//! The payload is the `parameters` value of the CodeSandbox define API:
//! JSON of the form `{"files": {"<path>": {"content": ...}}}`, compressed
//! with LZ-string into base64 and made URL-safe by replacing `+` with `-`,
//! `/` with `_` and dropping trailing `=`. CodeSandbox decodes exactly this
//! format, so it must not change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::MANIFEST_FILENAME;
use crate::error::EmbedError;
use crate::manifest::ManifestSource;
use crate::walker::FileEntry;

/// A single file in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadFile {
    /// Parsed JSON for the manifest, the raw string for every other file.
    pub content: Value,
}

/// Files of one sandbox, keyed by relative path.
///
/// Keys are kept in sorted order so serialization is canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Files by relative path.
    pub files: BTreeMap<String, PayloadFile>,
}

impl Payload {
    /// Build a payload from example files and the resolved manifest.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Manifest`] if the manifest is not valid JSON.
    pub fn from_entries(
        entries: Vec<FileEntry>,
        manifest: &ManifestSource,
    ) -> Result<Self, EmbedError> {
        let mut files: BTreeMap<String, PayloadFile> = entries
            .into_iter()
            .map(|entry| {
                let file = PayloadFile {
                    content: Value::String(entry.content),
                };
                (entry.name, file)
            })
            .collect();

        let content =
            serde_json::from_str(manifest.content()).map_err(|source| EmbedError::Manifest {
                path: manifest.location(),
                source,
            })?;
        files.insert(MANIFEST_FILENAME.to_owned(), PayloadFile { content });

        Ok(Self { files })
    }

    /// Serialize and compress into a `parameters` value.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Json`] if serialization fails.
    pub fn encode(&self) -> Result<String, EmbedError> {
        let json = serde_json::to_string(self)?;
        Ok(compress(&json))
    }

    /// Decode a `parameters` value produced by [`encode`](Self::encode).
    ///
    /// Returns `None` if the value does not decompress.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Json`] if the decompressed text is not a payload.
    pub fn decode(encoded: &str) -> Result<Option<Self>, EmbedError> {
        decompress(encoded)
            .map(|json| serde_json::from_str::<Self>(&json))
            .transpose()
            .map_err(EmbedError::from)
    }
}

/// Compress `input` into URL-safe LZ-string base64.
#[must_use]
pub fn compress(input: &str) -> String {
    let mut encoded: String = lz_str::compress_to_base64(input)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let trimmed = encoded.trim_end_matches('=').len();
    encoded.truncate(trimmed);
    encoded
}

/// Reverse [`compress`].
///
/// Returns `None` if `encoded` is not a valid compressed string.
#[must_use]
pub fn decompress(encoded: &str) -> Option<String> {
    let mut standard: String = encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    let wide = lz_str::decompress_from_base64(standard.as_str())?;
    String::from_utf16(&wide).ok()
}
