//! Transform configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::consts::DEFAULT_PROTOCOL;
use crate::error::EmbedError;
use crate::rewrite::{DefaultIframe, IframeRenderer};

/// Embed widget options, ordered by key.
pub type EmbedOptions = BTreeMap<String, String>;

/// Default embed options: preview pane only, navigation bar hidden.
#[must_use]
pub fn default_embed_options() -> EmbedOptions {
    BTreeMap::from([
        ("hidenavigation".to_owned(), "1".to_owned()),
        ("view".to_owned(), "preview".to_owned()),
    ])
}

/// Configuration for one transform invocation (immutable after setup).
///
/// Create with [`EmbedConfig::new`], which validates the root directory, then
/// adjust with the builder methods.
#[derive(Clone)]
pub struct EmbedConfig {
    /// Canonical root directory that sentinel links are resolved against.
    root: PathBuf,
    /// Sentinel URL prefix.
    protocol: String,
    /// Default embed options, overridable per link.
    embed_options: EmbedOptions,
    /// Renders the final sandbox URL to markup.
    iframe: Arc<dyn IframeRenderer>,
}

impl EmbedConfig {
    /// Create a configuration rooted at `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::MissingDirectory`] for an empty path and
    /// [`EmbedError::DirectoryNotFound`] when the directory does not exist.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, EmbedError> {
        let directory = directory.as_ref();
        if directory.as_os_str().is_empty() {
            return Err(EmbedError::MissingDirectory);
        }
        if !directory.is_dir() {
            return Err(EmbedError::DirectoryNotFound(directory.to_path_buf()));
        }
        let root = directory
            .canonicalize()
            .map_err(|e| EmbedError::io(directory, e))?;

        Ok(Self {
            root,
            protocol: DEFAULT_PROTOCOL.to_owned(),
            embed_options: default_embed_options(),
            iframe: Arc::new(DefaultIframe),
        })
    }

    /// Set the sentinel protocol (default: `embedded-codesandbox://`).
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Replace the default embed options.
    #[must_use]
    pub fn embed_options(mut self, options: EmbedOptions) -> Self {
        self.embed_options = options;
        self
    }

    /// Set the iframe renderer (default: [`DefaultIframe`]).
    #[must_use]
    pub fn iframe(mut self, renderer: impl IframeRenderer + 'static) -> Self {
        self.iframe = Arc::new(renderer);
        self
    }

    /// Canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sentinel protocol prefix.
    #[must_use]
    pub fn protocol_prefix(&self) -> &str {
        &self.protocol
    }

    /// Default embed options.
    #[must_use]
    pub fn default_options(&self) -> &EmbedOptions {
        &self.embed_options
    }

    /// Iframe renderer.
    #[must_use]
    pub fn iframe_renderer(&self) -> &dyn IframeRenderer {
        self.iframe.as_ref()
    }
}

impl fmt::Debug for EmbedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedConfig")
            .field("root", &self.root)
            .field("protocol", &self.protocol)
            .field("embed_options", &self.embed_options)
            .finish_non_exhaustive()
    }
}
