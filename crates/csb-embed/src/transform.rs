//! Document tree transform.
//!
//! [`SandboxEmbedder`] walks an mdast tree and replaces every sentinel link
//! with an embedded sandbox. The input tree is never modified; a new tree is
//! returned, so a failed transform leaves the caller's tree intact.

use serde_json::Value;

use crate::config::EmbedConfig;
use crate::consts::LINK_NODE_TYPE;
use crate::error::EmbedError;
use crate::link::SandboxLink;
use crate::manifest::resolve_manifest;
use crate::node::Node;
use crate::payload::Payload;
use crate::rewrite::{embed_node, merge_options, sandbox_url};
use crate::walker::read_files;

/// Replaces sentinel links with embedded CodeSandbox iframes.
///
/// # Example
///
/// ```no_run
/// use csb_embed::{EmbedConfig, Node, SandboxEmbedder};
///
/// let embedder = SandboxEmbedder::new(EmbedConfig::new("examples")?);
/// let tree = Node::parent(
///     "paragraph",
///     vec![Node::link("embedded-codesandbox://counter", vec![])],
/// );
///
/// let embedded = embedder.transform(&tree)?;
/// assert_eq!(embedded.children.unwrap()[0].kind, "html");
/// # Ok::<(), csb_embed::EmbedError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SandboxEmbedder {
    config: EmbedConfig,
}

impl SandboxEmbedder {
    /// Create an embedder from a validated configuration.
    #[must_use]
    pub fn new(config: EmbedConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Whether `url` uses the sentinel protocol.
    #[must_use]
    pub fn is_sandbox_url(&self, url: &str) -> bool {
        url.starts_with(self.config.protocol_prefix())
    }

    /// Whether `node` is a link to embed.
    #[must_use]
    pub fn is_sandbox_link(&self, node: &Node) -> bool {
        node.kind == LINK_NODE_TYPE && node.url.as_deref().is_some_and(|u| self.is_sandbox_url(u))
    }

    /// Return a copy of `tree` with every sentinel link embedded.
    ///
    /// Nodes are visited in document order. Replaced links are not descended
    /// into; all other nodes are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error met while embedding a link. Nothing after it
    /// is processed.
    pub fn transform(&self, tree: &Node) -> Result<Node, EmbedError> {
        if self.is_sandbox_link(tree) {
            let url = tree.url.as_deref().unwrap_or_default();
            return Ok(embed_node(tree, self.render_link(url)?));
        }

        let children = tree
            .children
            .as_ref()
            .map(|children| {
                children
                    .iter()
                    .map(|child| self.transform(child))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Node {
            children,
            ..tree.clone_without_children()
        })
    }

    /// Transform a tree given as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Json`] if `tree` is not an mdast node, or any
    /// error from [`transform`](Self::transform).
    pub fn transform_value(&self, tree: Value) -> Result<Value, EmbedError> {
        let tree: Node = serde_json::from_value(tree)?;
        Ok(serde_json::to_value(self.transform(&tree)?)?)
    }

    /// Build the sandbox URL for one sentinel link.
    ///
    /// Resolves the example directory, bundles its files with the nearest
    /// manifest and merges the link's options over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::OutsideRoot`] for links escaping the root, and
    /// I/O or manifest errors from reading the example.
    pub fn sandbox_url(&self, url: &str) -> Result<String, EmbedError> {
        let link = SandboxLink::parse(url, self.config.protocol_prefix());
        let root = self.config.root();
        let dir = link.directory(root)?;

        let files = read_files(&dir)?;
        let manifest = resolve_manifest(&dir, root)?;
        tracing::debug!(
            link = url,
            dir = %dir.display(),
            files = files.len(),
            "Embedding sandbox"
        );

        let parameters = Payload::from_entries(files, &manifest)?.encode()?;
        let options = merge_options(self.config.default_options(), &link.query);
        Ok(sandbox_url(&parameters, &options))
    }

    /// Render the embed markup for one sentinel link.
    ///
    /// # Errors
    ///
    /// See [`sandbox_url`](Self::sandbox_url).
    pub fn render_link(&self, url: &str) -> Result<String, EmbedError> {
        let sandbox_url = self.sandbox_url(url)?;
        Ok(self.config.iframe_renderer().render(&sandbox_url))
    }
}

/// Embed sentinel links in `tree` using `config`.
///
/// Shorthand for `SandboxEmbedder::new(config.clone()).transform(tree)`.
///
/// # Errors
///
/// See [`SandboxEmbedder::transform`].
pub fn transform(tree: &Node, config: &EmbedConfig) -> Result<Node, EmbedError> {
    SandboxEmbedder::new(config.clone()).transform(tree)
}
