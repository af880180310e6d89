//! Embed runnable CodeSandbox examples into markdown documents.
//!
//! Links written with a sentinel protocol such as
//! `[demo](embedded-codesandbox://counter?view=split)` are resolved to a
//! directory below a configured root. The directory's files are bundled into
//! a compressed payload and the link is replaced by an iframe pointing at the
//! CodeSandbox "define" API.
//!
//! # Architecture
//!
//! - [`walker`]: recursive file listing relative to the example directory
//! - [`manifest`]: upward `package.json` lookup with a fallback at the root
//! - [`payload`]: payload structure and the URL-safe LZ-string codec
//! - [`link`]: sentinel URL parsing and directory resolution
//! - [`rewrite`]: embed options, sandbox URL and iframe rendering
//! - [`transform`]: [`SandboxEmbedder`], the mdast tree walker
//! - [`markdown`]: the same rewrite applied to pulldown-cmark events
//!
//! # Example
//!
//! ```no_run
//! use csb_embed::{EmbedConfig, Node, SandboxEmbedder};
//!
//! let config = EmbedConfig::new("docs/examples")?;
//! let embedder = SandboxEmbedder::new(config);
//!
//! let tree: Node = serde_json::from_str(r#"{"type": "root", "children": []}"#)?;
//! let embedded = embedder.transform(&tree)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod consts;
mod error;
pub mod link;
pub mod manifest;
pub mod markdown;
mod node;
pub mod payload;
pub mod rewrite;
pub mod transform;
pub mod walker;

pub use config::{EmbedConfig, EmbedOptions, default_embed_options};
pub use consts::{DEFAULT_PROTOCOL, MANIFEST_FILENAME, SANDBOX_DEFINE_URL};
pub use error::EmbedError;
pub use link::{LinkQuery, SandboxLink};
pub use node::Node;
pub use payload::Payload;
pub use rewrite::{DefaultIframe, IframeRenderer, TemplateIframe};
pub use transform::SandboxEmbedder;
