//! Constants shared across the embedding pipeline.

/// Default sentinel protocol marking links to embed.
pub const DEFAULT_PROTOCOL: &str = "embedded-codesandbox://";

/// CodeSandbox endpoint that defines a sandbox from a `parameters` payload.
pub const SANDBOX_DEFINE_URL: &str = "https://codesandbox.io/api/v1/sandboxes/define";

/// Package manifest filename required by CodeSandbox.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Manifest content used when no `package.json` exists up to the root.
pub(crate) const FALLBACK_MANIFEST: &str = r#"{ "name": "example" }"#;

/// Node type of links in an mdast tree.
pub(crate) const LINK_NODE_TYPE: &str = "link";

/// Node type of raw markup in an mdast tree.
pub(crate) const HTML_NODE_TYPE: &str = "html";
