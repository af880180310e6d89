//! CLI command implementations.

mod args;
pub(crate) mod decode;
pub(crate) mod render;
pub(crate) mod transform;
pub(crate) mod url;

pub(crate) use decode::DecodeArgs;
pub(crate) use render::RenderArgs;
pub(crate) use transform::TransformArgs;
pub(crate) use url::UrlArgs;
