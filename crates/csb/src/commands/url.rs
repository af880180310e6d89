//! `csb url` command implementation.

use clap::Args;
use csb_embed::SandboxEmbedder;

use super::args::{EmbedArgs, write_output};
use crate::error::CliError;

/// Arguments for the url command.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Sentinel link, e.g. `embedded-codesandbox://react/counter?view=split`.
    ///
    /// A bare path is prefixed with the configured protocol.
    link: String,

    /// Print the rendered iframe markup instead of the URL.
    #[arg(long)]
    iframe: bool,

    #[command(flatten)]
    pub embed: EmbedArgs,
}

impl UrlArgs {
    /// Execute the url command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the link fails to embed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let embedder = self.embed.embedder()?;

        let mut rendered = render(&embedder, &self.link, self.iframe)?;
        rendered.push('\n');
        write_output(None, &rendered)
    }
}

/// Prefix a bare path with the protocol, then render its URL or iframe.
fn render(embedder: &SandboxEmbedder, link: &str, iframe: bool) -> Result<String, CliError> {
    let link = if embedder.is_sandbox_url(link) {
        link.to_owned()
    } else {
        format!("{}{link}", embedder.config().protocol_prefix())
    };

    let rendered = if iframe {
        embedder.render_link(&link)?
    } else {
        embedder.sandbox_url(&link)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csb_embed::{EmbedConfig, SANDBOX_DEFINE_URL};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn embedder(root: &std::path::Path, protocol: &str) -> SandboxEmbedder {
        fs::create_dir_all(root.join("react/counter")).unwrap();
        fs::write(root.join("react/counter/index.js"), "export default 1;\n").unwrap();
        SandboxEmbedder::new(EmbedConfig::new(root).unwrap().protocol(protocol))
    }

    #[test]
    fn test_bare_path_gets_protocol() {
        let temp = tempfile::tempdir().unwrap();
        let embedder = embedder(temp.path(), "embedded-codesandbox://");

        let bare = render(&embedder, "react/counter?view=split", false).unwrap();
        let full = render(
            &embedder,
            "embedded-codesandbox://react/counter?view=split",
            false,
        )
        .unwrap();

        assert_eq!(bare, full);
        assert!(bare.starts_with(SANDBOX_DEFINE_URL));
        assert!(bare.ends_with("&query=hidenavigation%3D1%26view%3Dsplit"));
    }

    #[test]
    fn test_bare_path_uses_configured_protocol() {
        let temp = tempfile::tempdir().unwrap();
        let embedder = embedder(temp.path(), "demo://");

        let bare = render(&embedder, "react/counter", false).unwrap();

        assert_eq!(bare, render(&embedder, "demo://react/counter", false).unwrap());
    }

    #[test]
    fn test_iframe_wraps_url() {
        let temp = tempfile::tempdir().unwrap();
        let embedder = embedder(temp.path(), "embedded-codesandbox://");

        let url = render(&embedder, "react/counter", false).unwrap();
        let iframe = render(&embedder, "react/counter", true).unwrap();

        assert!(iframe.starts_with(&format!(r#"<iframe src="{url}" class="embedded-codesandbox""#)));
        assert!(iframe.ends_with("</iframe>"));
    }

    #[test]
    fn test_missing_example_fails() {
        let temp = tempfile::tempdir().unwrap();
        let embedder = embedder(temp.path(), "embedded-codesandbox://");

        let err = render(&embedder, "react/missing", false).unwrap_err();

        assert!(matches!(err, CliError::Embed(_)));
    }
}
