//! `csb render` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::args::{EmbedArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to read (default: stdin).
    input: Option<PathBuf>,

    /// File to write the HTML to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub embed: EmbedArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or a link fails to embed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let embedder = self.embed.embedder()?;

        let markdown = read_input(self.input.as_deref())?;
        let html = embedder.render_html(&markdown)?;

        write_output(self.output.as_deref(), &html)
    }
}
