//! `csb transform` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::args::{EmbedArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the transform command.
#[derive(Args)]
pub(crate) struct TransformArgs {
    /// mdast JSON file to read (default: stdin).
    input: Option<PathBuf>,

    /// File to write the transformed tree to (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    pub embed: EmbedArgs,
}

impl TransformArgs {
    /// Execute the transform command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an mdast tree or a link fails to embed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let embedder = self.embed.embedder()?;

        let tree = serde_json::from_str(&read_input(self.input.as_deref())?)?;
        let transformed = embedder.transform_value(tree)?;

        let mut json = if self.pretty {
            serde_json::to_string_pretty(&transformed)?
        } else {
            serde_json::to_string(&transformed)?
        };
        json.push('\n');
        write_output(self.output.as_deref(), &json)
    }
}
