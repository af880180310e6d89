//! `csb decode` command implementation.

use clap::Args;
use csb_embed::Payload;

use super::args::write_output;
use crate::error::CliError;

/// Arguments for the decode command.
#[derive(Args)]
pub(crate) struct DecodeArgs {
    /// Encoded `parameters` value, or a full sandbox URL.
    parameters: String,
}

impl DecodeArgs {
    /// Execute the decode command.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a compressed payload.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let payload = decode(&self.parameters)?;
        let mut json = serde_json::to_string_pretty(&payload)?;
        json.push('\n');
        write_output(None, &json)
    }
}

/// Decode a `parameters` value, accepting a full sandbox URL as well.
fn decode(value: &str) -> Result<Payload, CliError> {
    let parameters = value
        .split_once('?')
        .map_or(value, |(_, query)| {
            query
                .split('&')
                .find_map(|pair| pair.strip_prefix("parameters="))
                .unwrap_or_default()
        });

    Payload::decode(parameters)?
        .ok_or_else(|| CliError::Validation("Value is not a valid compressed payload".to_owned()))
}
