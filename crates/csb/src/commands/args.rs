//! Arguments and I/O helpers shared by the embedding commands.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use csb_config::{CliSettings, Config, EmbedSettings};
use csb_embed::{EmbedConfig, EmbedError, SandboxEmbedder, TemplateIframe};

use crate::error::CliError;
use crate::output::Output;

/// Options for locating examples and building the embedder.
#[derive(Args)]
pub(crate) struct EmbedArgs {
    /// Path to configuration file (default: auto-discover csb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Examples root directory (overrides config).
    #[arg(short, long, env = "CSB_DIRECTORY")]
    directory: Option<PathBuf>,

    /// Sentinel protocol marking links to embed (overrides config).
    #[arg(long)]
    protocol: Option<String>,

    /// Enable verbose output (log every embedded link).
    #[arg(short, long)]
    pub verbose: bool,
}

impl EmbedArgs {
    /// Load configuration and build the embedder.
    pub(crate) fn embedder(&self) -> Result<SandboxEmbedder, CliError> {
        let cli_settings = CliSettings {
            directory: self.directory.clone(),
            protocol: self.protocol.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        Ok(SandboxEmbedder::new(embed_config(&config.embed_resolved)?))
    }
}

/// Convert resolved settings into a validated [`EmbedConfig`].
pub(crate) fn embed_config(settings: &EmbedSettings) -> Result<EmbedConfig, CliError> {
    let directory = settings
        .directory
        .as_deref()
        .ok_or(EmbedError::MissingDirectory)?;

    let mut config = EmbedConfig::new(directory)?.protocol(settings.protocol.clone());
    if let Some(options) = &settings.options {
        config = config.embed_options(options.clone());
    }
    if let Some(template) = &settings.iframe_template {
        config = config.iframe(TemplateIframe::new(template.clone()));
    }
    Ok(config)
}

/// Read from `path`, or stdin when absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Write to `path`, or stdout when absent.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        fs::write(path, content)?;
        Output::new().success(&format!("Wrote {}", path.display()));
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_embed_config_requires_directory() {
        let err = embed_config(&EmbedSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::Embed(EmbedError::MissingDirectory)));
    }

    #[test]
    fn test_embed_config_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let settings = EmbedSettings {
            directory: Some(temp.path().join("missing")),
            ..EmbedSettings::default()
        };

        let err = embed_config(&settings).unwrap_err();

        assert!(matches!(
            err,
            CliError::Embed(EmbedError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_embed_config_applies_settings() {
        let temp = tempfile::tempdir().unwrap();
        let options = BTreeMap::from([("view".to_owned(), "split".to_owned())]);
        let settings = EmbedSettings {
            directory: Some(temp.path().to_path_buf()),
            protocol: "demo://".to_owned(),
            iframe_template: Some("<x src=\"{url}\">".to_owned()),
            options: Some(options.clone()),
        };

        let config = embed_config(&settings).unwrap();

        assert_eq!(config.protocol_prefix(), "demo://");
        assert_eq!(config.default_options(), &options);
        assert_eq!(config.iframe_renderer().render("u"), "<x src=\"u\">");
    }

    #[test]
    fn test_read_input_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("doc.md");
        fs::write(&path, "# Title\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "# Title\n");
    }
}
