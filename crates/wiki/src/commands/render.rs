//! `wiki render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use wiki_config::{CliSettings, Config};
use wiki_preview::{Preview, PreviewRenderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `PlantUML` server URL (overrides config).
    #[arg(long)]
    plantuml_url: Option<String>,

    /// `PlantUML` image format (overrides config).
    #[arg(long, value_parser = ["svg", "png"])]
    plantuml_format: Option<String>,

    /// Keep soft line breaks as plain newlines.
    #[arg(long)]
    no_breaks: bool,

    /// Disable tables, strikethrough, task lists and footnotes.
    #[arg(long)]
    no_gfm: bool,

    /// Enable verbose output (show render and diagram logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the file cannot be read or
    /// rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            plantuml_url: self.plantuml_url,
            plantuml_format: self.plantuml_format,
            breaks: self.no_breaks.then_some(false),
            gfm: self.no_gfm.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let preview = render_file(&config, &self.file)?;
        for warning in &preview.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(preview.html.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// Render a markdown file with the given configuration.
fn render_file(config: &Config, path: &Path) -> Result<Preview, CliError> {
    let markdown = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = markdown.len(), "Rendering markdown");
    Ok(PreviewRenderer::from_config(config).try_render(&markdown)?)
}
