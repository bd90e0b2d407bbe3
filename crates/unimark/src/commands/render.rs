//! `unimark render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use unimark_config::CliSettings;

use super::{load_config, print_result, renderer};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    file: Option<PathBuf>,

    /// Render tables without inline border styles.
    #[arg(long)]
    no_borders: bool,

    /// Keep single line breaks as newlines instead of break elements.
    #[arg(long)]
    soft_breaks: bool,

    /// Print the result, including warnings, as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the config is invalid.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            table_borders: self.no_borders.then_some(false),
            hard_breaks: self.soft_breaks.then_some(false),
            ..Default::default()
        };
        let config = load_config(global, settings)?;

        let markdown = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };

        let result = renderer(&config.render).render_markdown(&markdown);
        tracing::info!(
            bytes = markdown.len(),
            warnings = result.warnings.len(),
            "Rendered markdown"
        );
        print_result(&output, &result, self.json)
    }
}
