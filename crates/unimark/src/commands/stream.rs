//! `unimark stream` command implementation.

use std::time::Duration;

use clap::Args;
use unimark_client::StreamEvent;
use unimark_config::CliSettings;
use unimark_renderer::{HostBackend, MarkdownRenderer};
use unimark_timing::Throttle;

use super::{client, extract, load_config, parse_payload, print_result, renderer};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stream command.
#[derive(Args)]
pub(crate) struct StreamArgs {
    /// Endpoint URL, absolute or relative to the configured base URL.
    url: String,

    /// JSON request body.
    #[arg(short, long, default_value = "{}")]
    data: String,

    /// JSON pointer to the markdown fragment in each frame payload.
    #[arg(short, long)]
    pointer: Option<String>,

    /// Minimum interval between intermediate renders, in milliseconds.
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,

    /// Print intermediate renders as the stream grows.
    #[arg(long)]
    live: bool,

    /// Print the final render result, including warnings, as JSON.
    #[arg(long)]
    json: bool,
}

impl StreamArgs {
    /// Execute the stream command.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be opened or fails mid-way.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(global, CliSettings::default())?;
        let payload = parse_payload(Some(self.data.as_str()))?.unwrap_or_default();
        let renderer = renderer(&config.render);

        let events = client(&config.client).stream(&self.url, &payload)?;
        let preview = Preview {
            renderer: &renderer,
            output: &output,
            throttle: Throttle::new(Duration::from_millis(self.interval_ms)),
            live: self.live,
        };

        let mut markdown = String::new();
        let mut messages = 0usize;
        let mut completed = false;

        for event in events {
            match event? {
                StreamEvent::Message(fragment) => {
                    markdown.push_str(&extract(&fragment, self.pointer.as_deref())?);
                    messages += 1;
                    preview.update(&markdown)?;
                }
                StreamEvent::Done => completed = true,
            }
        }

        if completed {
            output.success(&format!("Stream completed ({messages} messages)"));
        } else {
            output.warning(&format!(
                "Stream ended without completion marker ({messages} messages)"
            ));
        }

        let result = renderer.render_markdown(&markdown);
        print_result(&output, &result, self.json)
    }
}

/// Throttled intermediate rendering.
struct Preview<'a> {
    renderer: &'a MarkdownRenderer<HostBackend>,
    output: &'a Output,
    throttle: Throttle<()>,
    live: bool,
}

impl Preview<'_> {
    /// Re-render if the throttle lets this update (or a pending one) through.
    fn update(&self, markdown: &str) -> Result<(), CliError> {
        let due = self.throttle.drain_ready().is_some() || self.throttle.call(()).is_some();
        if !due {
            return Ok(());
        }

        let result = self.renderer.render_markdown(markdown);
        tracing::info!(
            bytes = markdown.len(),
            markup_bytes = result.markup.len(),
            "Intermediate render"
        );
        if self.live {
            self.output.markup(&result.markup)?;
        }
        Ok(())
    }
}
