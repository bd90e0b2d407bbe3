//! `unimark fetch` command implementation.

use clap::{Args, ValueEnum};
use unimark_client::Method;
use unimark_config::CliSettings;

use super::{client, extract, load_config, parse_payload, print_result, renderer};
use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// HTTP method argument.
#[derive(Clone, Copy, Default, ValueEnum)]
enum MethodArg {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
            MethodArg::Put => Self::Put,
            MethodArg::Delete => Self::Delete,
        }
    }
}

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Endpoint URL, absolute or relative to the configured base URL.
    url: String,

    /// HTTP method.
    #[arg(short = 'X', long, value_enum, default_value_t)]
    method: MethodArg,

    /// JSON payload (query parameters for GET and DELETE, body otherwise).
    #[arg(short, long)]
    data: Option<String>,

    /// JSON pointer to the markdown string in the response (e.g. /data/content).
    #[arg(short, long)]
    pointer: Option<String>,

    /// Print the response body without rendering.
    #[arg(long)]
    raw: bool,

    /// Print the render result, including warnings, as JSON.
    #[arg(long, conflicts_with = "raw")]
    json: bool,
}

impl FetchArgs {
    /// Execute the fetch command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be read.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(global, CliSettings::default())?;
        let payload = parse_payload(self.data.as_deref())?;

        let body = client(&config.client).request(&self.url, payload.as_ref(), self.method.into())?;

        if self.raw {
            output.markup(&body)?;
            return Ok(());
        }

        let markdown = extract(&body, self.pointer.as_deref())?;
        let result = renderer(&config.render).render_markdown(&markdown);
        print_result(&output, &result, self.json)
    }
}
