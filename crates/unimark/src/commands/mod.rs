//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod render;
pub(crate) mod stream;

pub(crate) use fetch::FetchArgs;
pub(crate) use render::RenderArgs;
pub(crate) use stream::StreamArgs;

use serde_json::Value;
use unimark_client::{AuthToken, Client};
use unimark_config::{CliSettings, ClientConfig, Config, RenderConfig};
use unimark_renderer::{HostBackend, MarkdownRenderer, RenderResult};

use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Load configuration with global and command-specific overrides applied.
fn load_config(global: &GlobalArgs, settings: CliSettings) -> Result<Config, CliError> {
    let settings = CliSettings {
        base_url: global.base_url.clone(),
        token: global.token.clone(),
        ..settings
    };
    Ok(Config::load(global.config.as_deref(), Some(&settings))?)
}

/// Build a renderer from the `[render]` section.
fn renderer(config: &RenderConfig) -> MarkdownRenderer<HostBackend> {
    MarkdownRenderer::with_options(config.options())
}

/// Build an HTTP client from the `[client]` section.
fn client(config: &ClientConfig) -> Client {
    let client = Client::new(config.timeout())
        .with_token(config.token.as_deref().and_then(AuthToken::new));
    match &config.base_url {
        Some(base_url) => client.with_base_url(base_url),
        None => client,
    }
}

/// Parse a `--data` argument as JSON.
fn parse_payload(data: Option<&str>) -> Result<Option<Value>, CliError> {
    data.map(serde_json::from_str).transpose().map_err(Into::into)
}

/// Select the markdown text out of a response body.
///
/// Without a pointer the body is the markdown. With one, the body is parsed
/// as JSON and the string at the pointer (e.g. `/data/content`) is used.
fn extract(body: &str, pointer: Option<&str>) -> Result<String, CliError> {
    let Some(pointer) = pointer else {
        return Ok(body.to_owned());
    };

    let value: Value = serde_json::from_str(body)?;
    match value.pointer(pointer) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) => Ok(String::new()),
        Some(_) => Err(CliError::Validation(format!(
            "value at {pointer} is not a string"
        ))),
        None => Err(CliError::Validation(format!("no value at {pointer}"))),
    }
}

/// Print a render result: markup (or JSON) to stdout, warnings to stderr.
fn print_result(output: &Output, result: &RenderResult, json: bool) -> Result<(), CliError> {
    for warning in &result.warnings {
        output.warning(&format!("Warning: {warning}"));
    }
    if json {
        output.markup(&serde_json::to_string_pretty(result)?)?;
    } else {
        output.markup(&result.markup)?;
    }
    Ok(())
}
