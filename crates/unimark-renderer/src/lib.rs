//! Markdown to host component markup rewriting pipeline.
//!
//! This crate provides a generic [`MarkdownRenderer`] that rewrites a
//! constrained markdown dialect into markup for a rendering host via the
//! [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! Rendering runs in three stages:
//! - a line scanner groups the normalized input into blocks (fenced code,
//!   diagrams and charts, quotes, tables, lists, headings, rules, text)
//! - each block is spelled by the backend, with inline spans (images, links,
//!   code, strong, emphasis) converted inside running text
//! - blank-line-delimited chunks are trimmed and wrapped in paragraphs unless
//!   they open with a block-level element
//!
//! - [`HostBackend`]: Produces the host component vocabulary (`view`, `text`,
//!   `image`, `chart` and rich-text tags)
//!
//! Rendering never fails: malformed constructs fall through as text, and
//! unterminated fences are reported in [`RenderResult::warnings`].
//!
//! # Example
//!
//! ```
//! use unimark_renderer::{HostBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HostBackend>::new()
//!     .with_table_borders(false)
//!     .render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.markup, "<h1>Hello</h1><p><strong>Bold</strong> text</p>");
//! ```

mod backend;
mod block;
mod fence;
mod host;
mod inline;
mod options;
mod renderer;
mod table;
mod util;

pub use backend::RenderBackend;
pub use fence::{ChartKind, DEFAULT_LANGUAGE, FenceKind};
pub use host::HostBackend;
pub use options::{DEFAULT_IMAGE_MODE, DEFAULT_LINK_TARGET, RenderOptions};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use table::Alignment;
pub use util::escape_html;

/// Render markdown with the host backend and default options.
///
/// `None` and empty input both render as an empty string.
///
/// ```
/// assert_eq!(unimark_renderer::render(Some("*hi*")), "<p><em>hi</em></p>");
/// assert_eq!(unimark_renderer::render(None), "");
/// ```
#[must_use]
pub fn render(markdown: Option<&str>) -> String {
    MarkdownRenderer::<HostBackend>::new().render(markdown).markup
}
