//! Render backend trait for format-specific output.

use crate::fence::ChartKind;
use crate::table::Alignment;

/// Backend that writes target-format markup.
///
/// The generic [`MarkdownRenderer`](crate::MarkdownRenderer) recognizes
/// constructs and decides what goes where; backends only decide how each
/// element is spelled. All methods append to `out`.
///
/// Content arguments named `content` are already-rendered markup and must be
/// written verbatim. Arguments named `source`, `code`, `src`, `alt` or `href`
/// are raw text and the backend decides how to escape them.
pub trait RenderBackend {
    /// Paragraph wrapping a chunk of inline content.
    fn paragraph(content: &str, out: &mut String);

    /// Heading with a level between 1 and 6.
    fn heading(level: u8, content: &str, out: &mut String);

    /// Explicit line break between adjacent lines of one chunk.
    fn hard_break(out: &mut String);

    /// Thematic break.
    fn horizontal_rule(out: &mut String);

    /// Generic fenced code block. `lang` is never empty.
    fn code_block(lang: &str, code: &str, out: &mut String);

    /// Diagram source block (mermaid).
    fn diagram(source: &str, out: &mut String);

    /// Chart element whose data is the chart source.
    fn chart(kind: ChartKind, source: &str, out: &mut String);

    fn blockquote_start(out: &mut String);
    fn blockquote_end(out: &mut String);

    fn list_start(ordered: bool, out: &mut String);
    fn list_item(content: &str, out: &mut String);
    fn list_end(ordered: bool, out: &mut String);

    /// Open a table. `bordered` requests inline border styling.
    fn table_start(bordered: bool, out: &mut String);
    fn table_head_start(out: &mut String);
    fn table_head_end(out: &mut String);
    fn table_row_start(out: &mut String);
    fn table_row_end(out: &mut String);
    fn table_cell(head: bool, alignment: Alignment, bordered: bool, content: &str, out: &mut String);
    fn table_end(out: &mut String);

    /// Inline image. `mode` is the host's image scaling mode.
    fn image(src: &str, alt: &str, mode: &str, out: &mut String);

    /// Hyperlink. `target` of `None` omits the target attribute.
    fn link(href: &str, target: Option<&str>, content: &str, out: &mut String);

    fn inline_code(code: &str, out: &mut String);
    fn strong(content: &str, out: &mut String);
    fn emphasis(content: &str, out: &mut String);
}
