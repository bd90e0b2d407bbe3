//! Generic markup renderer with pluggable backend.

use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::block::{self, Block};
use crate::fence::FenceKind;
use crate::inline;
use crate::options::RenderOptions;
use crate::table::Table;
use crate::util::normalize_line_endings;

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered host markup.
    pub markup: String,
    /// Diagnostics for constructs that fell through as text
    /// (e.g., unterminated fences).
    pub warnings: Vec<String>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Recognition (fences, quotes, tables, lists, headings, rules, inline spans)
/// and the paragraph finishing pass are handled here; the [`RenderBackend`]
/// decides how each element is spelled.
///
/// Rendering is a pure function of the input and the options, so one
/// renderer can be shared freely between threads.
pub struct MarkdownRenderer<B: RenderBackend> {
    options: RenderOptions,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with explicit options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            _backend: PhantomData,
        }
    }

    /// Enable or disable inline table border styles.
    #[must_use]
    pub fn with_table_borders(mut self, enabled: bool) -> Self {
        self.options.table_borders = enabled;
        self
    }

    /// Enable or disable break elements between adjacent lines.
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.options.hard_breaks = enabled;
        self
    }

    /// Set the image scaling mode attribute.
    #[must_use]
    pub fn with_image_mode(mut self, mode: impl Into<String>) -> Self {
        self.options.image_mode = mode.into();
        self
    }

    /// Set the link target attribute (`None` omits it).
    #[must_use]
    pub fn with_link_target(mut self, target: Option<String>) -> Self {
        self.options.link_target = target;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render optional markdown text. `None` renders as empty output.
    pub fn render(&self, markdown: Option<&str>) -> RenderResult {
        markdown.map_or_else(RenderResult::default, |text| self.render_markdown(text))
    }

    /// Render markdown text.
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        if markdown.is_empty() {
            return RenderResult::default();
        }

        let normalized = normalize_line_endings(markdown);
        let scan = block::scan(&normalized);

        let mut markup = String::with_capacity(normalized.len() * 2);
        for chunk in scan.blocks.split(|block| matches!(block, Block::Blank)) {
            self.finish_chunk(chunk, &mut markup);
        }

        RenderResult {
            markup,
            warnings: scan.warnings,
        }
    }

    /// Render one blank-line-delimited chunk, wrapping it in a paragraph
    /// unless it starts with a block-level element.
    fn finish_chunk(&self, chunk: &[Block<'_>], out: &mut String) {
        let Some(first) = chunk.first() else {
            return;
        };

        let mut body = String::new();
        for (idx, block) in chunk.iter().enumerate() {
            // A list absorbs the line end before it.
            if idx > 0 && !matches!(block, Block::List { .. }) {
                self.line_break(&mut body);
            }
            self.block(block, &mut body);
        }

        let body = body.trim();
        if body.is_empty() {
            return;
        }
        if first.is_block_level() {
            out.push_str(body);
        } else {
            B::paragraph(body, out);
        }
    }

    fn line_break(&self, out: &mut String) {
        if self.options.hard_breaks {
            B::hard_break(out);
        } else {
            out.push('\n');
        }
    }

    fn inline(&self, text: &str) -> String {
        inline::convert::<B>(text, &self.options)
    }

    fn block(&self, block: &Block<'_>, out: &mut String) {
        match block {
            Block::Fence { kind, body } => match kind {
                FenceKind::Code(lang) => B::code_block(lang, body, out),
                FenceKind::Diagram => B::diagram(body, out),
                FenceKind::Chart(chart) => B::chart(*chart, body, out),
            },
            Block::Quote(lines) => self.blockquote(lines, out),
            Block::Table(table) => self.table(table, out),
            Block::List { ordered, items } => {
                B::list_start(*ordered, out);
                for item in items {
                    B::list_item(&self.inline(item), out);
                }
                B::list_end(*ordered, out);
            }
            Block::Heading { level, text } => B::heading(*level, &self.inline(text), out),
            Block::Rule => B::horizontal_rule(out),
            Block::Text(text) => out.push_str(&self.inline(text)),
            Block::Blank => {}
        }
    }

    fn blockquote(&self, lines: &[&str], out: &mut String) {
        let merged = lines.join("\n");
        B::blockquote_start(out);
        for (idx, line) in merged.trim().split('\n').enumerate() {
            if idx > 0 {
                self.line_break(out);
            }
            out.push_str(&self.inline(line));
        }
        B::blockquote_end(out);
    }

    fn table(&self, table: &Table<'_>, out: &mut String) {
        let bordered = self.options.table_borders;

        B::table_start(bordered, out);
        B::table_head_start(out);
        for (column, cell) in table.header.iter().enumerate() {
            B::table_cell(true, table.alignment(column), bordered, &self.inline(cell), out);
        }
        B::table_head_end(out);

        for row in &table.rows {
            B::table_row_start(out);
            for (column, cell) in row.iter().enumerate() {
                B::table_cell(false, table.alignment(column), bordered, &self.inline(cell), out);
            }
            B::table_row_end(out);
        }
        B::table_end(out);
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostBackend;
    use pretty_assertions::assert_eq;

    fn render_host(markdown: &str) -> String {
        MarkdownRenderer::<HostBackend>::new()
            .render_markdown(markdown)
            .markup
    }

    fn render_plain(markdown: &str) -> String {
        MarkdownRenderer::<HostBackend>::new()
            .with_table_borders(false)
            .render_markdown(markdown)
            .markup
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render_host("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_paragraphs_joined_without_separator() {
        assert_eq!(render_host("one\n\n\n\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        assert_eq!(render_host("a\nb\nc"), "<p>a<br/>b<br/>c</p>");
    }

    #[test]
    fn test_soft_breaks_option() {
        let result = MarkdownRenderer::<HostBackend>::new()
            .with_hard_breaks(false)
            .render_markdown("a\nb");
        assert_eq!(result.markup, "<p>a\nb</p>");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(render_host("a\r\nb\r\n\r\nc"), "<p>a<br/>b</p><p>c</p>");
    }

    #[test]
    fn test_heading_not_wrapped() {
        assert_eq!(render_host("## Section"), "<h2>Section</h2>");
    }

    #[test]
    fn test_heading_with_inline() {
        assert_eq!(
            render_host("# Install `npm`"),
            "<h1>Install <code>npm</code></h1>"
        );
    }

    #[test]
    fn test_heading_followed_by_text_in_same_chunk() {
        assert_eq!(render_host("# T\nbody"), "<h1>T</h1><br/>body");
    }

    #[test]
    fn test_text_followed_by_heading_is_wrapped() {
        assert_eq!(render_host("intro\n# T"), "<p>intro<br/><h1>T</h1></p>");
    }

    #[test]
    fn test_text_before_list_has_no_break() {
        assert_eq!(
            render_host("intro\n- a\n- b"),
            "<p>intro<ul><li>a</li><li>b</li></ul></p>"
        );
        assert_eq!(
            render_host("# T\n1. a\n2. b\nafter"),
            "<h1>T</h1><ol><li>a</li><li>b</li></ol><br/>after"
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            render_host("```rust\nfn main() {}\n```"),
            r#"<pre class="md-code"><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_default_language() {
        assert!(render_host("```\nplain\n```").contains(r#"class="language-text""#));
    }

    #[test]
    fn test_code_block_keeps_newlines_and_blank_lines() {
        let markup = render_host("```py\nif x:\n\n    y()\n```");
        assert_eq!(
            markup,
            r#"<pre class="md-code"><code class="language-py">if x:

    y()</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_body_is_opaque() {
        let markup = render_host("```md\n# Title\n- a\n- b\n**x**\n```");
        assert!(!markup.contains("<h1>"));
        assert!(!markup.contains("<ul>"));
        assert!(!markup.contains("<strong>"));
        assert!(markup.contains("**x**"));
    }

    #[test]
    fn test_diagram() {
        assert_eq!(
            render_host("```mermaid\n\ngraph TD\n  A-->B\n\n```"),
            "<view class=\"mermaid-block\"><text>graph TD\n  A-->B</text></view>"
        );
    }

    #[test]
    fn test_chart() {
        assert_eq!(
            render_host("```linechart\n[1,2]\n```"),
            r#"<chart type="linechart" data="&quot;[1,2]&quot;" />"#
        );
    }

    #[test]
    fn test_blockquote_merged() {
        assert_eq!(
            render_host("> first\n> *second*"),
            "<blockquote>first<br/><em>second</em></blockquote>"
        );
    }

    #[test]
    fn test_blockquote_body_trimmed() {
        assert_eq!(render_host(">   \n> x\n>"), "<blockquote>x</blockquote>");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            render_host("- x\n- **y**"),
            "<ul><li>x</li><li><strong>y</strong></li></ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            render_host("1. one\n2. two"),
            "<ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn test_single_marker_line_is_paragraph() {
        assert_eq!(render_host("- x"), "<p>- x</p>");
    }

    #[test]
    fn test_rule() {
        assert_eq!(
            render_host("above\n\n***\n\nbelow"),
            r#"<p>above</p><view class="hr"></view><p>below</p>"#
        );
    }

    #[test]
    fn test_table_plain() {
        assert_eq!(
            render_plain("| A | B |\n|---|--:|\n| 1 | 2 |\n| 3 |"),
            concat!(
                "<table><thead><tr><th>A</th>",
                r#"<th style="text-align: right;">B</th></tr></thead>"#,
                "<tbody><tr><td>1</td>",
                r#"<td style="text-align: right;">2</td></tr>"#,
                "<tr><td>3</td></tr></tbody></table>"
            )
        );
    }

    #[test]
    fn test_table_bordered_by_default() {
        let markup = render_host("|A|\n|-|\n|1|");
        assert!(markup.starts_with(
            r#"<table style="border: 1px solid #000; border-collapse: collapse;">"#
        ));
    }

    #[test]
    fn test_table_cells_inline_converted() {
        assert!(render_plain("|`a`|\n|-|\n|*b*|").contains("<td><em>b</em></td>"));
    }

    #[test]
    fn test_unterminated_fence_warning() {
        let result = MarkdownRenderer::<HostBackend>::new().render_markdown("```rust\nlet x;");
        assert_eq!(result.markup, "<p>```rust<br/>let x;</p>");
        assert_eq!(
            result.warnings,
            vec!["line 1: unterminated code fence, rendered as text".to_owned()]
        );
    }

    #[test]
    fn test_render_none_and_empty() {
        let renderer = MarkdownRenderer::<HostBackend>::default();
        assert_eq!(renderer.render(None), RenderResult::default());
        assert_eq!(renderer.render(Some("")).markup, "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(render_host("  \n\n \t\n"), "");
    }

    #[test]
    fn test_builder_options() {
        let renderer = MarkdownRenderer::<HostBackend>::new()
            .with_image_mode("aspectFit")
            .with_link_target(None);
        assert_eq!(renderer.options().image_mode, "aspectFit");
        assert_eq!(renderer.options().link_target, None);
        assert_eq!(
            renderer.render_markdown("![a](b)").markup,
            r#"<p><image alt="a" src="b" mode="aspectFit" /></p>"#
        );
    }
}
