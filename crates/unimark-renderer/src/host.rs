//! Host component markup backend.
//!
//! Produces the fixed element vocabulary understood by the mini-program
//! rendering host: `view`/`text` containers, `image`, `chart`, plus the small
//! set of HTML-like tags its rich-text component accepts.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::fence::ChartKind;
use crate::table::Alignment;
use crate::util::escape_html;

const TABLE_STYLE: &str = "border: 1px solid #000; border-collapse: collapse;";
const CELL_STYLE: &str = "border: 1px solid #000; padding: 5px;";
/// Cell alignment used by bordered tables when the column sets none.
const DEFAULT_CELL_ALIGN: &str = "center";

/// Host markup render backend.
///
/// Produces:
/// - `<pre class="md-code"><code class="language-*">` for code blocks
/// - `<view class="mermaid-block"><text>` for mermaid diagrams
/// - `<chart type=".." data=".." />` for charts
/// - `<image mode="widthFix" />` for images
pub struct HostBackend;

impl RenderBackend for HostBackend {
    fn paragraph(content: &str, out: &mut String) {
        write!(out, "<p>{content}</p>").unwrap();
    }

    fn heading(level: u8, content: &str, out: &mut String) {
        write!(out, "<h{level}>{content}</h{level}>").unwrap();
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br/>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str(r#"<view class="hr"></view>"#);
    }

    fn code_block(lang: &str, code: &str, out: &mut String) {
        write!(
            out,
            r#"<pre class="md-code"><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(code)
        )
        .unwrap();
    }

    fn diagram(source: &str, out: &mut String) {
        write!(out, r#"<view class="mermaid-block"><text>{source}</text></view>"#).unwrap();
    }

    fn chart(kind: ChartKind, source: &str, out: &mut String) {
        let data = serde_json::to_string(source).expect("string serialization cannot fail");
        write!(
            out,
            r#"<chart type="{}" data="{}" />"#,
            kind.as_str(),
            escape_html(&data)
        )
        .unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn list_start(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "<ol>" } else { "<ul>" });
    }

    fn list_item(content: &str, out: &mut String) {
        write!(out, "<li>{content}</li>").unwrap();
    }

    fn list_end(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }

    fn table_start(bordered: bool, out: &mut String) {
        if bordered {
            write!(out, r#"<table style="{TABLE_STYLE}">"#).unwrap();
        } else {
            out.push_str("<table>");
        }
    }

    fn table_head_start(out: &mut String) {
        out.push_str("<thead><tr>");
    }

    fn table_head_end(out: &mut String) {
        out.push_str("</tr></thead><tbody>");
    }

    fn table_row_start(out: &mut String) {
        out.push_str("<tr>");
    }

    fn table_row_end(out: &mut String) {
        out.push_str("</tr>");
    }

    fn table_cell(head: bool, alignment: Alignment, bordered: bool, content: &str, out: &mut String) {
        let tag = if head { "th" } else { "td" };
        let style = cell_style(alignment, bordered);
        write!(out, "<{tag}{style}>{content}</{tag}>").unwrap();
    }

    fn table_end(out: &mut String) {
        out.push_str("</tbody></table>");
    }

    fn image(src: &str, alt: &str, mode: &str, out: &mut String) {
        write!(
            out,
            r#"<image alt="{}" src="{}" mode="{}" />"#,
            escape_html(alt),
            escape_html(src),
            escape_html(mode)
        )
        .unwrap();
    }

    fn link(href: &str, target: Option<&str>, content: &str, out: &mut String) {
        let target_attr = target.map_or_else(String::new, |target| {
            format!(r#" target="{}""#, escape_html(target))
        });
        write!(
            out,
            r#"<a href="{}"{target_attr}>{content}</a>"#,
            escape_html(href)
        )
        .unwrap();
    }

    fn inline_code(code: &str, out: &mut String) {
        write!(out, "<code>{code}</code>").unwrap();
    }

    fn strong(content: &str, out: &mut String) {
        write!(out, "<strong>{content}</strong>").unwrap();
    }

    fn emphasis(content: &str, out: &mut String) {
        write!(out, "<em>{content}</em>").unwrap();
    }
}

/// Style attribute for a table cell, empty when no styling applies.
fn cell_style(alignment: Alignment, bordered: bool) -> String {
    match (bordered, alignment.as_css()) {
        (true, align) => format!(
            r#" style="{CELL_STYLE} text-align: {};""#,
            align.unwrap_or(DEFAULT_CELL_ALIGN)
        ),
        (false, Some(align)) => format!(r#" style="text-align: {align};""#),
        (false, None) => String::new(),
    }
}
