//! Fenced block recognition and dispatch.
//!
//! A fenced block opens with a line of three backticks followed by an
//! optional tag and closes with a line of three backticks. Every block is
//! dispatched exactly once, by tag, to one of three renderings: generic
//! code, diagram or chart.

/// Backtick run that opens and closes a fence.
const FENCE: &str = "```";

/// Tag assumed when the opening line carries none.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    /// Parse a fence tag into a chart kind.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "linechart" => Some(Self::Line),
            "barchart" => Some(Self::Bar),
            _ => None,
        }
    }

    /// Tag name, also used as the chart's `type` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "linechart",
            Self::Bar => "barchart",
        }
    }
}

/// Rendering selected for a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind<'a> {
    /// Generic code block with its language tag.
    Code(&'a str),
    /// Mermaid diagram.
    Diagram,
    /// Chart with JSON-encoded source data.
    Chart(ChartKind),
}

impl<'a> FenceKind<'a> {
    /// Single dispatch point: choose the rendering for a fence tag.
    #[must_use]
    pub fn from_tag(tag: Option<&'a str>) -> Self {
        match tag {
            Some("mermaid") => Self::Diagram,
            Some(tag) => ChartKind::parse(tag).map_or(Self::Code(tag), Self::Chart),
            None => Self::Code(DEFAULT_LANGUAGE),
        }
    }
}

/// Detect an opening fence line.
///
/// Returns `Some(tag)` for an opening line, where `tag` is the first token of
/// the info string (`None` when the info string is empty). Anything after the
/// first token is ignored.
pub(crate) fn opening_tag(line: &str) -> Option<Option<&str>> {
    let rest = line.trim_start().strip_prefix(FENCE)?;
    if rest.starts_with('`') {
        return None;
    }

    match rest.split_whitespace().next() {
        None => Some(None),
        Some(tag) if tag.chars().all(is_tag_char) => Some(Some(tag)),
        Some(_) => None,
    }
}

/// Check if a line closes the current fence.
pub(crate) fn is_closing(line: &str) -> bool {
    line.trim() == FENCE
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '+' | '#' | '.')
}

/// Join body lines, dropping leading blank lines and trailing whitespace.
pub(crate) fn trim_body(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|line| !crate::util::is_blank(line))
        .unwrap_or(lines.len());
    lines[start..].join("\n").trim_end().to_owned()
}
