//! Line scanner producing the intermediate block list.
//!
//! At each line the recognizers are tried in pipeline precedence order:
//! fenced block, block quote, table, unordered list, ordered list, heading,
//! horizontal rule. A line no recognizer claims is plain text. Fenced blocks
//! are consumed whole, so their content is never seen by a later recognizer.

use crate::fence::{self, FenceKind};
use crate::table::{self, Table};
use crate::util::is_blank;

/// Recognized block-level construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    /// Fenced block with its dispatched rendering and trimmed body.
    Fence { kind: FenceKind<'a>, body: String },
    /// Block quote lines with `>` markers stripped.
    Quote(Vec<&'a str>),
    Table(Table<'a>),
    /// List items with markers stripped and text trimmed.
    List { ordered: bool, items: Vec<&'a str> },
    Heading { level: u8, text: &'a str },
    Rule,
    /// Line of running text.
    Text(&'a str),
    /// Blank separator line.
    Blank,
}

impl Block<'_> {
    /// Whether the block renders as a block-level element.
    ///
    /// A chunk starting with a block-level element is not wrapped in a
    /// paragraph.
    pub fn is_block_level(&self) -> bool {
        !matches!(self, Self::Text(_) | Self::Blank)
    }
}

/// Output of [`scan`].
#[derive(Debug, Default)]
pub(crate) struct Scan<'a> {
    pub blocks: Vec<Block<'a>>,
    pub warnings: Vec<String>,
}

/// Scan a normalized document into blocks.
pub(crate) fn scan(input: &str) -> Scan<'_> {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut scanner = Scanner {
        lines: &lines,
        next_close: next_closing_lines(&lines),
        pos: 0,
        scan: Scan::default(),
    };
    scanner.run();

    tracing::debug!(
        lines = lines.len(),
        blocks = scanner.scan.blocks.len(),
        "Scanned document"
    );
    scanner.scan
}

/// For each line index, the index of the first closing fence line at or
/// after it.
fn next_closing_lines(lines: &[&str]) -> Vec<Option<usize>> {
    let mut next = vec![None; lines.len() + 1];
    for idx in (0..lines.len()).rev() {
        next[idx] = if fence::is_closing(lines[idx]) {
            Some(idx)
        } else {
            next[idx + 1]
        };
    }
    next
}

struct Scanner<'s, 'a> {
    lines: &'s [&'a str],
    /// Lookup table from [`next_closing_lines`], one entry past the end.
    next_close: Vec<Option<usize>>,
    pos: usize,
    scan: Scan<'a>,
}

impl<'a> Scanner<'_, 'a> {
    fn run(&mut self) {
        while self.pos < self.lines.len() {
            let block = self.next_block();
            self.scan.blocks.push(block);
        }
    }

    fn next_block(&mut self) -> Block<'a> {
        let line = self.lines[self.pos];

        if let Some(block) = self.fence() {
            return block;
        }
        if let Some(block) = self.quote() {
            return block;
        }
        if let Some(block) = self.table() {
            return block;
        }
        if let Some(block) = self.list(unordered_item, false) {
            return block;
        }
        if let Some(block) = self.list(ordered_item, true) {
            return block;
        }

        self.pos += 1;
        if is_blank(line) {
            Block::Blank
        } else if let Some((level, text)) = heading(line) {
            Block::Heading { level, text }
        } else if is_rule(line) {
            Block::Rule
        } else {
            Block::Text(line)
        }
    }

    /// Index of the closing line for a fence opening at `open`.
    fn closing_line(&self, open: usize) -> Option<usize> {
        self.next_close.get(open + 1).copied().flatten()
    }

    fn fence(&mut self) -> Option<Block<'a>> {
        let tag = fence::opening_tag(self.lines[self.pos])?;

        let Some(close) = self.closing_line(self.pos) else {
            let line_num = self.pos + 1;
            tracing::debug!(line = line_num, "Unterminated code fence, rendering as text");
            self.scan.warnings.push(format!(
                "line {line_num}: unterminated code fence, rendered as text"
            ));
            return None;
        };

        let body = fence::trim_body(&self.lines[self.pos + 1..close]);
        self.pos = close + 1;
        Some(Block::Fence {
            kind: FenceKind::from_tag(tag),
            body,
        })
    }

    fn quote(&mut self) -> Option<Block<'a>> {
        let mut lines = Vec::new();
        while let Some(body) = self.lines.get(self.pos).copied().and_then(quote_body) {
            lines.push(body);
            self.pos += 1;
        }
        (!lines.is_empty()).then_some(Block::Quote(lines))
    }

    fn table(&mut self) -> Option<Block<'a>> {
        let header = self.lines[self.pos];
        if !table::is_row(header) {
            return None;
        }
        let alignments = table::parse_alignment_row(self.lines.get(self.pos + 1)?)?;

        let mut idx = self.pos + 2;
        let mut rows = Vec::new();
        while let Some(&line) = self.lines.get(idx) {
            if !table::is_row(line) || self.opens_fence(idx) {
                break;
            }
            rows.push(table::split_row(line));
            idx += 1;
        }

        self.pos = idx;
        Some(Block::Table(Table {
            header: table::split_row(header),
            alignments,
            rows,
        }))
    }

    fn opens_fence(&self, idx: usize) -> bool {
        fence::opening_tag(self.lines[idx]).is_some() && self.closing_line(idx).is_some()
    }

    /// Collect a run of at least two lines accepted by `item`.
    fn list(&mut self, item: fn(&str) -> Option<&str>, ordered: bool) -> Option<Block<'a>> {
        let items: Vec<&'a str> = self.lines[self.pos..]
            .iter()
            .copied()
            .map_while(item)
            .collect();
        if items.len() < 2 {
            return None;
        }

        self.pos += items.len();
        Some(Block::List { ordered, items })
    }
}

/// Strip a quote marker and one optional following whitespace character.
fn quote_body(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => Some(rest),
    }
}

/// Item text of an unordered list line (`-`, `*` or `+` marker).
fn unordered_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(['-', '*', '+'])?;
    item_text(rest)
}

/// Item text of an ordered list line (`1.` marker).
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    item_text(rest)
}

/// Marker must be followed by whitespace and non-blank text.
fn item_text(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Parse a heading line into level and trimmed text.
fn heading(line: &str) -> Option<(u8, &str)> {
    let text = line.trim_start_matches('#');
    let level = line.len() - text.len();
    if !(1..=6).contains(&level) {
        return None;
    }
    u8::try_from(level).ok().map(|level| (level, text.trim()))
}

/// A run of three or more identical `-` or `*` characters.
fn is_rule(line: &str) -> bool {
    let line = line.trim_end();
    let Some(marker) = line.chars().next() else {
        return false;
    };
    matches!(marker, '-' | '*') && line.len() >= 3 && line.chars().all(|c| c == marker)
}
