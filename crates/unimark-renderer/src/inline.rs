//! Inline span conversion.
//!
//! Five passes run in a fixed order: image, link, code span, strong,
//! emphasis. Each pass only sees text that no earlier pass has turned into
//! markup, so emitted elements are never re-entered.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::backend::RenderBackend;
use crate::options::RenderOptions;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static STRONG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static EMPHASIS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Inline passes in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Pass {
    Image,
    Link,
    Code,
    Strong,
    Emphasis,
}

impl Pass {
    const ALL: [Self; 5] = [
        Self::Image,
        Self::Link,
        Self::Code,
        Self::Strong,
        Self::Emphasis,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Image => &IMAGE_PATTERN,
            Self::Link => &LINK_PATTERN,
            Self::Code => &CODE_PATTERN,
            Self::Strong => &STRONG_PATTERN,
            Self::Emphasis => &EMPHASIS_PATTERN,
        }
    }
}

/// Text still open to conversion, or markup already emitted.
enum Piece {
    Text(String),
    Markup(String),
}

/// Convert inline spans in one line of text.
pub(crate) fn convert<B: RenderBackend>(text: &str, options: &RenderOptions) -> String {
    convert_from::<B>(text, Pass::Image, options)
}

/// Run every pass from `first` onwards.
fn convert_from<B: RenderBackend>(text: &str, first: Pass, options: &RenderOptions) -> String {
    let mut pieces = vec![Piece::Text(text.to_owned())];
    for pass in Pass::ALL.into_iter().filter(|&pass| pass >= first) {
        pieces = apply::<B>(pieces, pass, options);
    }

    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(s) | Piece::Markup(s) => s,
        })
        .collect()
}

fn apply<B: RenderBackend>(pieces: Vec<Piece>, pass: Pass, options: &RenderOptions) -> Vec<Piece> {
    let pattern = pass.pattern();
    let mut result = Vec::with_capacity(pieces.len());

    for piece in pieces {
        let text = match piece {
            Piece::Text(text) => text,
            markup @ Piece::Markup(_) => {
                result.push(markup);
                continue;
            }
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                result.push(Piece::Text(text[last..whole.start()].to_owned()));
            }
            let mut markup = String::new();
            render_match::<B>(pass, &caps, options, &mut markup);
            result.push(Piece::Markup(markup));
            last = whole.end();
        }
        if last < text.len() {
            result.push(Piece::Text(text[last..].to_owned()));
        }
    }

    result
}

fn render_match<B: RenderBackend>(
    pass: Pass,
    caps: &Captures<'_>,
    options: &RenderOptions,
    out: &mut String,
) {
    let group = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());

    match pass {
        Pass::Image => B::image(group(2), group(1), &options.image_mode, out),
        Pass::Link => {
            let label = convert_from::<B>(group(1), Pass::Code, options);
            B::link(group(2), options.link_target.as_deref(), &label, out);
        }
        Pass::Code => B::inline_code(group(1), out),
        Pass::Strong => {
            let inner = convert_from::<B>(group(1), Pass::Emphasis, options);
            B::strong(&inner, out);
        }
        Pass::Emphasis => B::emphasis(group(1), out),
    }
}
