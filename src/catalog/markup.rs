//! Lightweight explanation markup: `**bold**`, `_em_` and `` `code` ``.
//!
//! Markers must open and close on the same line. An unmatched marker is kept
//! as literal text.

/// How a span of explanation text should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Strong,
    Emphasis,
    Code,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

// Tried in order at each position.
const MARKERS: [(&str, SpanStyle); 3] = [
    ("**", SpanStyle::Strong),
    ("_", SpanStyle::Emphasis),
    ("`", SpanStyle::Code),
];

/// Split explanation text into styled spans.
pub fn render_explanation(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some((style, inner, after)) = match_marker(rest) {
            if !plain.is_empty() {
                spans.push(Span::new(std::mem::take(&mut plain), SpanStyle::Plain));
            }
            spans.push(Span::new(inner, style));
            rest = after;
            continue;
        }
        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !plain.is_empty() {
        spans.push(Span::new(plain, SpanStyle::Plain));
    }
    spans
}

fn match_marker(s: &str) -> Option<(SpanStyle, &str, &str)> {
    for (marker, style) in MARKERS {
        let Some(body) = s.strip_prefix(marker) else {
            continue;
        };
        if let Some(end) = body.find(marker) {
            let inner = &body[..end];
            if !inner.contains('\n') {
                return Some((style, inner, &body[end + marker.len()..]));
            }
        }
    }
    None
}
