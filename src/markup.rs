//! Inline markup for assistant answers
//!
//! Answers carry a deliberately tiny subset of markdown: `**bold**` spans and
//! `[text](href)` links. Anything else is plain text. The scanner is
//! lossless, so [`to_markup`] over the parsed segments gives back the input.


/// Rel attribute for links that open in a new browsing context
pub const EXTERNAL_LINK_REL: &str = "noopener noreferrer";

/// One rendered piece of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Bold(String),
    Link(Link),
}

/// A `[text](href)` span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub href: String,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }

    /// Links to other sites open in a new context; site-relative ones do not
    pub fn is_external(&self) -> bool {
        self.href.starts_with("http")
    }

    pub fn rel(&self) -> Option<&'static str> {
        self.is_external().then_some(EXTERNAL_LINK_REL)
    }
}

impl Segment {
    /// Re-serialize this segment to the markup it was parsed from
    pub fn to_markup(&self) -> String {
        match self {
            Segment::Text(value) => value.clone(),
            Segment::Bold(value) => format!("**{value}**"),
            Segment::Link(link) => format!("[{}]({})", link.text, link.href),
        }
    }
}

/// Re-serialize a full segment sequence
pub fn to_markup(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_markup).collect()
}

/// A typed span found in the input, as byte offsets into the scanned slice
struct Span {
    start: usize,
    end: usize,
    segment: Segment,
}

/// Split `content` into plain text, bold and link segments.
///
/// At every step the earliest link and the earliest bold span are located and
/// whichever starts first is consumed. When both start at the same offset the
/// link wins. Empty input yields no segments.
pub fn parse(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < content.len() {
        let rest = &content[cursor..];
        let next = match (find_link(rest), find_bold(rest)) {
            (Some(link), Some(bold)) if bold.start < link.start => bold,
            (Some(link), _) => link,
            (None, Some(bold)) => bold,
            (None, None) => break,
        };

        if next.start > 0 {
            segments.push(Segment::Text(rest[..next.start].to_string()));
        }
        segments.push(next.segment);
        cursor += next.end;
    }

    if cursor < content.len() {
        segments.push(Segment::Text(content[cursor..].to_string()));
    }

    segments
}

/// First `[text](href)` with non-empty text and href.
///
/// The text runs to the first `]` after the opening bracket and the href to
/// the first `)` after the opening paren.
fn find_link(s: &str) -> Option<Span> {
    for (start, _) in s.match_indices('[') {
        let after_open = &s[start + 1..];
        // No later bracket can close either
        let close = after_open.find(']')?;
        if close == 0 {
            continue;
        }
        let Some(target) = after_open[close + 1..].strip_prefix('(') else {
            continue;
        };
        let Some(href_len) = target.find(')') else {
            continue;
        };
        if href_len == 0 {
            continue;
        }

        let end = start + 1 + close + 2 + href_len + 1;
        return Some(Span {
            start,
            end,
            segment: Segment::Link(Link::new(&after_open[..close], &target[..href_len])),
        });
    }
    None
}

/// First `**value**`, shortest possible value, never crossing a line break
fn find_bold(s: &str) -> Option<Span> {
    let mut from = 0;
    while let Some(offset) = s[from..].find("**") {
        let start = from + offset;
        let body = &s[start + 2..];
        let line_len = body.find(['\n', '\r']).unwrap_or(body.len());
        if let Some(close) = body[..line_len].find("**") {
            return Some(Span {
                start,
                end: start + 2 + close + 2,
                segment: Segment::Bold(body[..close].to_string()),
            });
        }
        from = start + 1;
    }
    None
}
