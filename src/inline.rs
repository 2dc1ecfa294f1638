//! Inline content: the spans inside paragraphs, headings and table cells.

#[derive(Clone, Debug, PartialEq, Eq)]
/// A run of inline markup.
pub enum Inline {
    /// Literal text with escapes and entities already decoded.
    Text(String),
    /// Code span.
    Code(String),
    /// `*emphasis*`
    Emphasis(Vec<Inline>),
    /// `**strong**`
    Strong(Vec<Inline>),
    /// `~~struck~~`
    Strikethrough(Vec<Inline>),
    /// Hyperlink, inline or resolved from a reference definition.
    Link {
        /// Destination URL.
        href: String,
        /// Optional link title.
        title: Option<String>,
        /// Link text.
        children: Vec<Inline>,
    },
    /// Image.
    Image {
        /// Image URL.
        src: String,
        /// Alternative text.
        alt: String,
        /// Optional image title.
        title: Option<String>,
    },
    /// Hard line break.
    Break,
    /// Inline HTML tag passed through untouched.
    Html(String),
}

/// Flatten inline content into searchable text.
///
/// Markup is dropped, link text and image alt text are kept, hard breaks
/// become spaces and inline HTML is discarded.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain(inlines, &mut out);
    out
}

fn push_plain(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. } => push_plain(children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::Break => out.push(' '),
            Inline::Html(_) => {}
        }
    }
}

/// Decode a character or entity reference such as `&amp;` or `&#x41;`.
///
/// Unknown named entities are returned unchanged.
#[must_use]
pub fn decode_entity(raw: &str) -> String {
    let Some(body) = raw.strip_prefix('&').and_then(|r| r.strip_suffix(';')) else {
        return raw.to_string();
    };
    let decoded = if let Some(hex) = body
        .strip_prefix("#x")
        .or_else(|| body.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        match body {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            "copy" => Some('©'),
            "mdash" => Some('—'),
            "ndash" => Some('–'),
            _ => None,
        }
    };
    decoded.map_or_else(|| raw.to_string(), String::from)
}

#[cfg(test)]
#[path = "tests/inline.rs"]
mod tests;
