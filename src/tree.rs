//! The rendered component tree.
//!
//! A [`Node`] tree is what the renderer hands to a host UI layer. It is plain
//! data: serialisable to JSON for a client-side component runtime, or to
//! markup with [`Node::to_html`]. Fragment wrappers are an explicit
//! [`Node::Group`] variant rather than an empty element.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Element attributes, ordered so serialisation is deterministic.
pub type Attributes = BTreeMap<String, String>;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// One node of the rendered tree.
pub enum Node {
    /// A tagged element.
    Element {
        /// Element name, e.g. `p` or `h2`.
        tag: String,
        /// Element attributes.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: Attributes,
        /// Child nodes in order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
    /// Grouping node with no markup of its own.
    Group {
        /// Child nodes in order.
        children: Vec<Node>,
    },
    /// Text content, escaped on output.
    Text {
        /// The literal text.
        value: String,
    },
    /// Markup passed through verbatim.
    Raw {
        /// The raw HTML.
        html: String,
    },
}

impl Node {
    #[must_use]
    /// Build an element node.
    pub fn element(tag: impl Into<String>, attrs: Attributes, children: Vec<Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    #[must_use]
    /// Build a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    #[must_use]
    /// Build a group node.
    pub fn group(children: Vec<Node>) -> Self {
        Self::Group { children }
    }

    #[must_use]
    /// Element tag, `None` for groups, text and raw nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    #[must_use]
    /// Attribute lookup on an element.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    #[must_use]
    /// Direct children; empty for text and raw nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } | Self::Group { children } => children,
            Self::Text { .. } | Self::Raw { .. } => &[],
        }
    }

    #[must_use]
    /// Concatenated text of this subtree, ignoring raw markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(value),
            Self::Raw { .. } => {}
            Self::Element { children, .. } | Self::Group { children } => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }

    #[must_use]
    /// All elements with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_tag(tag, &mut out);
        out
    }

    fn collect_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Node>) {
        if self.tag() == Some(tag) {
            out.push(self);
        }
        for child in self.children() {
            child.collect_tag(tag, out);
        }
    }

    #[must_use]
    /// Serialise the tree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(&escape_html_text(value)),
            Self::Raw { html } => out.push_str(html),
            Self::Group { children } => {
                for child in children {
                    child.write_html(out);
                }
            }
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Escape for attribute values: `& < > " '`
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape for element content: quotes are safe there.
#[must_use]
pub fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
