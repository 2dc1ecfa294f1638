//! Mapping from content kinds to the components that render them.
//!
//! Every element the renderer emits goes through a component looked up by
//! [`ElementKind`]. The defaults produce a plain element with the kind's
//! usual tag; callers override individual kinds and keep the rest.

use crate::tree::{Attributes, Node};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Kinds of element the renderer asks components for.
pub enum ElementKind {
    /// `h1`..`h6`
    Heading,
    /// `p`
    Paragraph,
    /// `ul` or `ol`
    List,
    /// `li`
    ListItem,
    /// Task list checkbox `input`
    TaskMarker,
    /// `blockquote`
    BlockQuote,
    /// `pre` wrapping a code listing
    CodeBlock,
    /// `span` holding one highlighted line
    CodeLine,
    /// `span` holding one styled token run
    CodeToken,
    /// Inline `code`
    Code,
    /// `em`
    Emphasis,
    /// `strong`
    Strong,
    /// `del`
    Strikethrough,
    /// `a`
    Link,
    /// `img`
    Image,
    /// `br`
    LineBreak,
    /// `hr`
    ThematicBreak,
    /// `table`
    Table,
    /// `thead`
    TableHead,
    /// `tbody`
    TableBody,
    /// `tr`
    TableRow,
    /// `th` or `td`
    TableCell,
}

impl ElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 22] = [
        Self::Heading,
        Self::Paragraph,
        Self::List,
        Self::ListItem,
        Self::TaskMarker,
        Self::BlockQuote,
        Self::CodeBlock,
        Self::CodeLine,
        Self::CodeToken,
        Self::Code,
        Self::Emphasis,
        Self::Strong,
        Self::Strikethrough,
        Self::Link,
        Self::Image,
        Self::LineBreak,
        Self::ThematicBreak,
        Self::Table,
        Self::TableHead,
        Self::TableBody,
        Self::TableRow,
        Self::TableCell,
    ];

    #[must_use]
    /// Tag used when the renderer has no more specific one.
    pub fn default_tag(self) -> &'static str {
        match self {
            Self::Heading => "h2",
            Self::Paragraph => "p",
            Self::List => "ul",
            Self::ListItem => "li",
            Self::TaskMarker => "input",
            Self::BlockQuote => "blockquote",
            Self::CodeBlock => "pre",
            Self::CodeLine | Self::CodeToken => "span",
            Self::Code => "code",
            Self::Emphasis => "em",
            Self::Strong => "strong",
            Self::Strikethrough => "del",
            Self::Link => "a",
            Self::Image => "img",
            Self::LineBreak => "br",
            Self::ThematicBreak => "hr",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableRow => "tr",
            Self::TableCell => "td",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Everything a component receives.
pub struct Props {
    /// Which kind of content is being rendered.
    pub kind: ElementKind,
    /// Tag the default component would use, e.g. `h3` or `ol`.
    pub tag: String,
    /// Attributes computed by the renderer.
    pub attrs: Attributes,
    /// Already-rendered children.
    pub children: Vec<Node>,
}

/// A component turns props into a node.
pub type Component = Arc<dyn Fn(Props) -> Node + Send + Sync>;

/// The default component: a plain element with the suggested tag.
#[must_use]
pub fn default_component(props: Props) -> Node {
    Node::element(props.tag, props.attrs, props.children)
}

#[derive(Clone)]
/// Kind-to-component table with override-merge semantics.
pub struct Components {
    table: HashMap<ElementKind, Component>,
}

impl Default for Components {
    fn default() -> Self {
        let default: Component = Arc::new(default_component);
        Self {
            table: ElementKind::ALL
                .iter()
                .map(|kind| (*kind, Arc::clone(&default)))
                .collect(),
        }
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Components")
            .field("kinds", &self.table.len())
            .finish()
    }
}

impl Components {
    #[must_use]
    /// Replace the component for one kind.
    pub fn with<F>(mut self, kind: ElementKind, component: F) -> Self
    where
        F: Fn(Props) -> Node + Send + Sync + 'static,
    {
        self.table.insert(kind, Arc::new(component));
        self
    }

    #[must_use]
    /// Merge caller overrides over this table; overridden kinds win.
    pub fn merge(mut self, overrides: impl IntoIterator<Item = (ElementKind, Component)>) -> Self {
        self.table.extend(overrides);
        self
    }

    /// Render `props` through the component registered for its kind.
    #[must_use]
    pub fn render(&self, props: Props) -> Node {
        match self.table.get(&props.kind) {
            Some(component) => component(props),
            None => default_component(props),
        }
    }

    /// Convenience for the common case of an element with a kind and children.
    #[must_use]
    pub fn element(
        &self,
        kind: ElementKind,
        tag: impl Into<String>,
        attrs: Attributes,
        children: Vec<Node>,
    ) -> Node {
        self.render(Props {
            kind,
            tag: tag.into(),
            attrs,
            children,
        })
    }
}

#[cfg(test)]
#[path = "tests/components.rs"]
mod tests;
