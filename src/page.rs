//! Page representation for parsed documentation.
//!
//! A page is one documentation unit: a title, its frontmatter and an ordered
//! tree of blocks. Pages are validated once on construction and never mutated
//! afterwards, so every consumer (renderer, toc, structured data) can rely on
//! unique, well-formed heading anchors.

use crate::error::{Error, Result};
use crate::inline::{plain_text, Inline};
use facet::Facet;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Facet, Serialize, Clone, Debug, Default, PartialEq, Eq)]
/// Metadata declared in a page's leading `+++` TOML block.
pub struct Frontmatter {
    #[facet(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Page title, taking precedence over any leading heading.
    pub title: Option<String>,
    #[facet(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Short summary for listings and meta tags.
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Section heading with its resolved anchor.
pub struct Heading {
    /// Anchor identifier, unique within the page.
    pub id: String,
    /// Nesting depth (1 for `#`, 2 for `##`, ...).
    pub depth: u8,
    /// Inline content as written.
    pub content: Vec<Inline>,
}

impl Heading {
    #[must_use]
    /// Display text with all markup flattened away.
    pub fn text(&self) -> String {
        plain_text(&self.content)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Fenced or indented code.
pub struct CodeBlock {
    /// Language token from the fence info string.
    pub language: Option<String>,
    /// Value of a `title="..."` attribute in the info string.
    pub title: Option<String>,
    /// Code without the fences or trailing newline.
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Bullet or ordered list.
pub struct List {
    /// Whether items are numbered.
    pub ordered: bool,
    /// First number of an ordered list.
    pub start: Option<u64>,
    /// Items in source order.
    pub items: Vec<ListItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One list entry.
pub struct ListItem {
    /// Task list state, `None` for plain items.
    pub checked: Option<bool>,
    /// Nested content.
    pub blocks: Vec<Block>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Column alignment from a table delimiter row.
pub enum Alignment {
    /// No alignment marker.
    None,
    /// `:---`
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

impl Alignment {
    #[must_use]
    /// Value for an `align` attribute, if any.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Pipe table.
pub struct Table {
    /// One entry per column.
    pub alignments: Vec<Alignment>,
    /// Header cells.
    pub header: Vec<Vec<Inline>>,
    /// Body rows of cells.
    pub rows: Vec<Vec<Vec<Inline>>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A unit of page content.
pub enum Block {
    /// Section heading.
    Heading(Heading),
    /// Run of prose.
    Paragraph(Vec<Inline>),
    /// Bullet or ordered list.
    List(List),
    /// Code listing.
    CodeBlock(CodeBlock),
    /// Quoted blocks.
    BlockQuote(Vec<Block>),
    /// Pipe table.
    Table(Table),
    /// Horizontal rule.
    ThematicBreak,
    /// Raw HTML passed through untouched.
    Html(String),
}

/// One documentation page, validated and immutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    title: String,
    frontmatter: Frontmatter,
    blocks: Vec<Block>,
}

impl Page {
    /// Assemble a page, rejecting malformed heading structure.
    ///
    /// # Errors
    ///
    /// Returns an error if a heading id is empty or repeated, or if a heading
    /// depth lies outside `1..=6`.
    pub fn new(
        title: impl Into<String>,
        frontmatter: Frontmatter,
        blocks: Vec<Block>,
    ) -> Result<Self> {
        let page = Self {
            title: title.into(),
            frontmatter,
            blocks,
        };

        let mut seen = HashSet::new();
        for heading in page.headings() {
            if heading.id.is_empty() {
                return Err(Error::EmptyHeadingId {
                    text: heading.text(),
                });
            }
            if !(1..=6).contains(&heading.depth) {
                return Err(Error::InvalidHeadingDepth {
                    id: heading.id.clone(),
                    depth: heading.depth,
                });
            }
            if !seen.insert(heading.id.as_str()) {
                return Err(Error::DuplicateHeadingId {
                    id: heading.id.clone(),
                });
            }
        }

        Ok(page)
    }

    #[must_use]
    /// Resolved page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    /// Metadata from the frontmatter block.
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    #[must_use]
    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    /// Every heading on the page, including those nested in lists and quotes.
    pub fn headings(&self) -> Vec<&Heading> {
        let mut out = Vec::new();
        collect_headings(&self.blocks, &mut out);
        out
    }
}

fn collect_headings<'a>(blocks: &'a [Block], out: &mut Vec<&'a Heading>) {
    for block in blocks {
        match block {
            Block::Heading(heading) => out.push(heading),
            Block::BlockQuote(inner) => collect_headings(inner, out),
            Block::List(list) => {
                for item in &list.items {
                    collect_headings(&item.blocks, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
