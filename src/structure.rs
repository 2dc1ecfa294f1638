//! Structured search data.
//!
//! A single pass over the page keeps a pointer to the most recent heading and
//! tags every prose or code unit with it. Search indexers consume the result
//! to map a hit back to the nearest anchor.

use crate::inline::plain_text;
use crate::page::{Block, Page};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A unit of prose or code attributed to the heading it falls under.
pub struct ContentSegment {
    /// Anchor of the nearest preceding heading, `None` before the first one.
    pub heading: Option<String>,
    /// Flattened text.
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A heading as seen by the search index.
pub struct StructuredHeading {
    /// Heading anchor.
    pub id: String,
    /// Heading text.
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Search data for one page.
pub struct StructuredData {
    /// Headings in document order.
    pub headings: Vec<StructuredHeading>,
    /// Content segments in document order.
    pub contents: Vec<ContentSegment>,
}

impl StructuredData {
    #[must_use]
    /// Consecutive segments grouped by heading.
    ///
    /// A page without headings has exactly one untagged group.
    pub fn groups(&self) -> Vec<(Option<&str>, Vec<&str>)> {
        let mut groups: Vec<(Option<&str>, Vec<&str>)> = Vec::new();
        for segment in &self.contents {
            let heading = segment.heading.as_deref();
            match groups.last_mut() {
                Some((current, contents)) if *current == heading => {
                    contents.push(&segment.content);
                }
                _ => groups.push((heading, vec![&segment.content])),
            }
        }
        if groups.is_empty() && self.headings.is_empty() {
            groups.push((None, Vec::new()));
        }
        groups
    }
}

/// Walk `page` and attribute each content unit to its nearest heading.
#[must_use]
pub fn extract_structured_data(page: &Page) -> StructuredData {
    let mut walker = Walker::default();
    walker.blocks(page.blocks());
    walker.data
}

#[derive(Default)]
struct Walker {
    current: Option<String>,
    data: StructuredData,
}

impl Walker {
    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => {
                self.current = Some(heading.id.clone());
                self.data.headings.push(StructuredHeading {
                    id: heading.id.clone(),
                    content: heading.text(),
                });
            }
            Block::Paragraph(inlines) => self.push(&plain_text(inlines)),
            Block::CodeBlock(code) => self.push(&code.code),
            Block::List(list) => {
                for item in &list.items {
                    self.blocks(&item.blocks);
                }
            }
            Block::BlockQuote(inner) => self.blocks(inner),
            Block::Table(table) => {
                for cell in table.header.iter().chain(table.rows.iter().flatten()) {
                    self.push(&plain_text(cell));
                }
            }
            Block::ThematicBreak | Block::Html(_) => {}
        }
    }

    fn push(&mut self, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        self.data.contents.push(ContentSegment {
            heading: self.current.clone(),
            content: content.to_string(),
        });
    }
}

#[cfg(test)]
#[path = "tests/structure.rs"]
mod tests;
