//! Table of contents extraction.

use crate::page::Page;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One row of a page's table of contents.
pub struct TocEntry {
    /// Heading depth (2 for a section, 3 for a subsection, ...).
    pub depth: u8,
    /// Anchor of the heading, without `#`.
    pub anchor: String,
    /// Display text of the heading.
    pub title: String,
}

impl TocEntry {
    #[must_use]
    /// In-page link to this heading.
    pub fn url(&self) -> String {
        format!("#{}", self.anchor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which heading depths make it into the table of contents.
pub struct TocOptions {
    /// Shallowest depth included.
    pub min_depth: u8,
    /// Deepest depth included.
    pub max_depth: u8,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            min_depth: 1,
            max_depth: 6,
        }
    }
}

/// Headings of `page` in document order, limited to the configured depths.
#[must_use]
pub fn extract_toc(page: &Page, options: TocOptions) -> Vec<TocEntry> {
    page.headings()
        .into_iter()
        .filter(|heading| (options.min_depth..=options.max_depth).contains(&heading.depth))
        .map(|heading| TocEntry {
            depth: heading.depth,
            anchor: heading.id.clone(),
            title: heading.text(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/toc.rs"]
mod tests;
