//! Per-page output: the tree plus its sidecar metadata.

use crate::page::{Frontmatter, Page};
use crate::render::Renderer;
use crate::structure::{extract_structured_data, StructuredData};
use crate::toc::{extract_toc, TocEntry, TocOptions};
use crate::tree::Node;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything a host needs to display and index one page.
pub struct PageBundle {
    /// Resolved page title.
    pub title: String,
    /// Frontmatter as declared.
    pub frontmatter: Frontmatter,
    /// Table of contents rows.
    pub toc: Vec<TocEntry>,
    /// Search segments and headings.
    pub structured_data: StructuredData,
    /// Rendered component tree.
    pub tree: Node,
}

impl PageBundle {
    #[must_use]
    /// Render `page` and extract its metadata.
    pub fn build(page: &Page, renderer: &Renderer, toc: TocOptions) -> Self {
        Self {
            title: page.title().to_string(),
            frontmatter: page.frontmatter().clone(),
            toc: extract_toc(page, toc),
            structured_data: extract_structured_data(page),
            tree: renderer.render(page),
        }
    }

    #[must_use]
    /// A standalone HTML document for this page.
    pub fn to_html_document(&self) -> String {
        let title = crate::tree::escape_html_text(&self.title);
        let mut head = format!("<meta charset=\"utf-8\"><title>{title}</title>");
        if let Some(description) = &self.frontmatter.description {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">",
                crate::tree::escape_html(description)
            ));
        }
        format!(
            "<!DOCTYPE html>\n<html><head>{head}</head><body><main><h1>{title}</h1>{}</main></body></html>\n",
            self.tree.to_html()
        )
    }
}

#[cfg(test)]
#[path = "tests/bundle.rs"]
mod tests;
