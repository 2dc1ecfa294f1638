//! Markdown format implementation using tree-sitter-md.
//!
//! tree-sitter-md splits markdown into two grammars: the block grammar sees
//! headings, lists, fences and tables with opaque `inline` nodes, which are
//! parsed again with the inline grammar.

use crate::formats::Format;

/// Tree-sitter grammars and queries for markdown with GFM extensions.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn inline_language(&self) -> tree_sitter::Language {
        tree_sitter_md::INLINE_LANGUAGE.into()
    }

    fn structure_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading
         (link_reference_definition) @reference"
    }
}
