//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over source formats
//! by providing the tree-sitter grammars and structure queries the page parser
//! runs. Only markdown is implemented.

pub mod markdown;

/// Grammars and queries for one source format.
pub trait Format {
    /// Grammar for block structure.
    fn language(&self) -> tree_sitter::Language;
    /// Grammar for the inline runs inside paragraphs, headings and cells.
    fn inline_language(&self) -> tree_sitter::Language;
    /// Query against the block grammar capturing `@heading` and `@reference` nodes.
    fn structure_query(&self) -> &str;
}
