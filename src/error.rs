//! Error types for page construction, parsing and rendering setup.

use thiserror::Error;

/// Result type for mdtree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or loading a page.
///
/// Rendering itself never fails: every variant here is raised before a
/// [`Page`](crate::page::Page) exists or while configuring the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Two headings on the same page resolved to the same anchor
    #[error("Duplicate heading id '{id}'")]
    DuplicateHeadingId {
        /// The anchor that occurs more than once.
        id: String,
    },

    /// A heading has no usable anchor
    #[error("Heading '{text}' has an empty id")]
    EmptyHeadingId {
        /// Display text of the offending heading.
        text: String,
    },

    /// Heading depth outside 1..=6
    #[error("Heading '{id}' has invalid depth {depth}")]
    InvalidHeadingDepth {
        /// Anchor of the offending heading.
        id: String,
        /// The rejected depth.
        depth: u8,
    },

    /// Grammar could not be loaded into the parser
    #[error("Language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Heading or reference query failed to compile
    #[error("Query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree
    #[error("Failed to parse {what}")]
    ParseFailed {
        /// Which parse stage gave up.
        what: &'static str,
    },

    /// Frontmatter block is not valid TOML for the expected fields
    #[error("Invalid frontmatter: {reason}")]
    Frontmatter {
        /// Deserialiser message.
        reason: String,
    },

    /// Requested syntax theme is not bundled
    #[error("Unknown theme '{name}'")]
    UnknownTheme {
        /// The theme name that was asked for.
        name: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two source documents would be written to the same output file
    #[error("{} and {} both map to {}", first.display(), second.display(), target.display())]
    OutputCollision {
        /// The shared output path.
        target: std::path::PathBuf,
        /// The document that claimed the path first.
        first: std::path::PathBuf,
        /// The document that collided with it.
        second: std::path::PathBuf,
    },
}
