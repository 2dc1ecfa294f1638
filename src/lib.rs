//! mdtree: render markdown documentation pages into component trees.
//!
//! A [`Page`] is parsed once from source, validated, and never mutated. From
//! it the [`Renderer`] derives a [`Node`] tree for a host UI layer, while
//! [`extract_toc`] and [`extract_structured_data`] derive the navigation and
//! search metadata that ship alongside it.
#![allow(clippy::multiple_crate_versions)]

pub mod bundle;
pub mod components;
pub mod config;
pub mod error;
pub mod formats;
pub mod highlight;
pub mod inline;
pub mod input;
pub mod page;
pub mod parse;
pub mod render;
pub mod slug;
pub mod structure;
pub mod toc;
pub mod tree;

pub use bundle::PageBundle;
pub use components::{Components, ElementKind, Props};
pub use error::{Error, Result};
pub use page::{Block, Frontmatter, Heading, Page};
pub use parse::PageParser;
pub use render::Renderer;
pub use structure::{extract_structured_data, ContentSegment, StructuredData};
pub use toc::{extract_toc, TocEntry, TocOptions};
pub use tree::Node;
