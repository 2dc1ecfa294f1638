//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find an mdtree.toml, and if present we load settings from there.
//! This provides file extension, highlighting theme and table of contents preferences.

use crate::toc::TocOptions;
use facet::Facet;
use std::fs;
use tracing::warn;

/// File consulted in the working directory.
pub const CONFIG_FILE: &str = "mdtree.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from mdtree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "InspiredGitHub".to_string())]
    /// Bundled syntect theme used for code blocks.
    pub theme: String,
    #[facet(default = true)]
    /// Whether code blocks are syntax highlighted at all.
    pub highlight: bool,
    #[facet(default = 1)]
    /// Shallowest heading depth listed in the table of contents.
    pub toc_min_depth: u8,
    #[facet(default = 6)]
    /// Deepest heading depth listed in the table of contents.
    pub toc_max_depth: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: vec!["md".to_string()],
            theme: "InspiredGitHub".to_string(),
            highlight: true,
            toc_min_depth: 1,
            toc_max_depth: 6,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mdtree.toml if present.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => Self::from_toml(&contents),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    /// Parse configuration text, falling back to defaults if it is invalid.
    pub fn from_toml(contents: &str) -> Self {
        match facet_toml::from_str::<Self>(contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring invalid {CONFIG_FILE}: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    /// Heading depth range for the table of contents.
    pub fn toc_options(&self) -> TocOptions {
        TocOptions {
            min_depth: self.toc_min_depth,
            max_depth: self.toc_max_depth,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
