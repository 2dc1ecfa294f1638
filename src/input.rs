//! Locating source documents and reading them into pages.
//!
//! Paths given on the command line may be files or directories; directories
//! are walked recursively for files with a matching extension. A page may
//! open with a `+++` delimited TOML frontmatter block.

use crate::error::{Error, Result};
use crate::page::{Frontmatter, Page};
use crate::parse::PageParser;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const FRONTMATTER_FENCE: &str = "+++";

/// Expand `paths` into a sorted, de-duplicated list of matching files.
///
/// Files named explicitly are kept regardless of extension.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for path in paths {
        let metadata = fs::metadata(&path)?;
        if !metadata.is_dir() {
            documents.push(path);
            continue;
        }
        // Symlinked directories are not entered
        for entry in WalkDir::new(&path).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                documents.push(entry.into_path());
            }
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Output file for each document under `dir`, named `<stem>.<extension>`.
///
/// # Errors
///
/// Returns [`Error::OutputCollision`] if two documents share a file stem.
pub fn output_paths(documents: &[PathBuf], dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    documents
        .iter()
        .map(|doc| {
            let stem = doc.file_stem().unwrap_or(doc.as_os_str()).to_string_lossy();
            let target = dir.join(format!("{stem}.{extension}"));
            if let Some(first) = claimed.insert(target.clone(), doc) {
                return Err(Error::OutputCollision {
                    target,
                    first: first.clone(),
                    second: doc.clone(),
                });
            }
            Ok(target)
        })
        .collect()
}

/// Split a leading `+++` TOML block off `source`.
///
/// Returns default frontmatter and the whole source when there is no block.
///
/// # Errors
///
/// Returns an error if the block is unterminated or is not valid TOML for
/// [`Frontmatter`].
pub fn split_frontmatter(source: &str) -> Result<(Frontmatter, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');
    let body_start = match lines.next() {
        Some(first) if first.trim_end() == FRONTMATTER_FENCE => first.len(),
        _ => return Ok((Frontmatter::default(), source)),
    };

    let mut offset = body_start;
    for line in lines {
        if line.trim_end() == FRONTMATTER_FENCE {
            let toml = &source[body_start..offset];
            let frontmatter = facet_toml::from_str::<Frontmatter>(toml).map_err(|e| {
                Error::Frontmatter {
                    reason: e.to_string(),
                }
            })?;
            return Ok((frontmatter, &source[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(Error::Frontmatter {
        reason: "unterminated +++ block".to_string(),
    })
}

/// Read and parse one page from disk.
///
/// The file stem stands in for the title when the page declares none.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the page is malformed.
pub fn load_page(path: &Path, parser: &mut PageParser) -> Result<Page> {
    let source = fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(path = %path.display(), "loading page");
    parser.parse(&source, &fallback)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
