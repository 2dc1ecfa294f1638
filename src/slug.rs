//! GitHub-style heading anchors.
//!
//! Anchors are lower-cased, keep letters, digits, `-` and `_`, turn spaces
//! into hyphens and drop everything else. A [`Slugger`] remembers what it has
//! handed out so repeated headings on one page get `-1`, `-2`, ... suffixes.

use std::collections::HashMap;

/// Base anchor for headings whose text slugs to nothing, e.g. `## ???`.
pub const FALLBACK_SLUG: &str = "section";

/// Slug a single heading text without tracking repeats.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[derive(Default, Debug)]
/// Per-page anchor allocator.
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    #[must_use]
    /// Start a fresh page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text`, suffixing it if the same slug was already issued.
    ///
    /// Text with no sluggable characters gets [`FALLBACK_SLUG`] as its base,
    /// so the result is never empty.
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }
        let mut slug = base.clone();

        if self.occurrences.contains_key(&slug) {
            loop {
                let count = self.occurrences.entry(base.clone()).or_insert(0);
                *count += 1;
                slug = format!("{base}-{count}");
                if !self.occurrences.contains_key(&slug) {
                    break;
                }
            }
        }

        self.occurrences.insert(slug.clone(), 0);
        slug
    }

    /// Register an explicit anchor so later automatic slugs avoid it.
    ///
    /// Returns `false` if the anchor was already taken.
    pub fn reserve(&mut self, id: &str) -> bool {
        if self.occurrences.contains_key(id) {
            return false;
        }
        self.occurrences.insert(id.to_string(), 0);
        true
    }
}

/// Split a trailing `[#custom-id]` marker off heading text.
///
/// Returns the heading text without the marker and the explicit id, if any.
#[must_use]
pub fn split_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    if let Some(rest) = trimmed.strip_suffix(']') {
        if let Some(open) = rest.rfind("[#") {
            let id = &rest[open + 2..];
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (rest[..open].trim_end(), Some(id));
            }
        }
    }
    (text, None)
}

#[cfg(test)]
#[path = "tests/slug.rs"]
mod tests;
