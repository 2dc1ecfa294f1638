//! Syntax highlighting for code blocks.
//!
//! The renderer treats highlighting as an opaque service mapping
//! `(code, language)` to styled spans. [`SyntectHighlighter`] is backed by
//! syntect's bundled grammars and themes; [`PlainHighlighter`] leaves code
//! unstyled.

use crate::error::{Error, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Visual attributes of a highlighted span.
pub struct SpanStyle {
    /// Foreground colour as `#rrggbb`.
    pub color: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic face.
    pub italic: bool,
    /// Underlined.
    pub underline: bool,
}

impl SpanStyle {
    #[must_use]
    /// Inline CSS for this style.
    pub fn css(&self) -> String {
        let mut css = format!("color:{}", self.color);
        if self.bold {
            css.push_str(";font-weight:bold");
        }
        if self.italic {
            css.push_str(";font-style:italic");
        }
        if self.underline {
            css.push_str(";text-decoration:underline");
        }
        css
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A piece of a code line sharing one style.
pub struct HighlightSpan {
    /// Span text, never containing a newline.
    pub text: String,
    /// Style, `None` when unstyled.
    pub style: Option<SpanStyle>,
}

/// One line of code as styled spans.
pub type HighlightedLine = Vec<HighlightSpan>;

/// Maps code in a given language to styled lines.
pub trait Highlighter: Send + Sync {
    /// Highlight `code`, one entry per source line.
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightedLine>;

    /// Background colour for code blocks, if the theme defines one.
    fn background(&self) -> Option<String> {
        None
    }
}

/// Lines of `code` without their terminators. Blank trailing lines are
/// kept; empty code has no lines.
fn source_lines(code: &str) -> impl Iterator<Item = &str> {
    let lines = if code.is_empty() {
        None
    } else {
        Some(code.split('\n'))
    };
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split code into unstyled lines.
#[must_use]
pub fn plain_lines(code: &str) -> Vec<HighlightedLine> {
    source_lines(code)
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![HighlightSpan {
                    text: line.to_string(),
                    style: None,
                }]
            }
        })
        .collect()
}

#[derive(Default, Debug, Clone, Copy)]
/// Highlighter that applies no styling.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: Option<&str>) -> Vec<HighlightedLine> {
        plain_lines(code)
    }
}

/// Highlighter backed by syntect's default syntax and theme sets.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Load bundled syntaxes and select a bundled theme by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no bundled theme has this name.
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| Error::UnknownTheme {
                name: theme_name.to_string(),
            })?;

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    #[must_use]
    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightedLine> {
        let syntax = language
            .and_then(|lang| self.syntaxes.find_syntax_by_token(lang))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut lines = Vec::new();
        for line in source_lines(code) {
            // The newline syntax set expects every line to keep its terminator
            let terminated = format!("{line}\n");
            match highlighter.highlight_line(&terminated, &self.syntaxes) {
                Ok(ranges) => lines.push(
                    ranges
                        .into_iter()
                        .filter_map(|(style, text)| styled_span(style, text))
                        .collect(),
                ),
                Err(e) => {
                    warn!(language = ?language, "highlighting failed, emitting plain code: {e}");
                    return plain_lines(code);
                }
            }
        }
        lines
    }

    fn background(&self) -> Option<String> {
        self.theme.settings.background.map(hex)
    }
}

fn styled_span(style: Style, text: &str) -> Option<HighlightSpan> {
    let text = text.trim_end_matches(['\n', '\r']);
    if text.is_empty() {
        return None;
    }
    Some(HighlightSpan {
        text: text.to_string(),
        style: Some(SpanStyle {
            color: hex(style.foreground),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }),
    })
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
