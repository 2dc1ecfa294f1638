//! Markdown source to [`Page`] conversion.
//!
//! Parsing happens in two steps. A query pass over the block tree collects
//! link reference definitions and headings in document order, so anchors are
//! allocated by one [`Slugger`] before any block is built. A walk of the block
//! tree then builds [`Block`]s, flattening the grammar's `section` wrappers and
//! running every inline run through the inline grammar.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::inline::{decode_entity, plain_text, Inline};
use crate::input::split_frontmatter;
use crate::page::{Alignment, Block, CodeBlock, Heading, List, ListItem, Page, Table};
use crate::slug::{split_custom_id, Slugger};
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Debug)]
struct LinkTarget {
    href: String,
    title: Option<String>,
}

/// Reusable parser turning markdown text into validated pages.
pub struct PageParser {
    block: Parser,
    inline: Parser,
    query: Query,
}

impl PageParser {
    /// Load the grammars and compile the structure query for `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if a grammar is incompatible with the linked
    /// tree-sitter runtime or the query does not compile.
    pub fn new(format: &impl Format) -> Result<Self> {
        let language = format.language();
        let mut block = Parser::new();
        block.set_language(&language)?;
        let mut inline = Parser::new();
        inline.set_language(&format.inline_language())?;
        let query = Query::new(&language, format.structure_query())?;

        Ok(Self {
            block,
            inline,
            query,
        })
    }

    /// Parse `source` into a page.
    ///
    /// The title is taken from the frontmatter, else from a leading level-one
    /// heading (which is then dropped from the body), else `fallback_title`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed frontmatter, if the parser gives up, or
    /// if the resulting page fails validation (e.g. a repeated explicit id).
    pub fn parse(&mut self, source: &str, fallback_title: &str) -> Result<Page> {
        let (frontmatter, body) = split_frontmatter(source)?;
        let tree = self
            .block
            .parse(body, None)
            .ok_or(Error::ParseFailed { what: "document" })?;
        let root = tree.root_node();

        let mut builder = Builder {
            src: body,
            inline: &mut self.inline,
            references: HashMap::new(),
            headings: HashMap::new(),
        };

        let mut heading_nodes = Vec::new();
        let names = self.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, root, body.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                match names.get(capture.index as usize).copied() {
                    Some("heading") => heading_nodes.push(capture.node),
                    Some("reference") => builder.reference(capture.node),
                    _ => {}
                }
            }
        }

        let mut slugger = Slugger::new();
        for node in heading_nodes {
            let heading = builder.heading(node, &mut slugger)?;
            builder.headings.insert(node.start_byte(), heading);
        }

        let mut blocks = builder.blocks(root)?;

        let title = if let Some(title) = &frontmatter.title {
            title.clone()
        } else if let Some(Block::Heading(heading)) = blocks
            .first()
            .filter(|b| matches!(b, Block::Heading(h) if h.depth == 1))
        {
            let title = heading.text();
            blocks.remove(0);
            title
        } else {
            fallback_title.to_string()
        };

        debug!(%title, blocks = blocks.len(), "parsed page");
        Page::new(title, frontmatter, blocks)
    }
}

struct Builder<'a> {
    src: &'a str,
    inline: &'a mut Parser,
    references: HashMap<String, LinkTarget>,
    headings: HashMap<usize, Heading>,
}

impl Builder<'_> {
    fn text(&self, node: Node) -> &str {
        self.src.get(node.byte_range()).unwrap_or_default()
    }

    /// Text of `node` with its block continuation prefixes (`> `, list
    /// indentation) cut out. Other children, such as the anonymous
    /// punctuation tokens of `inline`, are kept.
    fn content(&self, node: Node) -> String {
        let mut out = String::new();
        let mut pos = node.start_byte();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "block_continuation" {
                continue;
            }
            if child.start_byte() > pos {
                out.push_str(self.src.get(pos..child.start_byte()).unwrap_or_default());
            }
            pos = pos.max(child.end_byte());
        }
        if node.end_byte() > pos {
            out.push_str(self.src.get(pos..node.end_byte()).unwrap_or_default());
        }
        out
    }

    fn reference(&mut self, node: Node) {
        let mut label = None;
        let mut href = None;
        let mut title = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "link_label" => label = Some(normalize_label(self.text(child))),
                "link_destination" => href = Some(strip_destination(self.text(child))),
                "link_title" => title = Some(strip_title(self.text(child))),
                _ => {}
            }
        }
        if let (Some(label), Some(href)) = (label, href) {
            // First definition wins
            self.references
                .entry(label)
                .or_insert(LinkTarget { href, title });
        }
    }

    fn heading(&mut self, node: Node, slugger: &mut Slugger) -> Result<Heading> {
        let mut depth = 1;
        let mut raw = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "atx_h1_marker" | "setext_h1_underline" => depth = 1,
                "atx_h2_marker" | "setext_h2_underline" => depth = 2,
                "atx_h3_marker" => depth = 3,
                "atx_h4_marker" => depth = 4,
                "atx_h5_marker" => depth = 5,
                "atx_h6_marker" => depth = 6,
                "inline" => raw = self.content(child),
                "paragraph" => {
                    if let Some(inline) = child_of_kind(child, "inline") {
                        raw = self.content(inline);
                    }
                }
                _ => {}
            }
        }

        let (text, custom_id) = split_custom_id(raw.trim());
        let content = self.inlines(text.trim())?;
        let id = match custom_id {
            Some(id) => {
                if !slugger.reserve(id) {
                    warn!(id, "explicit heading id is already in use");
                }
                id.to_string()
            }
            None => slugger.slug(&plain_text(&content)),
        };

        Ok(Heading { id, depth, content })
    }

    fn blocks(&mut self, node: Node) -> Result<Vec<Block>> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.block(child, &mut out)?;
        }
        Ok(out)
    }

    fn block(&mut self, node: Node, out: &mut Vec<Block>) -> Result<()> {
        match node.kind() {
            "section" => out.extend(self.blocks(node)?),
            "atx_heading" | "setext_heading" => {
                if let Some(heading) = self.headings.remove(&node.start_byte()) {
                    out.push(Block::Heading(heading));
                }
            }
            "paragraph" => {
                if let Some(inline) = child_of_kind(node, "inline") {
                    let text = self.content(inline);
                    let inlines = self.inlines(text.trim())?;
                    if !inlines.is_empty() {
                        out.push(Block::Paragraph(inlines));
                    }
                }
            }
            "fenced_code_block" => out.push(Block::CodeBlock(self.fenced_code(node))),
            "indented_code_block" => out.push(Block::CodeBlock(CodeBlock {
                language: None,
                title: None,
                code: dedent_indented(&self.content(node)),
            })),
            "list" => out.push(Block::List(self.list(node)?)),
            "block_quote" => out.push(Block::BlockQuote(self.blocks(node)?)),
            "pipe_table" => out.push(Block::Table(self.table(node)?)),
            "thematic_break" => out.push(Block::ThematicBreak),
            "html_block" => out.push(Block::Html(self.text(node).trim_end().to_string())),
            "minus_metadata" | "plus_metadata" => {
                warn!("skipping metadata block not in +++ TOML form");
            }
            _ => {}
        }
        Ok(())
    }

    fn fenced_code(&self, node: Node) -> CodeBlock {
        let mut language = None;
        let mut title = None;
        let mut code = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "info_string" => {
                    let info = self.text(child).trim();
                    let (lang, meta) = info.split_once(char::is_whitespace).unwrap_or((info, ""));
                    let lang = lang.split(',').next().unwrap_or_default();
                    if !lang.is_empty() {
                        language = Some(lang.to_string());
                    }
                    title = meta_title(meta);
                }
                "code_fence_content" => code = self.content(child),
                _ => {}
            }
        }
        if code.ends_with('\n') {
            code.pop();
            if code.ends_with('\r') {
                code.pop();
            }
        }
        CodeBlock {
            language,
            title,
            code,
        }
    }

    fn list(&mut self, node: Node) -> Result<List> {
        let mut ordered = false;
        let mut start = None;
        let mut items = Vec::new();
        let mut cursor = node.walk();
        for item in node.named_children(&mut cursor) {
            if item.kind() != "list_item" {
                continue;
            }
            let mut checked = None;
            let mut item_cursor = item.walk();
            for child in item.named_children(&mut item_cursor) {
                match child.kind() {
                    "list_marker_dot" | "list_marker_parenthesis" => {
                        ordered = true;
                        if items.is_empty() {
                            start = self
                                .text(child)
                                .trim()
                                .trim_end_matches(['.', ')'])
                                .parse()
                                .ok();
                        }
                    }
                    "task_list_marker_checked" => checked = Some(true),
                    "task_list_marker_unchecked" => checked = Some(false),
                    _ => {}
                }
            }
            items.push(ListItem {
                checked,
                blocks: self.blocks(item)?,
            });
        }
        Ok(List {
            ordered,
            start,
            items,
        })
    }

    fn table(&mut self, node: Node) -> Result<Table> {
        let mut alignments = Vec::new();
        let mut header = Vec::new();
        let mut rows = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "pipe_table_header" => header = self.table_cells(child)?,
                "pipe_table_row" => rows.push(self.table_cells(child)?),
                "pipe_table_delimiter_row" => {
                    let mut cell_cursor = child.walk();
                    alignments = child
                        .named_children(&mut cell_cursor)
                        .filter(|cell| cell.kind() == "pipe_table_delimiter_cell")
                        .map(|cell| alignment(self.text(cell).trim()))
                        .collect();
                }
                _ => {}
            }
        }
        Ok(Table {
            alignments,
            header,
            rows,
        })
    }

    fn table_cells(&mut self, row: Node) -> Result<Vec<Vec<Inline>>> {
        let mut cells = Vec::new();
        let mut cursor = row.walk();
        for cell in row.named_children(&mut cursor) {
            if cell.kind() == "pipe_table_cell" {
                let text = self.text(cell).trim().to_string();
                cells.push(self.inlines(&text)?);
            }
        }
        Ok(cells)
    }

    /// Parse an inline run with the inline grammar.
    fn inlines(&mut self, text: &str) -> Result<Vec<Inline>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let tree = self
            .inline
            .parse(text, None)
            .ok_or(Error::ParseFailed { what: "inline" })?;
        let root = tree.root_node();
        let inline = InlineBuilder {
            src: text,
            references: &self.references,
        };
        Ok(inline.range(root, root.start_byte(), root.end_byte()))
    }
}

struct InlineBuilder<'a> {
    src: &'a str,
    references: &'a HashMap<String, LinkTarget>,
}

impl InlineBuilder<'_> {
    fn text(&self, node: Node) -> &str {
        self.src.get(node.byte_range()).unwrap_or_default()
    }

    /// Inline content of `node` between `start` and `end`, with the gaps
    /// between named children taken as literal text.
    fn range(&self, node: Node, start: usize, end: usize) -> Vec<Inline> {
        let mut out = Vec::new();
        let mut pos = start;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.end_byte() <= start || child.start_byte() >= end {
                continue;
            }
            if child.start_byte() > pos {
                push_text(&mut out, self.src.get(pos..child.start_byte()).unwrap_or_default());
            }
            self.element(child, &mut out);
            pos = pos.max(child.end_byte());
        }
        if end > pos {
            push_text(&mut out, self.src.get(pos..end).unwrap_or_default());
        }
        out
    }

    fn children(&self, node: Node) -> Vec<Inline> {
        self.range(node, node.start_byte(), node.end_byte())
    }

    /// Content of a bracketed node such as `[text]` or `![alt]`.
    fn bracketed(&self, node: Node) -> Vec<Inline> {
        let raw = self.text(node);
        let mut start = node.start_byte();
        let mut end = node.end_byte();
        if raw.starts_with("![") {
            start += 2;
        } else if raw.starts_with('[') {
            start += 1;
        }
        if raw.ends_with(']') && end > start {
            end -= 1;
        }
        self.range(node, start, end)
    }

    fn element(&self, node: Node, out: &mut Vec<Inline>) {
        match node.kind() {
            "emphasis_delimiter" | "code_span_delimiter" => {}
            "emphasis" => out.push(Inline::Emphasis(self.children(node))),
            "strong_emphasis" => out.push(Inline::Strong(self.children(node))),
            "strikethrough" => out.push(Inline::Strikethrough(self.children(node))),
            "code_span" => out.push(Inline::Code(code_span(self.text(node)))),
            "inline_link" | "full_reference_link" | "collapsed_reference_link"
            | "shortcut_link" => match self.link(node) {
                Some(link) => out.push(link),
                None => push_text(out, self.text(node)),
            },
            "image" => match self.image(node) {
                Some(image) => out.push(image),
                None => push_text(out, self.text(node)),
            },
            "uri_autolink" => {
                let href = self.text(node).trim_start_matches('<').trim_end_matches('>');
                out.push(Inline::Link {
                    href: href.to_string(),
                    title: None,
                    children: vec![Inline::Text(href.to_string())],
                });
            }
            "email_autolink" => {
                let email = self.text(node).trim_start_matches('<').trim_end_matches('>');
                out.push(Inline::Link {
                    href: format!("mailto:{email}"),
                    title: None,
                    children: vec![Inline::Text(email.to_string())],
                });
            }
            "hard_line_break" => out.push(Inline::Break),
            "backslash_escape" => push_text(out, self.text(node).get(1..).unwrap_or_default()),
            "entity_reference" | "numeric_character_reference" => {
                push_text(out, &decode_entity(self.text(node)));
            }
            "html_tag" => out.push(Inline::Html(self.text(node).to_string())),
            _ => push_text(out, self.text(node)),
        }
    }

    fn link(&self, node: Node) -> Option<Inline> {
        let mut children = Vec::new();
        let mut label_text = None;
        let mut href = None;
        let mut title = None;
        let mut label = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "link_text" => {
                    children = self.bracketed(child);
                    label_text = Some(self.text(child));
                }
                "link_destination" => href = Some(strip_destination(self.text(child))),
                "link_title" => title = Some(strip_title(self.text(child))),
                "link_label" => label = Some(self.text(child)),
                _ => {}
            }
        }

        if href.is_none() {
            let key = normalize_label(label.filter(|l| l.len() > 2).or(label_text)?);
            let target = self.references.get(&key)?;
            href = Some(target.href.clone());
            title = title.or_else(|| target.title.clone());
        }

        Some(Inline::Link {
            href: href?,
            title,
            children,
        })
    }

    fn image(&self, node: Node) -> Option<Inline> {
        let mut alt = String::new();
        let mut src = None;
        let mut title = None;
        let mut label = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "image_description" => {
                    alt = plain_text(&self.bracketed(child));
                    label = label.or(Some(self.text(child)));
                }
                "link_destination" => src = Some(strip_destination(self.text(child))),
                "link_title" => title = Some(strip_title(self.text(child))),
                "link_label" => label = Some(self.text(child)),
                _ => {}
            }
        }

        if src.is_none() {
            let target = self.references.get(&normalize_label(label?))?;
            src = Some(target.href.clone());
            title = title.or_else(|| target.title.clone());
        }

        Some(Inline::Image {
            src: src?,
            alt,
            title,
        })
    }
}

fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

fn child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == kind);
    found
}

/// Reference labels match case-insensitively with whitespace collapsed.
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('!')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn strip_destination(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix('<')
        .and_then(|r| r.strip_suffix('>'))
        .unwrap_or(raw)
        .to_string()
}

fn strip_title(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some('"'), Some('"')) | (Some('\''), Some('\'')) | (Some('('), Some(')')) => {
            chars.as_str().to_string()
        }
        _ => raw.to_string(),
    }
}

fn code_span(raw: &str) -> String {
    let inner = raw.trim_matches('`').replace('\n', " ");
    // One leading and trailing space is stripped when both are present
    let padded = inner.len() > 2 && inner.starts_with(' ') && inner.ends_with(' ');
    if padded && !inner.trim().is_empty() {
        inner[1..inner.len() - 1].to_string()
    } else {
        inner
    }
}

fn meta_title(meta: &str) -> Option<String> {
    let rest = &meta[meta.find("title=")? + "title=".len()..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

fn alignment(delimiter: &str) -> Alignment {
    match (delimiter.starts_with(':'), delimiter.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    }
}

fn dedent_indented(code: &str) -> String {
    code.lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix('\t') {
                rest
            } else {
                let indent = line.len() - line.trim_start_matches(' ').len();
                &line[indent.min(4)..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end_matches('\n')
        .to_string()
}

#[cfg(test)]
#[path = "tests/parse.rs"]
mod tests;
