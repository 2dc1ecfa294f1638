//! Page to component tree rendering.
//!
//! One linear pass over the page's blocks, emitting a node per block through
//! the component table. The result depends only on the page, the components
//! and the highlighter, so rendering the same page twice yields the same tree.

use crate::components::{Components, ElementKind};
use crate::highlight::Highlighter;
use crate::inline::Inline;
use crate::page::{Alignment, Block, CodeBlock, Heading, List, Page, Table};
use crate::tree::{Attributes, Node};
use std::sync::Arc;
use tracing::debug;

/// Renders pages with a fixed component table and highlighter.
#[derive(Clone)]
pub struct Renderer {
    components: Components,
    highlighter: Arc<dyn Highlighter>,
}

impl Renderer {
    #[must_use]
    /// Renderer with default components.
    pub fn new(highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            components: Components::default(),
            highlighter,
        }
    }

    #[must_use]
    /// Replace the component table.
    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }

    #[must_use]
    /// Render a page into a tree rooted at a group node.
    pub fn render(&self, page: &Page) -> Node {
        debug!(title = page.title(), blocks = page.blocks().len(), "rendering page");
        Node::group(self.blocks(page.blocks()))
    }

    fn blocks(&self, blocks: &[Block]) -> Vec<Node> {
        blocks.iter().map(|block| self.block(block)).collect()
    }

    fn block(&self, block: &Block) -> Node {
        let c = &self.components;
        match block {
            Block::Heading(heading) => self.heading(heading),
            Block::Paragraph(inlines) => c.element(
                ElementKind::Paragraph,
                "p",
                Attributes::new(),
                self.inlines(inlines),
            ),
            Block::List(list) => self.list(list),
            Block::CodeBlock(code) => self.code_block(code),
            Block::BlockQuote(inner) => c.element(
                ElementKind::BlockQuote,
                "blockquote",
                Attributes::new(),
                self.blocks(inner),
            ),
            Block::Table(table) => self.table(table),
            Block::ThematicBreak => {
                c.element(ElementKind::ThematicBreak, "hr", Attributes::new(), Vec::new())
            }
            Block::Html(html) => Node::Raw { html: html.clone() },
        }
    }

    fn heading(&self, heading: &Heading) -> Node {
        let mut attrs = Attributes::new();
        attrs.insert("id".to_string(), heading.id.clone());
        self.components.element(
            ElementKind::Heading,
            format!("h{}", heading.depth),
            attrs,
            self.inlines(&heading.content),
        )
    }

    fn list(&self, list: &List) -> Node {
        let c = &self.components;
        let mut attrs = Attributes::new();
        if let Some(start) = list.start.filter(|start| *start != 1) {
            attrs.insert("start".to_string(), start.to_string());
        }

        let items = list
            .items
            .iter()
            .map(|item| {
                let mut children = Vec::new();
                let mut item_attrs = Attributes::new();
                if let Some(checked) = item.checked {
                    item_attrs.insert("class".to_string(), "task-list-item".to_string());
                    let mut input = Attributes::new();
                    input.insert("type".to_string(), "checkbox".to_string());
                    input.insert("disabled".to_string(), String::new());
                    if checked {
                        input.insert("checked".to_string(), String::new());
                    }
                    children.push(c.element(ElementKind::TaskMarker, "input", input, Vec::new()));
                }
                match item.blocks.as_slice() {
                    [Block::Paragraph(inlines)] => children.extend(self.inlines(inlines)),
                    blocks => children.extend(self.blocks(blocks)),
                }
                c.element(ElementKind::ListItem, "li", item_attrs, children)
            })
            .collect();

        let tag = if list.ordered { "ol" } else { "ul" };
        c.element(ElementKind::List, tag, attrs, items)
    }

    fn code_block(&self, code: &CodeBlock) -> Node {
        let c = &self.components;
        let mut pre_attrs = Attributes::new();
        if let Some(language) = &code.language {
            pre_attrs.insert("data-language".to_string(), language.clone());
        }
        if let Some(title) = &code.title {
            pre_attrs.insert("data-title".to_string(), title.clone());
        }
        if let Some(background) = self.highlighter.background() {
            pre_attrs.insert("style".to_string(), format!("background-color:{background}"));
        }

        let mut lines = Vec::new();
        for (i, line) in self
            .highlighter
            .highlight(&code.code, code.language.as_deref())
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                lines.push(Node::text("\n"));
            }
            let spans = line
                .into_iter()
                .map(|span| match span.style {
                    Some(style) => {
                        let mut attrs = Attributes::new();
                        attrs.insert("style".to_string(), style.css());
                        c.element(
                            ElementKind::CodeToken,
                            "span",
                            attrs,
                            vec![Node::text(span.text)],
                        )
                    }
                    None => Node::text(span.text),
                })
                .collect();
            let mut line_attrs = Attributes::new();
            line_attrs.insert("class".to_string(), "line".to_string());
            lines.push(c.element(ElementKind::CodeLine, "span", line_attrs, spans));
        }

        let code_node = c.element(ElementKind::Code, "code", Attributes::new(), lines);
        c.element(ElementKind::CodeBlock, "pre", pre_attrs, vec![code_node])
    }

    fn table(&self, table: &Table) -> Node {
        let c = &self.components;
        let row = |cells: &[Vec<Inline>], tag: &str| {
            let cells = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let mut attrs = Attributes::new();
                    let align = table.alignments.get(i).copied().and_then(Alignment::as_attr);
                    if let Some(align) = align {
                        attrs.insert("align".to_string(), align.to_string());
                    }
                    c.element(ElementKind::TableCell, tag, attrs, self.inlines(cell))
                })
                .collect();
            c.element(ElementKind::TableRow, "tr", Attributes::new(), cells)
        };

        let head = c.element(
            ElementKind::TableHead,
            "thead",
            Attributes::new(),
            vec![row(table.header.as_slice(), "th")],
        );
        let mut children = vec![head];
        if !table.rows.is_empty() {
            let body = table.rows.iter().map(|cells| row(cells.as_slice(), "td")).collect();
            children.push(c.element(ElementKind::TableBody, "tbody", Attributes::new(), body));
        }
        c.element(ElementKind::Table, "table", Attributes::new(), children)
    }

    fn inlines(&self, inlines: &[Inline]) -> Vec<Node> {
        inlines.iter().map(|inline| self.inline(inline)).collect()
    }

    fn inline(&self, inline: &Inline) -> Node {
        let c = &self.components;
        match inline {
            Inline::Text(text) => Node::text(text.clone()),
            Inline::Code(code) => c.element(
                ElementKind::Code,
                "code",
                Attributes::new(),
                vec![Node::text(code.clone())],
            ),
            Inline::Emphasis(children) => c.element(
                ElementKind::Emphasis,
                "em",
                Attributes::new(),
                self.inlines(children),
            ),
            Inline::Strong(children) => c.element(
                ElementKind::Strong,
                "strong",
                Attributes::new(),
                self.inlines(children),
            ),
            Inline::Strikethrough(children) => c.element(
                ElementKind::Strikethrough,
                "del",
                Attributes::new(),
                self.inlines(children),
            ),
            Inline::Link {
                href,
                title,
                children,
            } => {
                let mut attrs = Attributes::new();
                attrs.insert("href".to_string(), href.clone());
                if let Some(title) = title {
                    attrs.insert("title".to_string(), title.clone());
                }
                c.element(ElementKind::Link, "a", attrs, self.inlines(children))
            }
            Inline::Image { src, alt, title } => {
                let mut attrs = Attributes::new();
                attrs.insert("src".to_string(), src.clone());
                attrs.insert("alt".to_string(), alt.clone());
                if let Some(title) = title {
                    attrs.insert("title".to_string(), title.clone());
                }
                c.element(ElementKind::Image, "img", attrs, Vec::new())
            }
            Inline::Break => c.element(ElementKind::LineBreak, "br", Attributes::new(), Vec::new()),
            Inline::Html(html) => Node::Raw { html: html.clone() },
        }
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
