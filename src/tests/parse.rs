use super::PageParser;
use crate::error::Error;
use crate::formats::markdown::MarkdownFormat;
use crate::inline::{plain_text, Inline};
use crate::page::{Alignment, Block, Page};
use crate::slug::FALLBACK_SLUG;
use crate::structure::extract_structured_data;
use crate::toc::{extract_toc, TocOptions};

fn parse(source: &str) -> Page {
    try_parse(source).unwrap()
}

fn try_parse(source: &str) -> crate::error::Result<Page> {
    let mut parser = PageParser::new(&MarkdownFormat).unwrap();
    parser.parse(source, "fallback")
}

fn paragraph(block: &Block) -> &[Inline] {
    match block {
        Block::Paragraph(inlines) => inlines,
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_scenario_toc_and_structured_data() {
    let page = parse("para A\n\n## foo\n\npara B\n\n### bar\n\npara C\n");

    assert_eq!(page.title(), "fallback");
    let toc: Vec<(u8, String)> = extract_toc(&page, TocOptions::default())
        .into_iter()
        .map(|entry| (entry.depth, entry.anchor))
        .collect();
    assert_eq!(toc, vec![(2, "foo".to_string()), (3, "bar".to_string())]);

    let contents: Vec<(Option<String>, String)> = extract_structured_data(&page)
        .contents
        .into_iter()
        .map(|s| (s.heading, s.content))
        .collect();
    assert_eq!(
        contents,
        vec![
            (None, "para A".to_string()),
            (Some("foo".to_string()), "para B".to_string()),
            (Some("bar".to_string()), "para C".to_string()),
        ]
    );
}

#[test]
fn test_leading_h1_becomes_title() {
    let page = parse("# Address Type\n\nAn address is 20 bytes.\n\n## Members\n\nText.\n");

    assert_eq!(page.title(), "Address Type");
    assert!(matches!(page.blocks()[0], Block::Paragraph(_)));
    assert_eq!(page.headings().len(), 1);
    assert_eq!(page.headings()[0].id, "members");
}

#[test]
fn test_frontmatter_title_wins() {
    let page = parse(
        "+++\ntitle = \"Events\"\ndescription = \"Logs\"\n+++\n# Heading One\n\nBody.\n",
    );

    assert_eq!(page.title(), "Events");
    assert_eq!(page.frontmatter().description.as_deref(), Some("Logs"));
    assert_eq!(page.headings()[0].id, "heading-one");
    assert_eq!(page.headings()[0].depth, 1);
}

#[test]
fn test_setext_headings() {
    let page = parse("Intro\n\nSection\n-------\n\nBody.\n");
    let headings = page.headings();
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].depth, 2);
    assert_eq!(headings[0].id, "section");
}

#[test]
fn test_repeated_headings_get_suffixes() {
    let page = parse("## Example\n\nA\n\n## Example\n\nB\n\n## Example\n\nC\n");
    let ids: Vec<&str> = page.headings().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["example", "example-1", "example-2"]);
}

#[test]
fn test_custom_heading_id() {
    let page = parse("## The `emit` statement [#emit]\n\nText.\n");
    let heading = page.headings()[0];
    assert_eq!(heading.id, "emit");
    assert_eq!(heading.text(), "The emit statement");
}

#[test]
fn test_duplicate_explicit_id_is_rejected() {
    let result = try_parse("## One [#same]\n\n## Two [#same]\n");
    assert!(matches!(result, Err(Error::DuplicateHeadingId { .. })));
}

#[test]
fn test_heading_slug_uses_inline_text() {
    let page = parse("## Calling `self.emit()` safely\n");
    assert_eq!(page.headings()[0].id, "calling-selfemit-safely");
}

#[test]
fn test_fenced_code_block() {
    let page = parse("```fe title=\"erc20.fe\"\ncontract Token {\n    pub fn total() {}\n}\n```\n");

    match &page.blocks()[0] {
        Block::CodeBlock(code) => {
            assert_eq!(code.language.as_deref(), Some("fe"));
            assert_eq!(code.title.as_deref(), Some("erc20.fe"));
            assert_eq!(code.code, "contract Token {\n    pub fn total() {}\n}");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn test_fence_without_language() {
    let page = parse("```\nplain\n```\n");
    match &page.blocks()[0] {
        Block::CodeBlock(code) => {
            assert_eq!(code.language, None);
            assert_eq!(code.code, "plain");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn test_inline_markup() {
    let page = parse("Use **bold** and `code` and [link](https://fe.dev \"Fe\").\n");
    let inlines = paragraph(&page.blocks()[0]);

    assert_eq!(
        inlines,
        &[
            Inline::Text("Use ".to_string()),
            Inline::Strong(vec![Inline::Text("bold".to_string())]),
            Inline::Text(" and ".to_string()),
            Inline::Code("code".to_string()),
            Inline::Text(" and ".to_string()),
            Inline::Link {
                href: "https://fe.dev".to_string(),
                title: Some("Fe".to_string()),
                children: vec![Inline::Text("link".to_string())],
            },
            Inline::Text(".".to_string()),
        ]
    );
}

#[test]
fn test_emphasis_and_escapes() {
    let page = parse("An *emphasised* word, a \\*literal\\* star and Tom &amp; Jerry.\n");
    let inlines = paragraph(&page.blocks()[0]);

    assert!(inlines.contains(&Inline::Emphasis(vec![Inline::Text(
        "emphasised".to_string()
    )])));
    assert_eq!(
        plain_text(inlines),
        "An emphasised word, a *literal* star and Tom & Jerry."
    );
}

#[test]
fn test_reference_links_resolve() {
    let page = parse("See [the book][fe] and [fe].\n\n[fe]: https://fe-lang.org \"Fe\"\n");
    let inlines = paragraph(&page.blocks()[0]);

    let links: Vec<(&str, &str)> = inlines
        .iter()
        .filter_map(|inline| match inline {
            Inline::Link { href, children, .. } => {
                Some((href.as_str(), match children.first() {
                    Some(Inline::Text(t)) => t.as_str(),
                    _ => "",
                }))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        links,
        vec![("https://fe-lang.org", "the book"), ("https://fe-lang.org", "fe")]
    );
    // Definitions are not content
    assert_eq!(page.blocks().len(), 1);
}

#[test]
fn test_lists() {
    let page = parse("- one\n- two\n\n3. three\n4. four\n");

    let lists: Vec<_> = page
        .blocks()
        .iter()
        .filter_map(|b| match b {
            Block::List(list) => Some(list),
            _ => None,
        })
        .collect();
    assert_eq!(lists.len(), 2);
    assert!(!lists[0].ordered);
    assert_eq!(lists[0].items.len(), 2);
    assert_eq!(
        plain_text(paragraph(&lists[0].items[1].blocks[0])),
        "two"
    );
    assert!(lists[1].ordered);
    assert_eq!(lists[1].start, Some(3));
}

#[test]
fn test_block_quote() {
    let page = parse("> Quoted **text**\n");
    match &page.blocks()[0] {
        Block::BlockQuote(inner) => {
            assert_eq!(plain_text(paragraph(&inner[0])), "Quoted text");
        }
        other => panic!("expected block quote, got {other:?}"),
    }
}

#[test]
fn test_pipe_table() {
    let page = parse("| Op | Cost |\n|:---|---:|\n| add | 3 |\n| mul | 5 |\n");
    match &page.blocks()[0] {
        Block::Table(table) => {
            assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Right]);
            assert_eq!(plain_text(&table.header[0]), "Op");
            assert_eq!(table.rows.len(), 2);
            assert_eq!(plain_text(&table.rows[1][1]), "5");
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn test_thematic_break_and_html() {
    let page = parse("Before\n\n---\n\n<div class=\"note\">hi</div>\n");
    assert!(page.blocks().contains(&Block::ThematicBreak));
    assert!(page
        .blocks()
        .iter()
        .any(|b| matches!(b, Block::Html(html) if html.contains("note"))));
}

#[test]
fn test_parser_is_reusable() {
    let mut parser = PageParser::new(&MarkdownFormat).unwrap();
    let first = parser.parse("## A\n\nx\n", "one").unwrap();
    let second = parser.parse("## A\n\nx\n", "one").unwrap();
    // Slugs do not leak between pages
    assert_eq!(first, second);
    assert_eq!(second.headings()[0].id, "a");
}

#[test]
fn test_bad_frontmatter_fails() {
    let result = try_parse("+++\ntitle = \n+++\nBody\n");
    assert!(matches!(result, Err(Error::Frontmatter { .. })));
}

#[test]
fn test_punctuation_survives_in_paragraphs() {
    let page = parse("para a ?\n\nCall f(x) {y} with 'z' [sic].\n");
    assert_eq!(plain_text(paragraph(&page.blocks()[0])), "para a ?");
    assert_eq!(
        plain_text(paragraph(&page.blocks()[1])),
        "Call f(x) {y} with 'z' [sic]."
    );
}

#[test]
fn test_block_quote_strips_only_markers() {
    let page = parse("> a {b}?\n> c (d).\n");
    match &page.blocks()[0] {
        Block::BlockQuote(inner) => {
            let text = plain_text(paragraph(&inner[0]));
            assert!(text.starts_with("a {b}?"), "got {text:?}");
            assert!(text.ends_with("c (d)."), "got {text:?}");
            assert!(!text.contains('>'));
        }
        other => panic!("expected block quote, got {other:?}"),
    }
}

#[test]
fn test_list_item_continuation_keeps_punctuation() {
    let page = parse("- first (one),\n  still one.\n- second!\n");
    match &page.blocks()[0] {
        Block::List(list) => {
            let first = plain_text(paragraph(&list.items[0].blocks[0]));
            assert!(first.starts_with("first (one),"), "got {first:?}");
            assert!(first.ends_with("still one."), "got {first:?}");
            assert_eq!(plain_text(paragraph(&list.items[1].blocks[0])), "second!");
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn test_code_span_only_paragraph() {
    let page = parse("`+`\n");
    assert_eq!(paragraph(&page.blocks()[0]), &[Inline::Code("+".to_string())]);
}

#[test]
fn test_fenced_code_in_block_quote() {
    let page = parse("> ```\n> let x = (1);\n> ```\n");
    match &page.blocks()[0] {
        Block::BlockQuote(inner) => match &inner[0] {
            Block::CodeBlock(code) => assert_eq!(code.code, "let x = (1);"),
            other => panic!("expected code block, got {other:?}"),
        },
        other => panic!("expected block quote, got {other:?}"),
    }
}

#[test]
fn test_heading_punctuation_reaches_toc() {
    let page = parse("## What's new?\n\n## Use `x` here\n\n## Operator `+`\n");

    assert!(page.headings()[1]
        .content
        .contains(&Inline::Code("x".to_string())));
    let toc: Vec<(String, String)> = extract_toc(&page, TocOptions::default())
        .into_iter()
        .map(|entry| (entry.anchor, entry.title))
        .collect();
    assert_eq!(
        toc,
        vec![
            ("whats-new".to_string(), "What's new?".to_string()),
            ("use-x-here".to_string(), "Use x here".to_string()),
            ("operator-".to_string(), "Operator +".to_string()),
        ]
    );
}

#[test]
fn test_unsluggable_headings_get_fallback_ids() {
    let page = parse("##\n\nempty\n\n## ???\n\nmarks\n");
    let ids: Vec<&str> = page.headings().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec![FALLBACK_SLUG, "section-1"]);
}
