use super::{Components, ElementKind, Props};
use crate::tree::{Attributes, Node};

#[test]
fn test_defaults_cover_every_kind() {
    let components = Components::default();
    for kind in ElementKind::ALL {
        let node = components.element(kind, kind.default_tag(), Attributes::new(), vec![]);
        assert_eq!(node.tag(), Some(kind.default_tag()));
    }
}

#[test]
fn test_override_replaces_only_its_kind() {
    let components = Components::default().with(ElementKind::Link, |mut props: Props| {
        props
            .attrs
            .insert("target".to_string(), "_blank".to_string());
        Node::element(props.tag, props.attrs, props.children)
    });

    let link = components.element(ElementKind::Link, "a", Attributes::new(), vec![]);
    assert_eq!(link.attr("target"), Some("_blank"));

    let para = components.element(ElementKind::Paragraph, "p", Attributes::new(), vec![]);
    assert_eq!(para.attr("target"), None);
}

#[test]
fn test_merge_later_entries_win() {
    let wrap: super::Component = std::sync::Arc::new(|props: Props| {
        Node::element("figure", Attributes::new(), vec![super::default_component(props)])
    });
    let components = Components::default()
        .with(ElementKind::CodeBlock, |props: Props| Node::group(props.children))
        .merge([(ElementKind::CodeBlock, wrap)]);

    let node = components.element(
        ElementKind::CodeBlock,
        "pre",
        Attributes::new(),
        vec![Node::text("x")],
    );
    assert_eq!(node.tag(), Some("figure"));
    assert_eq!(node.children()[0].tag(), Some("pre"));
}

#[test]
fn test_component_receives_kind_and_tag() {
    let components = Components::default().with(ElementKind::Heading, |props: Props| {
        assert_eq!(props.kind, ElementKind::Heading);
        Node::text(props.tag)
    });
    let node = components.element(ElementKind::Heading, "h3", Attributes::new(), vec![]);
    assert_eq!(node, Node::text("h3"));
}
