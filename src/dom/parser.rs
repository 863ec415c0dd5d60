// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{NodeData, NodeId};

/// Parse an HTML string into a Document
///
/// Malformed markup never fails; html5ever recovers the way a browser would
/// and its parse errors are discarded.
pub fn parse_html(html: &str) -> Document {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts).one(html);

    let mut doc = Document::new();
    convert(&dom.document, &mut doc);

    tracing::trace!(nodes = doc.len(), "Parsed HTML document");
    doc
}

/// Copy the html5ever tree into the document arena, in document order
fn convert(document: &Handle, doc: &mut Document) {
    let root_id = doc.root().id();

    // Work stack of (node, parent); children are pushed reversed so they
    // pop in source order.
    let mut stack: Vec<(Handle, NodeId)> = document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root_id))
        .collect();

    while let Some((handle, parent_id)) = stack.pop() {
        let data = match handle.data {
            RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => continue,
            RcNodeData::Doctype { ref name, .. } => NodeData::doctype(name.to_string()),
            RcNodeData::Text { ref contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() && text.len() > 1 {
                    // Skip whitespace-only text nodes (but keep single spaces)
                    continue;
                }
                NodeData::text(text)
            }
            RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
            RcNodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let mut data = NodeData::element(name.local.to_string());
                data.attributes = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                data
            }
        };

        let node_id = doc.append(parent_id, data);
        for child in handle.children.borrow().iter().rev() {
            stack.push((child.clone(), node_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeType;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_html("<html><body><p>Hello</p></body></html>");
        assert!(doc.body().is_some());
        assert!(doc.head().is_some());
        let paragraphs = doc.get_elements_by_tag_name("p");
        assert_eq!(paragraphs[0].text_content(), "Hello");
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_html("<div id=\"test\" class=\"foo bar\">content</div>");
        let div = doc.get_element_by_id("test").unwrap();
        assert_eq!(div.tag_name(), Some("div"));
        assert_eq!(div.attribute("class"), Some("foo bar"));
        assert_eq!(div.attributes().count(), 2);
    }

    #[test]
    fn test_parse_complex_html() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>Test Page</title>
            </head>
            <body>
                <div id="container">
                    <h1>Hello World</h1>
                    <p class="content">This is a test.</p>
                    <a href="https://example.com">Link</a>
                </div>
            </body>
            </html>
        "#;
        let doc = parse_html(html);

        assert_eq!(doc.doctype(), Some("html"));
        assert_eq!(doc.title().as_deref(), Some("Test Page"));

        let headings = doc.get_elements_by_tag_name("H1");
        assert_eq!(headings[0].text_content(), "Hello World");
        assert_eq!(headings[0].parent().and_then(|p| p.attribute("id")), Some("container"));

        let links = doc.get_elements_by_tag_name("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attribute("href"), Some("https://example.com"));
    }

    #[test]
    fn test_malformed_markup_is_recovered() {
        let doc = parse_html("<p>unclosed <b>bold <i>both</p><div>after");
        assert!(doc.body().is_some());
        assert_eq!(doc.get_elements_by_tag_name("div").len(), 1);
        assert!(doc.text_content().contains("after"));
    }

    #[test]
    fn test_comments_are_kept() {
        let doc = parse_html("<body><!-- note --><p>x</p></body>");
        let body = doc.body().unwrap();
        let first = body.children().next().unwrap();
        assert_eq!(first.node_type(), NodeType::Comment);
        assert_eq!(first.text(), Some(" note "));
    }

    #[test]
    fn test_same_markup_parses_equal() {
        let html = "<!doctype html><title>t</title><p>a<p>b";
        assert_eq!(parse_html(html), parse_html(html));
    }
}
