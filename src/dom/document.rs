// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use super::node::{Node, NodeData, NodeId, NodeType};

/// Parsed HTML document
///
/// Nodes live in an arena indexed by [`NodeId`]; the document node is always
/// at index 0. A document is never modified after parsing, so two parses of
/// the same markup compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create an empty document holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::document()],
        }
    }

    /// Append a node under `parent` (called during parsing)
    pub(crate) fn append(&mut self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        data.parent = Some(parent);
        self.nodes.push(data);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no content
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Get the root (document) node
    pub fn root(&self) -> Node<'_> {
        Node::new(self, NodeId(0))
    }

    /// Look up a node by ID
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// Get the document element (<html>)
    pub fn document_element(&self) -> Option<Node<'_>> {
        self.root().child_elements().next()
    }

    /// Get the <head> element
    pub fn head(&self) -> Option<Node<'_>> {
        self.document_element()?
            .child_elements()
            .find(|n| n.tag_name() == Some("head"))
    }

    /// Get the <body> element
    pub fn body(&self) -> Option<Node<'_>> {
        self.document_element()?
            .child_elements()
            .find(|n| n.tag_name() == Some("body"))
    }

    /// Get the doctype name, if the markup declared one
    pub fn doctype(&self) -> Option<&str> {
        self.root()
            .children()
            .find(|n| n.node_type() == NodeType::DocumentType)
            .and_then(|n| n.doctype_name())
    }

    /// Text of the first <title> element, trimmed
    pub fn title(&self) -> Option<String> {
        self.get_elements_by_tag_name("title")
            .first()
            .map(|t| t.text_content().trim().to_string())
    }

    /// All elements with the given tag name, in document order
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<Node<'_>> {
        let tag = tag.to_lowercase();
        self.root()
            .descendants()
            .filter(|n| n.tag_name() == Some(tag.as_str()))
            .collect()
    }

    /// First element whose `id` attribute matches
    pub fn get_element_by_id(&self, id: &str) -> Option<Node<'_>> {
        self.root()
            .descendants()
            .find(|n| n.is_element() && n.attribute("id") == Some(id))
    }

    /// Text content of the whole document
    pub fn text_content(&self) -> String {
        self.root().text_content()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.root().node_type(), NodeType::Document);
        assert!(doc.document_element().is_none());
        assert!(doc.title().is_none());
    }

    #[test]
    fn test_append_links_parent_and_children() {
        let mut doc = Document::new();
        let html = doc.append(NodeId(0), NodeData::element("HTML"));
        let body = doc.append(html, NodeData::element("body"));
        doc.append(body, NodeData::text("hi"));

        assert_eq!(doc.document_element().and_then(|n| n.tag_name()), Some("html"));
        let body_node = doc.body().unwrap();
        assert_eq!(body_node.id(), body);
        assert_eq!(body_node.parent().map(|p| p.id()), Some(html));
        assert_eq!(body_node.text_content(), "hi");
        assert!(doc.node(NodeId(99)).is_none());
    }
}
