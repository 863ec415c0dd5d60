// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use super::document::Document;

/// Index of a node inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Get the raw index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// Internal node data
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub node_type: NodeType,
    /// Lowercased tag name for elements, doctype name for doctypes
    pub name: Option<String>,
    /// Text or comment contents
    pub text: Option<String>,
    /// Element attributes in source order
    pub attributes: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub fn document() -> Self {
        Self::with_type(NodeType::Document)
    }

    pub fn doctype(name: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::DocumentType);
        data.name = Some(name.into());
        data
    }

    pub fn element(tag_name: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Element);
        data.name = Some(tag_name.into().to_lowercase());
        data
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Text);
        data.text = Some(content.into());
        data
    }

    pub fn comment(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Comment);
        data.text = Some(content.into());
        data
    }

    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            name: None,
            text: None,
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Borrowed handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    fn data(&self) -> &'a NodeData {
        self.doc.data(self.id)
    }

    /// Node ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Node type
    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    /// Check if this is an element
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Tag name (lowercase) for elements
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.node_type() {
            NodeType::Element => self.data().name.as_deref(),
            _ => None,
        }
    }

    /// Doctype name for `<!DOCTYPE>` nodes
    pub fn doctype_name(&self) -> Option<&'a str> {
        match self.node_type() {
            NodeType::DocumentType => self.data().name.as_deref(),
            _ => None,
        }
    }

    /// Raw contents of a text or comment node
    pub fn text(&self) -> Option<&'a str> {
        self.data().text.as_deref()
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.data()
            .attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Parent node
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| Node::new(self.doc, id))
    }

    /// Child nodes in document order
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| Node::new(doc, id))
    }

    /// Child elements only
    pub fn child_elements(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.children().filter(|n| n.is_element())
    }

    /// All descendants in document order (excluding self)
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.data().children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match self.node_type() {
            NodeType::Text | NodeType::Comment => self.text().unwrap_or_default().to_string(),
            _ => self
                .descendants()
                .filter(|n| n.node_type() == NodeType::Text)
                .filter_map(|n| n.text())
                .collect(),
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let data = self.doc.data(id);
        self.stack.extend(data.children.iter().rev().copied());
        Some(Node::new(self.doc, id))
    }
}
