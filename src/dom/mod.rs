// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Parsed HTML documents
//!
//! `text/html` response bodies are parsed with html5ever and copied into an
//! immutable, navigable tree.

mod document;
mod node;
mod parser;

pub use document::Document;
pub use node::{Descendants, Node, NodeId, NodeType};
pub use parser::parse_html;
