//! Flattened document tree that extraction rules navigate.
//!
//! The parsed HTML is copied into a preorder arena: a node's id is its
//! position in document order, so "the next node after X" is `X + 1` and a
//! subtree is the contiguous id range `X..end`.

use std::collections::HashMap;
use std::ops::Range;

use regex::Regex;
use scraper::{Html, Node};

/// Index of a node in document order.
pub type NodeId = usize;

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// Element with its lowercase tag name.
    Element(String),
    Text(String),
    /// Comments, doctypes and processing instructions.
    Other,
}

#[derive(Debug, Clone)]
struct DomNode {
    kind: NodeKind,
    children: Vec<NodeId>,
    /// One past the last id in this node's subtree.
    end: NodeId,
}

/// A single invoice page, ready for anchor search and positional hops.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    nodes: Vec<DomNode>,
    /// Ids searched for anchors: the `<body>` subtree when there is one.
    scope: Range<NodeId>,
}

impl InvoiceDocument {
    /// Parse an HTML string.
    pub fn parse(html: &str) -> Self {
        Self::from_html(&Html::parse_document(html))
    }

    /// Flatten an already parsed document.
    pub fn from_html(html: &Html) -> Self {
        let mut nodes: Vec<DomNode> = Vec::new();
        let mut ids = HashMap::new();

        for node in html.tree.root().descendants() {
            let id = nodes.len();
            ids.insert(node.id(), id);

            let parent = node.parent().and_then(|p| ids.get(&p.id()).copied());
            let kind = match node.value() {
                Node::Document => NodeKind::Document,
                Node::Element(element) => NodeKind::Element(element.name().to_string()),
                Node::Text(text) => NodeKind::Text(String::from(&**text)),
                _ => NodeKind::Other,
            };

            if let Some(parent) = parent {
                nodes[parent].children.push(id);
            }
            nodes.push(DomNode {
                kind,
                children: Vec::new(),
                end: id + 1,
            });
        }

        // Children always follow their parent, so a reverse pass sees every
        // child's final `end` before the parent's.
        for id in (0..nodes.len()).rev() {
            if let Some(&last) = nodes[id].children.last() {
                nodes[id].end = nodes[last].end;
            }
        }

        let scope = nodes
            .iter()
            .position(|n| matches!(&n.kind, NodeKind::Element(name) if name == "body"))
            .map(|body| body..nodes[body].end)
            .unwrap_or(0..nodes.len());

        Self { nodes, scope }
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id).map(|n| &n.kind)
    }

    /// Text of a text node; `None` for any other node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of every text node in the subtree of `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(id) else {
            return String::new();
        };
        (id..node.end).filter_map(|i| self.text(i)).collect()
    }

    /// First text node in scope whose text matches `pattern`.
    pub fn find_text(&self, pattern: &Regex) -> Option<NodeId> {
        self.scope
            .clone()
            .find(|&id| self.text(id).is_some_and(|t| pattern.is_match(t)))
    }

    /// Every text node in scope whose text matches `pattern`, in document order.
    pub fn find_all_text(&self, pattern: &Regex) -> Vec<NodeId> {
        self.scope
            .clone()
            .filter(|&id| self.text(id).is_some_and(|t| pattern.is_match(t)))
            .collect()
    }

    /// First element after `id` in document order.
    pub fn next_element(&self, id: NodeId) -> Option<NodeId> {
        (id + 1..self.nodes.len()).find(|&i| matches!(self.nodes[i].kind, NodeKind::Element(_)))
    }

    /// First text node after `id` whose text is not blank.
    pub fn next_text(&self, id: NodeId) -> Option<NodeId> {
        (id + 1..self.nodes.len()).find(|&i| self.text(i).is_some_and(|t| !t.trim().is_empty()))
    }

    /// First text node after `id` containing `needle`.
    pub fn next_text_containing(&self, id: NodeId, needle: &str) -> Option<NodeId> {
        (id + 1..self.nodes.len()).find(|&i| self.text(i).is_some_and(|t| t.contains(needle)))
    }

    /// First text node from `id` on (inclusive) matching `pattern`. Gives up
    /// at any later text node matching `stop`.
    pub fn text_matching_until(
        &self,
        id: NodeId,
        pattern: &Regex,
        stop: &Regex,
    ) -> Option<NodeId> {
        for i in id..self.nodes.len() {
            let Some(text) = self.text(i) else {
                continue;
            };
            if i > id && stop.is_match(text) {
                return None;
            }
            if pattern.is_match(text) {
                return Some(i);
            }
        }
        None
    }
}
