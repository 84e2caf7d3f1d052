//! Arena DOM tree for the folio content pipeline.
//!
//! This crate holds the tree that the HTML parser builds and the document
//! parser walks. It follows the node model of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) only as far as a
//! content converter needs: documents, elements, text, and comments.
//!
//! # Design
//!
//! Nodes live in one vector and refer to each other through [`NodeId`]
//! indices, so parent and sibling links never fight the borrow checker and
//! traversals can be written without recursion.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// The kinds of node a fragment can contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The fragment root. Exactly one per tree, at [`NodeId::ROOT`].
    Document,
    /// An element with its local name and attributes.
    Element(ElementData),
    /// A run of character data.
    Text(String),
    /// A comment; kept so the tree mirrors the source, ignored downstream.
    Comment(String),
}

/// Element-specific data.
///
/// Only the local name and attribute list are stored. Namespaces do not
/// matter for content that ends up as paragraphs and images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The lowercase local name, e.g. `"p"` or `"img"`.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns an attribute value with surrounding whitespace removed.
    ///
    /// An attribute that is present but blank is reported as absent:
    /// `<a href="">` links nowhere and `<img src=" ">` shows nothing.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns the raw attribute value, untrimmed, if present.
    #[must_use]
    pub fn raw_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Elements whose character data is never visible content.
const INVISIBLE_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, the Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds only the Document node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Unknown ids are ignored; the builder only ever hands out ids it allocated.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Append character data under `parent`.
    ///
    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise,
    /// create a new Text node whose data is data."
    pub fn append_text(&mut self, parent: NodeId, data: &str) {
        if data.is_empty() {
            return;
        }
        if let Some(last) = self.last_child(parent)
            && let Some(Node {
                node_type: NodeType::Text(existing),
                ..
            }) = self.nodes.get_mut(last.0)
        {
            existing.push_str(data);
            return;
        }
        let text = self.alloc(NodeType::Text(data.to_string()));
        self.append_child(parent, text);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Iterate over every descendant of `id` in tree order (pre-order),
    /// excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The element's lowercase tag name, if `id` is an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node is the concatenation of the
    /// data of all the Text node descendants of node, in tree order."
    ///
    /// Unlike the standard getter, text inside `script`, `style`, `template`,
    /// and `noscript` is skipped: it is never visible content.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.as_text(id) {
            return text.to_string();
        }
        let mut out = String::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            match self.get(current).map(|n| &n.node_type) {
                Some(NodeType::Text(data)) => out.push_str(data),
                Some(NodeType::Element(data))
                    if !INVISIBLE_TEXT_ELEMENTS.contains(&data.tag_name.as_str()) =>
                {
                    stack.extend(self.children(current).iter().rev().copied());
                }
                _ => {}
            }
        }
        out
    }

    /// True if any descendant of `id` is an element satisfying `pred`.
    pub fn has_descendant_element<F>(&self, id: NodeId, pred: F) -> bool
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(id)
            .filter_map(|d| self.as_element(d))
            .any(pred)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
