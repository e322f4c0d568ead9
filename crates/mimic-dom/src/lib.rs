//! Node tree for the Mimic host-object engine.
//!
//! This crate provides an arena-based node tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/). It is the node layer
//! the host objects delegate to: tree structure, character data editing,
//! text splitting and the contiguous-text computation.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes
//! are never freed while the tree lives, so a [`NodeId`] stays a stable
//! identity for the lifetime of the document.
//!
//! Offsets into character data are counted in UTF-16 code units, the unit
//! scripts observe through `length`.

mod error;

pub use error::DomError;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
///
/// "A document is said to be an XML document if its type is "xml"; otherwise
/// an HTML document."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A document parsed as HTML.
    #[default]
    Html,
    /// A strict XML (or XHTML) document.
    Xml,
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

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.11 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.12 Interface CDATASection](https://dom.spec.whatwg.org/#interface-cdatasection)
    CdataSection(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

impl NodeType {
    /// The data-less kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::CdataSection(_) => NodeKind::CdataSection,
            Self::Comment(_) => NodeKind::Comment,
        }
    }
}

/// The kind of a node, without its payload.
///
/// Host-object descriptors are keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Document node.
    Document,
    /// Element node.
    Element,
    /// Text node.
    Text,
    /// CDATA section node.
    CdataSection,
    /// Comment node.
    Comment,
}

impl NodeKind {
    /// [§ 4.4 nodeType](https://dom.spec.whatwg.org/#dom-node-nodetype)
    #[must_use]
    pub const fn node_type_code(self) -> u16 {
        match self {
            Self::Element => 1,
            Self::Text => 3,
            Self::CdataSection => 4,
            Self::Comment => 8,
            Self::Document => 9,
        }
    }

    /// Whether nodes of this kind carry character data.
    #[must_use]
    pub const fn is_character_data(self) -> bool {
        matches!(self, Self::Text | Self::CdataSection | Self::Comment)
    }

    /// Whether nodes of this kind take part in a contiguous text run.
    ///
    /// [§ 4.11](https://dom.spec.whatwg.org/#contiguous-text-nodes)
    /// "The contiguous Text nodes of a node node are node, node's previous
    /// sibling Text node, if any, and its contiguous Text nodes, and node's
    /// next sibling Text node, if any, and its contiguous Text nodes."
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::CdataSection)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Text => "text",
            Self::CdataSection => "cdata-section",
            Self::Comment => "comment",
        })
    }
}

/// Element-specific data.
///
/// NOTE: We only store tag_name (local name) and attrs for simplicity.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// One tree is one document: every allocated node, attached or not, belongs
/// to this document and shares its [`DocumentKind`].
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
    kind: DocumentKind,
}

impl DomTree {
    /// Create a new HTML document tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(DocumentKind::Html)
    }

    /// Create a new document tree of the given kind.
    #[must_use]
    pub fn with_kind(kind: DocumentKind) -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self {
            nodes: vec![document],
            kind,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The kind of the document this tree represents.
    #[must_use]
    pub const fn document_kind(&self) -> DocumentKind {
        self.kind
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// "If this is an HTML document, then set localName to localName in ASCII
    /// lowercase." The tag name is stored as the HTML-uppercased qualified name.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let tag_name = match self.kind {
            DocumentKind::Html => tag_name.to_ascii_uppercase(),
            DocumentKind::Xml => tag_name.to_string(),
        };
        self.alloc(NodeType::Element(ElementData {
            tag_name,
            attrs: AttributesMap::new(),
        }))
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.5 createCDATASection](https://dom.spec.whatwg.org/#dom-document-createcdatasection)
    pub fn create_cdata_section(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::CdataSection(data.to_string()))
    }

    /// [§ 4.5 createComment](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    /// Kind of the node, or `None` for an unknown id.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.node_type.kind())
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends a detached `child` as the last child of `parent`. Used while
    /// building trees; scripts go through [`DomTree::insert_before`], which
    /// validates the hierarchy.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.relink(parent);
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `node` into `parent` before `child` (or last when `child` is
    /// `None`), removing it from its old parent first.
    ///
    /// # Errors
    ///
    /// - [`DomError::HierarchyRequest`] if `parent` cannot have children,
    ///   `node` is a document, or `node` is an inclusive ancestor of `parent`.
    /// - [`DomError::NotFound`] if `child` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DomError> {
        // STEP 1: "Ensure pre-insertion validity of node into parent before child."
        let parent_kind = self.kind(parent).ok_or(DomError::NotFound(parent))?;
        let node_kind = self.kind(node).ok_or(DomError::NotFound(node))?;
        if !matches!(parent_kind, NodeKind::Document | NodeKind::Element) {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if node_kind == NodeKind::Document {
            return Err(DomError::HierarchyRequest("a document cannot be inserted"));
        }
        if node == parent || self.ancestors(parent).any(|a| a == node) {
            return Err(DomError::HierarchyRequest(
                "node is an inclusive ancestor of parent",
            ));
        }
        if let Some(child) = child.filter(|&c| self.parent(c) != Some(parent)) {
            return Err(DomError::NotFound(child));
        }

        // STEP 2: "Let referenceChild be child."
        // STEP 3: "If referenceChild is node, then set referenceChild to node's
        // next sibling."
        let reference = match child {
            Some(c) if c == node => self.next_sibling(node),
            other => other,
        };

        // STEP 4: "Insert node into parent before referenceChild."
        self.detach(node);
        let index = match reference {
            Some(r) => self.nodes[parent.0]
                .children
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotFound(r))?,
            None => self.nodes[parent.0].children.len(),
        };
        self.nodes[parent.0].children.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
        self.relink(parent);
        Ok(())
    }

    /// [§ 4.2.3 Pre-remove](https://dom.spec.whatwg.org/#concept-node-pre-remove)
    ///
    /// # Errors
    ///
    /// [`DomError::NotFound`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        // "If child's parent is not parent, then throw a "NotFoundError" DOMException."
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotFound(child));
        }
        self.detach(child);
        Ok(())
    }

    /// Removes `node` from its parent, if any.
    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].prev_sibling = None;
        self.nodes[node.0].next_sibling = None;
        self.relink(parent);
    }

    /// Recomputes sibling links for the children of `parent`.
    fn relink(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        for (i, &child) in children.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| children[p]);
            let next = children.get(i + 1).copied();
            let node = &mut self.nodes[child.0];
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
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

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> SiblingIterator<'_> {
        SiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
            forward: false,
        }
    }

    /// Iterate over following siblings (from immediately after to last child).
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> SiblingIterator<'_> {
        SiblingIterator {
            tree: self,
            current: self.next_sibling(id),
            forward: true,
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

    /// Character data of a Text, CDATASection or Comment node.
    #[must_use]
    pub fn character_data(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) | NodeType::CdataSection(s) | NodeType::Comment(s) => {
                Some(s.as_str())
            }
            _ => None,
        })
    }

    fn character_data_mut(&mut self, id: NodeId) -> Result<&mut String, DomError> {
        let node = self.nodes.get_mut(id.0).ok_or(DomError::NotFound(id))?;
        match &mut node.node_type {
            NodeType::Text(s) | NodeType::CdataSection(s) | NodeType::Comment(s) => Ok(s),
            other => Err(DomError::InvalidNodeType {
                expected: "character data",
                found: other.kind(),
            }),
        }
    }

    /// [§ 4.4 nodeName](https://dom.spec.whatwg.org/#dom-node-nodename)
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<String> {
        let node = self.get(id)?;
        Some(match &node.node_type {
            NodeType::Document => "#document".to_string(),
            NodeType::Element(data) => data.tag_name.clone(),
            NodeType::Text(_) => "#text".to_string(),
            NodeType::CdataSection(_) => "#cdata-section".to_string(),
            NodeType::Comment(_) => "#comment".to_string(),
        })
    }

    /// [§ 4.4 length](https://dom.spec.whatwg.org/#concept-node-length)
    ///
    /// "If node is a CharacterData node, return node's data's length.
    /// Return the number of node's children."
    #[must_use]
    pub fn length(&self, id: NodeId) -> usize {
        self.character_data(id)
            .map_or_else(|| self.children(id).len(), utf16_len)
    }

    /// [§ 4.10 Replace data](https://dom.spec.whatwg.org/#concept-cd-replace)
    ///
    /// # Errors
    ///
    /// [`DomError::IndexSize`] if `offset` is greater than the node's length
    /// or splits a surrogate pair, or if `offset + count` ends inside one
    /// (reported with the end offset); [`DomError::InvalidNodeType`] for
    /// nodes without character data.
    pub fn replace_data(
        &mut self,
        id: NodeId,
        offset: usize,
        count: usize,
        data: &str,
    ) -> Result<(), DomError> {
        let current = self.character_data_mut(id)?;
        // STEP 1: "Let length be node's length."
        // STEP 2: "If offset is greater than length, then throw an
        // "IndexSizeError" DOMException."
        let (start, end) = utf16_span(current, offset, count)?;
        current.replace_range(start..end, data);
        Ok(())
    }

    /// [§ 4.10 appendData](https://dom.spec.whatwg.org/#dom-characterdata-appenddata)
    ///
    /// "replace data with node this, offset this's length, count 0, and data
    /// data."
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidNodeType`] for nodes without character data.
    pub fn append_data(&mut self, id: NodeId, data: &str) -> Result<(), DomError> {
        self.character_data_mut(id)?.push_str(data);
        Ok(())
    }

    /// [§ 4.10 insertData](https://dom.spec.whatwg.org/#dom-characterdata-insertdata)
    ///
    /// # Errors
    ///
    /// See [`DomTree::replace_data`].
    pub fn insert_data(&mut self, id: NodeId, offset: usize, data: &str) -> Result<(), DomError> {
        self.replace_data(id, offset, 0, data)
    }

    /// [§ 4.10 deleteData](https://dom.spec.whatwg.org/#dom-characterdata-deletedata)
    ///
    /// # Errors
    ///
    /// See [`DomTree::replace_data`].
    pub fn delete_data(&mut self, id: NodeId, offset: usize, count: usize) -> Result<(), DomError> {
        self.replace_data(id, offset, count, "")
    }

    /// [§ 4.10 Substring data](https://dom.spec.whatwg.org/#concept-cd-substring)
    ///
    /// # Errors
    ///
    /// Same conditions as [`DomError::IndexSize`] in [`DomTree::replace_data`].
    pub fn substring_data(&self, id: NodeId, offset: usize, count: usize) -> Result<String, DomError> {
        let data = self.character_data(id).ok_or_else(|| self.not_character_data(id))?;
        let (start, end) = utf16_span(data, offset, count)?;
        Ok(data[start..end].to_string())
    }

    /// Replace the whole data of a character data node.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidNodeType`] for nodes without character data.
    pub fn set_character_data(&mut self, id: NodeId, data: &str) -> Result<(), DomError> {
        let current = self.character_data_mut(id)?;
        data.clone_into(current);
        Ok(())
    }

    fn not_character_data(&self, id: NodeId) -> DomError {
        self.kind(id).map_or(DomError::NotFound(id), |found| {
            DomError::InvalidNodeType {
                expected: "character data",
                found,
            }
        })
    }

    /// [§ 4.11 Split a Text node](https://dom.spec.whatwg.org/#concept-text-split)
    ///
    /// Returns the new node holding the data after `offset`. The original
    /// node keeps the data before it. Nothing is mutated on error.
    ///
    /// # Errors
    ///
    /// - [`DomError::IndexSize`] if `offset` is greater than the length or
    ///   falls inside a surrogate pair.
    /// - [`DomError::InvalidNodeType`] if `node` is not a Text or CDATASection.
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> Result<NodeId, DomError> {
        let kind = self.kind(node).ok_or(DomError::NotFound(node))?;
        if !kind.is_text() {
            return Err(DomError::InvalidNodeType {
                expected: "text",
                found: kind,
            });
        }
        let data = self.character_data(node).unwrap_or_default();

        // STEP 1: "Let length be node's length."
        // STEP 2: "If offset is greater than length, then throw an
        // "IndexSizeError" DOMException."
        let split_at = utf16_to_byte(data, offset).ok_or(DomError::IndexSize {
            offset: i64::try_from(offset).unwrap_or(i64::MAX),
            length: utf16_len(data),
        })?;

        // STEP 3-4: "Let new data be the result of substringing data with node,
        // offset, and count."
        let tail = data[split_at..].to_string();

        // STEP 5: "Let new node be a new Text node, with the same node document
        // as node. Set new node's data to new data."
        let new_node = self.alloc(match kind {
            NodeKind::CdataSection => NodeType::CdataSection(tail),
            _ => NodeType::Text(tail),
        });

        // STEP 7: "If parent is not null, then insert new node into parent
        // before node's next sibling."
        if let Some(parent) = self.parent(node) {
            let index = self.nodes[parent.0]
                .children
                .iter()
                .position(|&c| c == node)
                .map_or(self.nodes[parent.0].children.len(), |i| i + 1);
            self.nodes[parent.0].children.insert(index, new_node);
            self.nodes[new_node.0].parent = Some(parent);
            self.relink(parent);
        }

        // STEP 8: "Replace data with node node, offset offset, count count,
        // and data the empty string."
        self.character_data_mut(node)?.truncate(split_at);
        Ok(new_node)
    }

    /// The contiguous Text nodes of `node`, in tree order.
    #[must_use]
    pub fn contiguous_text_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let is_text = |id: &NodeId| self.kind(*id).is_some_and(NodeKind::is_text);
        let mut run: Vec<NodeId> = self.preceding_siblings(node).take_while(is_text).collect();
        run.reverse();
        run.push(node);
        run.extend(self.following_siblings(node).take_while(is_text));
        run
    }

    /// [§ 4.11 wholeText](https://dom.spec.whatwg.org/#dom-text-wholetext)
    ///
    /// "The wholeText getter steps are to return the concatenation of the data
    /// of the contiguous Text nodes of this, in tree order."
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidNodeType`] if `node` is not a Text or CDATASection.
    pub fn whole_text(&self, node: NodeId) -> Result<String, DomError> {
        let kind = self.kind(node).ok_or(DomError::NotFound(node))?;
        if !kind.is_text() {
            return Err(DomError::InvalidNodeType {
                expected: "text",
                found: kind,
            });
        }
        Ok(self
            .contiguous_text_nodes(node)
            .into_iter()
            .filter_map(|id| self.character_data(id))
            .collect())
    }

    /// DOM Level 3 `replaceWholeText`.
    ///
    /// Removes the other contiguous Text nodes and stores `text` in `node`.
    /// Returns `None` (after removing `node` as well) when `text` is empty.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidNodeType`] if `node` is not a Text or CDATASection.
    pub fn replace_whole_text(&mut self, node: NodeId, text: &str) -> Result<Option<NodeId>, DomError> {
        let kind = self.kind(node).ok_or(DomError::NotFound(node))?;
        if !kind.is_text() {
            return Err(DomError::InvalidNodeType {
                expected: "text",
                found: kind,
            });
        }
        for other in self.contiguous_text_nodes(node) {
            if other != node {
                self.detach(other);
            }
        }
        if text.is_empty() {
            self.detach(node);
            return Ok(None);
        }
        self.set_character_data(node, text)?;
        Ok(Some(node))
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Null for documents, the descendant text for elements, the data for
    /// character data nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        match self.kind(id)? {
            NodeKind::Document => None,
            NodeKind::Element => {
                let mut out = String::new();
                self.collect_descendant_text(id, &mut out);
                Some(out)
            }
            _ => self.character_data(id).map(str::to_string),
        }
    }

    fn collect_descendant_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.kind(child) {
                Some(NodeKind::Text | NodeKind::CdataSection) => {
                    out.push_str(self.character_data(child).unwrap_or_default());
                }
                Some(NodeKind::Element) => self.collect_descendant_text(child, out),
                _ => {}
            }
        }
    }

    /// [§ 4.4 textContent setter](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// For elements: "String replace all with the given value within this."
    ///
    /// # Errors
    ///
    /// Propagates [`DomError::NotFound`] for unknown ids.
    pub fn set_text_content(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        match self.kind(id).ok_or(DomError::NotFound(id))? {
            NodeKind::Document => Ok(()),
            NodeKind::Element => {
                for child in self.children(id).to_vec() {
                    self.detach(child);
                }
                if !value.is_empty() {
                    let text = self.create_text(value);
                    self.append_child(id, text);
                }
                Ok(())
            }
            _ => self.set_character_data(id, value),
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.kind(id) == Some(NodeKind::Element))
            .copied()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of `data` in UTF-16 code units.
#[must_use]
pub fn utf16_len(data: &str) -> usize {
    data.chars().map(char::len_utf16).sum()
}

/// Byte index of the UTF-16 `offset` in `data`, or `None` when the offset is
/// past the end or inside a surrogate pair.
fn utf16_to_byte(data: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in data.char_indices() {
        if units == offset {
            return Some(byte);
        }
        units += ch.len_utf16();
        if units > offset {
            return None;
        }
    }
    (units == offset).then_some(data.len())
}

/// Byte range covering `count` UTF-16 units starting at `offset`, clamped to
/// the end of `data`. Either end falling inside a surrogate pair is an
/// `IndexSize` error carrying that end.
fn utf16_span(data: &str, offset: usize, count: usize) -> Result<(usize, usize), DomError> {
    let length = utf16_len(data);
    let index_error = |offset: usize| DomError::IndexSize {
        offset: i64::try_from(offset).unwrap_or(i64::MAX),
        length,
    };
    let start = utf16_to_byte(data, offset).ok_or_else(|| index_error(offset))?;
    let end_offset = offset.saturating_add(count).min(length);
    let end = utf16_to_byte(data, end_offset).ok_or_else(|| index_error(end_offset))?;
    Ok((start, end))
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over the siblings of a node in one direction.
pub struct SiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
    forward: bool,
}

impl Iterator for SiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = if self.forward {
            self.tree.next_sibling(id)
        } else {
            self.tree.prev_sibling(id)
        };
        Some(id)
    }
}
