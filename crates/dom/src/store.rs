//! Arena storage for document nodes.
//!
//! The store exclusively owns all nodes; parents, children and open-element
//! entries refer to each other by [`NodeId`] index, never by owning
//! references, so the parent/child relation cannot form ownership cycles and
//! teardown is a single drop. Construction is append-only: nodes are created
//! as the last child of an existing container and are never relinked.

use crate::atom::AtomId;

/// Index of a node inside its [`NodeStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The synthetic document node; always present at index zero.
    pub(crate) const DOCUMENT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Closed set of node kinds; matched exhaustively throughout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    Doctype,
}

#[derive(Debug)]
pub(crate) struct ElementData {
    /// Folded qualified name (`svg:rect` keeps its prefix here too).
    pub(crate) name: AtomId,
    /// Namespace prefix, when the qualified name contained one.
    pub(crate) prefix: Option<AtomId>,
    /// Insertion-ordered, first occurrence of a duplicate name wins.
    pub(crate) attrs: Vec<(AtomId, Box<str>)>,
    pub(crate) children: Vec<NodeId>,
}

#[derive(Debug)]
pub(crate) enum NodePayload {
    Document {
        children: Vec<NodeId>,
    },
    Element(ElementData),
    Text(String),
    Comment(Box<str>),
    Doctype {
        name: Option<Box<str>>,
        public_id: Option<Box<str>>,
        system_id: Option<Box<str>>,
    },
}

impl NodePayload {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Document { .. } => NodeKind::Document,
            NodePayload::Element(_) => NodeKind::Element,
            NodePayload::Text(_) => NodeKind::Text,
            NodePayload::Comment(_) => NodeKind::Comment,
            NodePayload::Doctype { .. } => NodeKind::Doctype,
        }
    }
}

#[derive(Debug)]
struct NodeData {
    parent: Option<NodeId>,
    payload: NodePayload,
}

#[derive(Debug)]
pub(crate) struct NodeStore {
    nodes: Vec<NodeData>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StoreError {
    /// Node id space exhausted.
    Full,
}

impl NodeStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(NodeData {
            parent: None,
            payload: NodePayload::Document {
                children: Vec::new(),
            },
        });
        Self { nodes }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub(crate) fn payload(&self, id: NodeId) -> &NodePayload {
        &self.nodes[id.index()].payload
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Ordered children of `id`; leaves yield the empty slice.
    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()].payload {
            NodePayload::Document { children } => children,
            NodePayload::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub(crate) fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub(crate) fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()].payload, NodePayload::Text(_))
    }

    /// Append a new node as the last child of `parent`.
    pub(crate) fn append_child(
        &mut self,
        parent: NodeId,
        payload: NodePayload,
    ) -> Result<NodeId, StoreError> {
        let raw: u32 = self.nodes.len().try_into().map_err(|_| StoreError::Full)?;
        let id = NodeId(raw);
        self.nodes.push(NodeData {
            parent: Some(parent),
            payload,
        });
        match &mut self.nodes[parent.index()].payload {
            NodePayload::Document { children } => children.push(id),
            NodePayload::Element(element) => element.children.push(id),
            _ => unreachable!("insertion target must be a container node"),
        }
        Ok(id)
    }

    /// Extend an existing text node in place (adjacent-run coalescing).
    pub(crate) fn append_to_text(&mut self, id: NodeId, data: &str) {
        match &mut self.nodes[id.index()].payload {
            NodePayload::Text(text) => text.push_str(data),
            _ => unreachable!("text append target must be a text node"),
        }
    }
}
