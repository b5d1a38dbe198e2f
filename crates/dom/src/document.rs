//! Read-only traversal surface over a finished tree.
//!
//! A [`Document`] owns the node arena and the atom table; [`NodeRef`] is a
//! copyable cursor into it. Once built, the tree is immutable, so sharing a
//! `&Document` across threads for concurrent traversal is safe.

use crate::atom::AtomTable;
use crate::store::{NodeId, NodeKind, NodePayload, NodeStore};

/// The finished, queryable tree.
pub struct Document {
    store: NodeStore,
    atoms: AtomTable,
    max_open_depth: u32,
}

impl Document {
    pub(crate) fn from_parts(store: NodeStore, atoms: AtomTable, max_open_depth: u32) -> Self {
        Self {
            store,
            atoms,
            max_open_depth,
        }
    }

    /// The synthetic document node at the top of the tree.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId::DOCUMENT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.store.contains(id).then_some(NodeRef { doc: self, id })
    }

    /// Total number of nodes, including the document node itself.
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Deepest open-element nesting observed while building.
    pub fn max_open_depth(&self) -> u32 {
        self.max_open_depth
    }
}

/// Doctype fields as borrowed slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Doctype<'a> {
    pub name: Option<&'a str>,
    pub public_id: Option<&'a str>,
    pub system_id: Option<&'a str>,
}

/// Copyable cursor over one node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn kind(self) -> NodeKind {
        self.doc.store.payload(self.id).kind()
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        let parent = self.doc.store.parent(self.id)?;
        Some(NodeRef {
            doc: self.doc,
            id: parent,
        })
    }

    /// Ordered children; leaves yield an empty iterator.
    pub fn children(self) -> Children<'a> {
        Children {
            doc: self.doc,
            ids: self.doc.store.children(self.id).iter(),
        }
    }

    pub fn first_child(self) -> Option<NodeRef<'a>> {
        self.children().next()
    }

    pub fn last_child(self) -> Option<NodeRef<'a>> {
        self.children().next_back()
    }

    pub fn next_sibling(self) -> Option<NodeRef<'a>> {
        let (siblings, position) = self.position_in_parent()?;
        siblings.get(position + 1).map(|id| NodeRef {
            doc: self.doc,
            id: *id,
        })
    }

    pub fn prev_sibling(self) -> Option<NodeRef<'a>> {
        let (siblings, position) = self.position_in_parent()?;
        let before = position.checked_sub(1)?;
        siblings.get(before).map(|id| NodeRef {
            doc: self.doc,
            id: *id,
        })
    }

    /// Case-folded qualified tag name; `None` for non-elements.
    pub fn tag_name(self) -> Option<&'a str> {
        match self.doc.store.payload(self.id) {
            NodePayload::Element(element) => self.doc.atoms.resolve(element.name),
            _ => None,
        }
    }

    /// Namespace prefix of the tag name, when it had one.
    pub fn prefix(self) -> Option<&'a str> {
        match self.doc.store.payload(self.id) {
            NodePayload::Element(element) => {
                self.doc.atoms.resolve(element.prefix?)
            }
            _ => None,
        }
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(self) -> Option<&'a str> {
        let name = self.tag_name()?;
        match self.prefix() {
            Some(prefix) => Some(&name[prefix.len() + 1..]),
            None => Some(name),
        }
    }

    /// Attribute lookup; `name` is folded with the same case rules the
    /// builder applied, so `node.attr("HREF")` finds `href`.
    pub fn attr(self, name: &str) -> Option<&'a str> {
        let atom = self.doc.atoms.get(name)?;
        match self.doc.store.payload(self.id) {
            NodePayload::Element(element) => element
                .attrs
                .iter()
                .find(|(key, _)| *key == atom)
                .map(|(_, value)| value.as_ref()),
            _ => None,
        }
    }

    /// Attributes in insertion order as `(name, value)` pairs.
    pub fn attributes(self) -> Attributes<'a> {
        let attrs = match self.doc.store.payload(self.id) {
            NodePayload::Element(element) => element.attrs.as_slice(),
            _ => &[],
        };
        Attributes {
            doc: self.doc,
            attrs: attrs.iter(),
        }
    }

    /// Character data of a text or comment node.
    pub fn text(self) -> Option<&'a str> {
        match self.doc.store.payload(self.id) {
            NodePayload::Text(text) => Some(text),
            NodePayload::Comment(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_doctype(self) -> Option<Doctype<'a>> {
        match self.doc.store.payload(self.id) {
            NodePayload::Doctype {
                name,
                public_id,
                system_id,
            } => Some(Doctype {
                name: name.as_deref(),
                public_id: public_id.as_deref(),
                system_id: system_id.as_deref(),
            }),
            _ => None,
        }
    }

    /// Depth-first pre-order traversal of this node and its subtree.
    ///
    /// Lazy and restartable: each call returns a fresh iterator. Terminates
    /// because the tree is finite and append-only construction keeps it
    /// acyclic.
    pub fn descendants(self) -> Descendants<'a> {
        Descendants {
            doc: self.doc,
            pending: vec![self.id],
        }
    }

    /// Concatenated text of all text nodes in this subtree, in document
    /// order. Comments contribute nothing.
    pub fn text_content(self) -> String {
        let mut out = String::new();
        for node in self.descendants() {
            if let NodePayload::Text(text) = node.doc.store.payload(node.id) {
                out.push_str(text);
            }
        }
        out
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("NodeRef");
        dbg.field("id", &self.id).field("kind", &self.kind());
        if let Some(name) = self.tag_name() {
            dbg.field("tag", &name);
        }
        dbg.finish()
    }
}

impl<'a> NodeRef<'a> {
    fn position_in_parent(self) -> Option<(&'a [NodeId], usize)> {
        let parent = self.doc.store.parent(self.id)?;
        let siblings = self.doc.store.children(parent);
        let position = siblings.iter().position(|id| *id == self.id)?;
        Some((siblings, position))
    }
}

/// Iterator over a node's ordered children.
#[derive(Clone)]
pub struct Children<'a> {
    doc: &'a Document,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| NodeRef {
            doc: self.doc,
            id: *id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| NodeRef {
            doc: self.doc,
            id: *id,
        })
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Pre-order iterator with an explicit stack; no recursion, no cycles.
pub struct Descendants<'a> {
    doc: &'a Document,
    pending: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        // Children pushed in reverse so the leftmost is visited first.
        for child in self.doc.store.children(id).iter().rev() {
            self.pending.push(*child);
        }
        Some(NodeRef { doc: self.doc, id })
    }
}

/// Iterator over an element's attributes in insertion order.
#[derive(Clone)]
pub struct Attributes<'a> {
    doc: &'a Document,
    attrs: std::slice::Iter<'a, (crate::atom::AtomId, Box<str>)>,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, value) = self.attrs.next()?;
        Some((self.doc.atoms.resolve(*name).unwrap_or(""), value.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.attrs.size_hint()
    }
}

impl ExactSizeIterator for Attributes<'_> {}
