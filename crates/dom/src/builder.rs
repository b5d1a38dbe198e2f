//! Event-driven tree construction with permissive recovery.
//!
//! One method per event kind; each call fully completes its transition
//! before the next event is accepted. Malformed markup (unmatched end tags,
//! out-of-position doctypes, text outside any container) is recovered
//! locally and never surfaces as an error — `Err` is reserved for
//! collaborator contract violations and id-space exhaustion.

use std::fmt;

use crate::atom::{AtomError, AtomId, AtomTable};
use crate::document::Document;
use crate::event::ParseEvent;
use crate::policy::TagPolicy;
use crate::stack::{InsertionStack, OpenElement};
use crate::store::{ElementData, NodeId, NodePayload, NodeStore, StoreError};

const LOG_TARGET: &str = "dom.builder";

/// Tree builder configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeBuilderConfig {
    /// Tag rule tables; defaults to [`TagPolicy::html`].
    pub policy: TagPolicy,
    /// Expected node count, used to presize the arena.
    pub node_capacity: usize,
}

/// Collaborator contract violations and resource exhaustion.
///
/// Markup irregularities never construct one of these; feeding events after
/// the stream has ended is unrepresentable because [`TreeBuilder::finish`]
/// consumes the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A start-tag or end-tag event carried an empty tag name.
    EmptyName,
    /// Interned-name id space exhausted.
    AtomsExhausted,
    /// Node id space exhausted.
    StoreFull,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyName => f.write_str("tag event with an empty name"),
            BuildError::AtomsExhausted => f.write_str("interned name id space exhausted"),
            BuildError::StoreFull => f.write_str("node id space exhausted"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<AtomError> for BuildError {
    fn from(err: AtomError) -> Self {
        match err {
            AtomError::OutOfIds => BuildError::AtomsExhausted,
        }
    }
}

impl From<StoreError> for BuildError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Full => BuildError::StoreFull,
        }
    }
}

/// Consumes parse events and drives the node arena and the stack of open
/// elements according to a [`TagPolicy`].
pub struct TreeBuilder {
    store: NodeStore,
    stack: InsertionStack,
    atoms: AtomTable,
    policy: TagPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_config(TreeBuilderConfig::default())
    }

    pub fn with_config(config: TreeBuilderConfig) -> Self {
        Self {
            store: NodeStore::with_capacity(config.node_capacity),
            stack: InsertionStack::default(),
            atoms: AtomTable::new(),
            policy: config.policy,
        }
    }

    /// Default policy with an arena presized for `node_capacity` nodes.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self::with_config(TreeBuilderConfig {
            node_capacity,
            ..TreeBuilderConfig::default()
        })
    }

    /// The rule tables this builder consults; the external tokenizer uses
    /// the same policy to decide which elements get raw-text lexing.
    pub fn policy(&self) -> &TagPolicy {
        &self.policy
    }

    /// Dispatch a single event.
    pub fn apply(&mut self, event: &ParseEvent) -> Result<(), BuildError> {
        match event {
            ParseEvent::StartTag { name, attrs } => self.start_tag(name, attrs),
            ParseEvent::EndTag { name } => self.end_tag(name),
            ParseEvent::Text(data) => self.text(data),
            ParseEvent::Comment(data) => self.comment(data),
            ParseEvent::Doctype {
                name,
                public_id,
                system_id,
            } => self.doctype(name.as_deref(), public_id.as_deref(), system_id.as_deref()),
        }
    }

    /// Handle a start tag: run the implicit-close loop, create the element
    /// under the current insertion point, and open it unless it is void.
    pub fn start_tag(&mut self, name: &str, attrs: &[(String, String)]) -> Result<(), BuildError> {
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        let name_atom = self.atoms.intern(name)?;
        let prefix_atom = match qualified_prefix(name) {
            Some(prefix) => Some(self.atoms.intern(prefix)?),
            None => None,
        };

        // First occurrence of a duplicate attribute name wins; empty
        // attribute names are dropped rather than rejected.
        let mut folded_attrs: Vec<(AtomId, Box<str>)> = Vec::with_capacity(attrs.len());
        for (key, value) in attrs {
            if key.is_empty() {
                log::trace!(target: LOG_TARGET, "dropping attribute with empty name on <{name}>");
                continue;
            }
            let key_atom = self.atoms.intern(key)?;
            if folded_attrs.iter().any(|(existing, _)| *existing == key_atom) {
                continue;
            }
            folded_attrs.push((key_atom, value.as_str().into()));
        }

        let folded = self.atoms.resolve(name_atom).unwrap_or("");

        if let Some(top) = self.stack.current() {
            let open_name = self.atoms.resolve(top.name).unwrap_or("");
            if self.policy.is_raw_text(open_name) {
                log::trace!(
                    target: LOG_TARGET,
                    "start tag inside raw-text <{open_name}>; tokenizer contract expects literal text here"
                );
            }
        }

        // Repeatedly pop the current element while this tag implicitly
        // closes it (a new <li> ends an open <li>, and so on).
        while let Some(top) = self.stack.current() {
            let open_name = self.atoms.resolve(top.name).unwrap_or("");
            if !self.policy.implicitly_closes(folded, open_name) {
                break;
            }
            log::trace!(target: LOG_TARGET, "<{folded}> implicitly closes open <{open_name}>");
            self.stack.pop();
        }

        let parent = self.insertion_point();
        let id = self.store.append_child(
            parent,
            NodePayload::Element(ElementData {
                name: name_atom,
                prefix: prefix_atom,
                attrs: folded_attrs,
                children: Vec::new(),
            }),
        )?;

        if !self.policy.is_void(folded) {
            self.stack.push(OpenElement {
                id,
                name: name_atom,
            });
        }
        Ok(())
    }

    /// Handle an end tag: close through the nearest matching open element,
    /// or do nothing at all when none matches.
    pub fn end_tag(&mut self, name: &str) -> Result<(), BuildError> {
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        // A name that was never interned cannot be on the stack.
        let Some(name_atom) = self.atoms.get(name) else {
            log::trace!(target: LOG_TARGET, "ignoring end tag </{name}> with nothing open");
            return Ok(());
        };
        match self.stack.close_through(name_atom) {
            Some(popped) if popped > 1 => {
                log::trace!(
                    target: LOG_TARGET,
                    "</{name}> implicitly closed {} inner elements",
                    popped - 1
                );
            }
            Some(_) => {}
            None => {
                log::trace!(target: LOG_TARGET, "ignoring end tag </{name}> with nothing open");
            }
        }
        Ok(())
    }

    /// Handle character data: coalesce into the previous text child when
    /// there is one, otherwise append a new text node.
    pub fn text(&mut self, data: &str) -> Result<(), BuildError> {
        if data.is_empty() {
            return Ok(());
        }
        let parent = self.insertion_point();
        if let Some(last) = self.store.last_child(parent) {
            if self.store.is_text(last) {
                self.store.append_to_text(last, data);
                return Ok(());
            }
        }
        self.store
            .append_child(parent, NodePayload::Text(data.to_string()))?;
        Ok(())
    }

    /// Handle a comment; never touches the stack of open elements.
    pub fn comment(&mut self, data: &str) -> Result<(), BuildError> {
        let parent = self.insertion_point();
        self.store
            .append_child(parent, NodePayload::Comment(data.into()))?;
        Ok(())
    }

    /// Handle a doctype. Always appended as a child of the document node;
    /// out-of-position doctypes are kept rather than rejected.
    pub fn doctype(
        &mut self,
        name: Option<&str>,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> Result<(), BuildError> {
        if self.stack.depth() > 0 {
            log::trace!(target: LOG_TARGET, "doctype after content; appending to document anyway");
        }
        self.store.append_child(
            NodeId::DOCUMENT,
            NodePayload::Doctype {
                name: name.map(Into::into),
                public_id: public_id.map(Into::into),
                system_id: system_id.map(Into::into),
            },
        )?;
        Ok(())
    }

    /// End of stream: implicitly close everything still open and hand the
    /// finished tree over for read-only traversal.
    pub fn finish(mut self) -> Document {
        let unclosed = self.stack.close_all();
        if unclosed > 0 {
            log::trace!(target: LOG_TARGET, "end of stream with {unclosed} open elements; implicitly closed");
        }
        log::debug!(
            target: LOG_TARGET,
            "built document: {} nodes, max open depth {}",
            self.store.len(),
            self.stack.max_depth()
        );
        Document::from_parts(self.store, self.atoms, self.stack.max_depth())
    }

    fn insertion_point(&self) -> NodeId {
        self.stack
            .current()
            .map(|entry| entry.id)
            .unwrap_or(NodeId::DOCUMENT)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a document from a finished event sequence in one call.
pub fn build_document(events: &[ParseEvent]) -> Result<Document, BuildError> {
    let mut builder = TreeBuilder::with_capacity(events.len() + 1);
    for event in events {
        builder.apply(event)?;
    }
    Ok(builder.finish())
}

/// Namespace prefix of a qualified name (`svg:rect` → `svg`).
///
/// A leading or trailing colon does not count as a prefix separator.
fn qualified_prefix(name: &str) -> Option<&str> {
    let index = name.find(':')?;
    if index == 0 || index + 1 == name.len() {
        return None;
    }
    Some(&name[..index])
}
