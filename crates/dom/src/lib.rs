//! Forgiving construction of a document tree from HTML parse events.
//!
//! An external tokenizer drives a [`TreeBuilder`] with start-tag, end-tag,
//! text, comment and doctype events. The builder owns all tree-construction
//! state (node arena, stack of open elements, tag policy) and recovers from
//! malformed markup locally: unmatched end tags are ignored, still-open
//! elements are implicitly closed, adjacent text runs are coalesced. The
//! finished [`Document`] is a read-only traversal surface suitable for a
//! selector engine: parent/child/sibling navigation, pre-order iteration and
//! attribute lookup, with no further mutation possible.
//!
//! Markup irregularities are never errors; [`BuildError`] is reserved for
//! collaborator contract violations (an empty tag name) and resource
//! exhaustion (id space overflow).

mod atom;
mod builder;
mod document;
mod event;
mod policy;
mod stack;
mod store;

pub use crate::builder::{BuildError, TreeBuilder, TreeBuilderConfig, build_document};
pub use crate::document::{Attributes, Children, Descendants, Doctype, Document, NodeRef};
pub use crate::event::ParseEvent;
pub use crate::policy::TagPolicy;
pub use crate::store::{NodeId, NodeKind};
