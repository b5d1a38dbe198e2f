//! Stack of open elements.

use crate::atom::AtomId;
use crate::store::NodeId;

/// Entry in the stack of open elements.
///
/// Identity is arena-handle based (`NodeId`) and atom-name based (`AtomId`);
/// end-tag matching never touches string storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OpenElement {
    pub(crate) id: NodeId,
    pub(crate) name: AtomId,
}

/// Currently-open element nodes, innermost last.
///
/// All recovery here is silent: closing through a name that is not open is
/// a no-op by contract, so malformed markup can never corrupt the stack.
#[derive(Debug, Default)]
pub(crate) struct InsertionStack {
    items: Vec<OpenElement>,
    max_depth: u32,
}

impl InsertionStack {
    pub(crate) fn push(&mut self, entry: OpenElement) {
        self.items.push(entry);
        self.max_depth = self.max_depth.max(self.items.len() as u32);
    }

    pub(crate) fn pop(&mut self) -> Option<OpenElement> {
        self.items.pop()
    }

    pub(crate) fn current(&self) -> Option<OpenElement> {
        self.items.last().copied()
    }

    pub(crate) fn depth(&self) -> usize {
        self.items.len()
    }

    /// Pop elements until and including the nearest open element named
    /// `name`, returning how many were popped, or `None` (and no change)
    /// when no such element is open.
    pub(crate) fn close_through(&mut self, name: AtomId) -> Option<usize> {
        let index = self.items.iter().rposition(|entry| entry.name == name)?;
        let popped = self.items.len() - index;
        self.items.truncate(index);
        Some(popped)
    }

    /// Pop everything still open (end-of-stream), returning the count.
    pub(crate) fn close_all(&mut self) -> usize {
        let popped = self.items.len();
        self.items.clear();
        popped
    }

    /// Deepest nesting observed over the whole build.
    pub(crate) fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
