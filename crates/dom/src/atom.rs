//! Atom table for canonicalized tag/attribute names.

use std::collections::HashMap;
use std::sync::Arc;

/// Opaque atom identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct AtomId(u32);

/// Document-level atom table.
///
/// Invariant: ASCII letters are stored in canonical lowercase form so that
/// name equality is an integer compare. Non-ASCII code points are preserved
/// as-is.
#[derive(Debug, Default)]
pub(crate) struct AtomTable {
    atoms: Vec<Arc<str>>,
    map: HashMap<Arc<str>, AtomId>,
}

impl AtomTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> Result<AtomId, AtomError> {
        let idx: u32 = self
            .atoms
            .len()
            .try_into()
            .map_err(|_| AtomError::OutOfIds)?;
        Ok(AtomId(idx))
    }

    /// Intern a name, applying ASCII-lowercase folding.
    pub(crate) fn intern(&mut self, name: &str) -> Result<AtomId, AtomError> {
        if !name.bytes().any(|b| b.is_ascii_uppercase()) {
            if let Some(id) = self.map.get(name) {
                return Ok(*id);
            }
            return self.insert(Arc::<str>::from(name));
        }
        let folded = name.to_ascii_lowercase();
        if let Some(id) = self.map.get(folded.as_str()) {
            return Ok(*id);
        }
        self.insert(Arc::<str>::from(folded.as_str()))
    }

    fn insert(&mut self, atom: Arc<str>) -> Result<AtomId, AtomError> {
        let id = self.next_id()?;
        self.atoms.push(Arc::clone(&atom));
        self.map.insert(atom, id);
        Ok(id)
    }

    /// Case-folded lookup without interning.
    ///
    /// Used on read-only paths (end tags, attribute queries) where a name
    /// never seen before cannot possibly match anything in the tree.
    pub(crate) fn get(&self, name: &str) -> Option<AtomId> {
        if !name.bytes().any(|b| b.is_ascii_uppercase()) {
            return self.map.get(name).copied();
        }
        let folded = name.to_ascii_lowercase();
        self.map.get(folded.as_str()).copied()
    }

    pub(crate) fn resolve(&self, id: AtomId) -> Option<&str> {
        self.atoms.get(id.0 as usize).map(|s| s.as_ref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AtomError {
    OutOfIds,
}
