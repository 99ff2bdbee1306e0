//! Pending-change buffers for one entity.

use super::error::{NoteError, NoteResult};
use crate::domain::{ContentKind, Value, Values};

/// Field changes not yet written to the store.
///
/// An empty buffer means "no pending changes". Setting a field that is
/// already pending replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffBuffer {
    values: Values,
}

impl DiffBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pending change.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn is_dirty(&self) -> bool {
        !self.values.is_empty()
    }

    /// Discards every pending change.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pending changes for one content record plus its persisted id.
///
/// An id of `0` means the record has never been written; once bound, the
/// id never changes for the life of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBuffer {
    kind: ContentKind,
    id: i64,
    diff: DiffBuffer,
}

impl ContentBuffer {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            id: 0,
            diff: DiffBuffer::new(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// The persisted row id, or `0` if never written.
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Binds an already-persisted row id.
    ///
    /// Fails with `InvalidArgument` and leaves the buffer untouched when
    /// `id <= 0` or when a different id is already bound.
    pub fn set_id(&mut self, id: i64) -> NoteResult<()> {
        if id <= 0 {
            return Err(NoteError::invalid_id(&format!("{} content", self.kind), id));
        }
        if self.id > 0 && self.id != id {
            return Err(NoteError::InvalidArgument(format!(
                "{} content is already bound to id {}, cannot rebind to {id}",
                self.kind, self.id
            )));
        }
        self.id = id;
        Ok(())
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.diff.set(field, value);
    }

    pub fn diff(&self) -> &DiffBuffer {
        &self.diff
    }

    pub(crate) fn diff_mut(&mut self) -> &mut DiffBuffer {
        &mut self.diff
    }

    pub fn is_dirty(&self) -> bool {
        self.diff.is_dirty()
    }

    pub fn clear(&mut self) {
        self.diff.clear();
    }
}
