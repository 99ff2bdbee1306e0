//! A note plus its text and call content, committed together.
//!
//! The aggregate holds one parent [`DiffBuffer`] and one [`ContentBuffer`]
//! per [`ContentKind`]. `commit` turns the pending changes into the
//! smallest set of writes:
//!
//! 1. the parent diff becomes one direct `update` of the note row;
//! 2. a dirty child that was never written is `insert`ed right away, so its
//!    new id can be bound;
//! 3. dirty children that already have an id become `update` operations in
//!    a single atomic batch.
//!
//! Only step 3 is atomic. If the batch fails after an insert in step 2 went
//! through, the insert stays; the caller only learns that the commit failed.
//! Treat any failed commit as "store state unknown" and reload before
//! editing further.

use super::diff::{ContentBuffer, DiffBuffer};
use super::error::{NoteError, NoteResult};
use crate::domain::{ContentKind, NoteKind, Value, Values, columns};
use crate::infra::now_millis;
use crate::store::{Operation, RecordStore, StoreError, Table};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Serializes new-note allocation across the whole process.
static ALLOCATION_LOCK: Mutex<()> = Mutex::new(());

/// Creates the minimal note row for a new note and returns its id.
///
/// Only one allocation runs at a time in the process. The row is stamped
/// with creation/modification time, `local_modified = 1`, and the target
/// folder. A non-positive id from the store is a failure.
pub fn allocate_note_id(store: &dyn RecordStore, folder_id: i64) -> NoteResult<i64> {
    let _guard = ALLOCATION_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let now = now_millis();
    let mut values = Values::new();
    values.insert(columns::note::CREATED_DATE.into(), now.into());
    values.insert(columns::note::MODIFIED_DATE.into(), now.into());
    values.insert(columns::note::TYPE.into(), NoteKind::Note.code().into());
    values.insert(columns::note::LOCAL_MODIFIED.into(), 1i64.into());
    values.insert(columns::note::PARENT_ID.into(), folder_id.into());

    let id = store.insert(Table::Note, &values).map_err(|e| {
        tracing::error!(folder_id, error = %e, "create new note failed");
        NoteError::Store(e)
    })?;
    if id <= 0 {
        tracing::error!(folder_id, id, "create new note returned bad id");
        return Err(NoteError::MalformedId {
            context: "new note",
            id,
        });
    }

    tracing::debug!(note_id = id, folder_id, "allocated note id");
    Ok(id)
}

/// What happens to pending changes when a commit fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPolicy {
    /// Every buffer is cleared once the commit has been attempted,
    /// whether or not it succeeded.
    #[default]
    ClearOnAttempt,
    /// Buffers whose writes did not go through are kept, so a later
    /// commit retries them. Buffers that were written are cleared.
    RetainOnFailure,
}

/// Pending changes for one note and its content records.
#[derive(Debug, Clone, Default)]
pub struct NoteAggregate {
    note: DiffBuffer,
    text: Option<ContentBuffer>,
    call: Option<ContentBuffer>,
    policy: CommitPolicy,
}

impl NoteAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CommitPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CommitPolicy) {
        self.policy = policy;
    }

    fn content(&self, kind: ContentKind) -> Option<&ContentBuffer> {
        match kind {
            ContentKind::Text => self.text.as_ref(),
            ContentKind::Call => self.call.as_ref(),
        }
    }

    fn content_mut(&mut self, kind: ContentKind) -> &mut ContentBuffer {
        let slot = match kind {
            ContentKind::Text => &mut self.text,
            ContentKind::Call => &mut self.call,
        };
        slot.get_or_insert_with(|| ContentBuffer::new(kind))
    }

    /// Marks the note as locally modified now.
    fn stamp(&mut self) {
        self.note.set(columns::note::LOCAL_MODIFIED, 1i64);
        self.note.set(columns::note::MODIFIED_DATE, now_millis());
    }

    // ===========================================
    // Staging
    // ===========================================

    /// Stages a change to the note row itself.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        self.note.set(key, value);
        self.stamp();
    }

    /// Stages a change to the text or call content record.
    pub fn set_content_field(&mut self, kind: ContentKind, key: &str, value: impl Into<Value>) {
        self.content_mut(kind).set(key, value);
        self.stamp();
    }

    /// Associates an already-persisted content row.
    ///
    /// Fails with `InvalidArgument` when `id <= 0` or when another id is
    /// already bound, leaving state unchanged.
    pub fn bind_content_id(&mut self, kind: ContentKind, id: i64) -> NoteResult<()> {
        if id <= 0 {
            return Err(NoteError::invalid_id(&format!("{kind} content"), id));
        }
        self.content_mut(kind).set_id(id)
    }

    /// The bound content id for `kind`, or `0` if none.
    pub fn content_id(&self, kind: ContentKind) -> i64 {
        self.content(kind).map_or(0, ContentBuffer::id)
    }

    /// Pending note-row changes.
    pub fn note_diff(&self) -> &DiffBuffer {
        &self.note
    }

    /// Pending changes for one content record, if any were ever staged or bound.
    pub fn content_diff(&self, kind: ContentKind) -> Option<&DiffBuffer> {
        self.content(kind).map(ContentBuffer::diff)
    }

    fn content_dirty(&self) -> bool {
        ContentKind::ALL
            .iter()
            .any(|kind| self.content(*kind).is_some_and(ContentBuffer::is_dirty))
    }

    /// True if the note or either content record has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.note.is_dirty() || self.content_dirty()
    }

    // ===========================================
    // Commit
    // ===========================================

    /// Writes every pending change for note `note_id`.
    ///
    /// A clean aggregate commits trivially without any store call. The
    /// note row must already exist. Under [`CommitPolicy::ClearOnAttempt`]
    /// all buffers are empty when this returns, success or not.
    pub fn commit(&mut self, store: &dyn RecordStore, note_id: i64) -> NoteResult<()> {
        if note_id <= 0 {
            return Err(NoteError::invalid_id("note", note_id));
        }
        if !self.is_dirty() {
            return Ok(());
        }

        let result = self
            .flush_note(store, note_id)
            .and_then(|()| self.flush_content(store, note_id));

        if self.policy == CommitPolicy::ClearOnAttempt {
            self.note.clear();
            for kind in ContentKind::ALL {
                if let Some(content) = self.content_slot(kind) {
                    content.clear();
                }
            }
        }
        result
    }

    fn content_slot(&mut self, kind: ContentKind) -> Option<&mut ContentBuffer> {
        match kind {
            ContentKind::Text => self.text.as_mut(),
            ContentKind::Call => self.call.as_mut(),
        }
    }

    fn flush_note(&mut self, store: &dyn RecordStore, note_id: i64) -> NoteResult<()> {
        if !self.note.is_dirty() {
            return Ok(());
        }

        match store.update(Table::Note, note_id, self.note.values()) {
            Ok(0) => {
                // the row is expected to exist by now; keep going
                tracing::error!(note_id, "update note affected no rows");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(note_id, error = %e, "update note failed");
                return Err(NoteError::Store(e));
            }
        }
        self.note.clear();
        Ok(())
    }

    fn flush_content(&mut self, store: &dyn RecordStore, note_id: i64) -> NoteResult<()> {
        let mut batch = Vec::new();
        let mut batched = Vec::new();

        for kind in ContentKind::ALL {
            let Some(content) = self.content_slot(kind) else {
                continue;
            };
            if !content.is_dirty() {
                continue;
            }
            content.set(columns::data::NOTE_ID, note_id);

            if content.is_persisted() {
                batch.push(Operation::update(
                    Table::Data,
                    content.id(),
                    content.diff().values().clone(),
                ));
                batched.push(kind);
                continue;
            }

            let mut values = content.diff().values().clone();
            values.insert(columns::data::MIME_TYPE.into(), kind.mime_type().into());
            let id = store.insert(Table::Data, &values).map_err(|e| {
                tracing::error!(note_id, %kind, error = %e, "insert content failed");
                NoteError::Store(e)
            })?;
            if id <= 0 {
                tracing::error!(note_id, %kind, id, "insert content returned bad id");
                return Err(NoteError::MalformedId {
                    context: "new content",
                    id,
                });
            }
            content.set_id(id)?;
            content.diff_mut().clear();
            tracing::debug!(note_id, %kind, data_id = id, "inserted content");
        }

        if batch.is_empty() {
            return Ok(());
        }

        match store.apply_batch(&batch) {
            Ok(results) if !results.is_empty() => {
                for kind in batched {
                    if let Some(content) = self.content_slot(kind) {
                        content.clear();
                    }
                }
                Ok(())
            }
            Ok(_) => {
                tracing::error!(note_id, ops = batch.len(), "content batch returned no results");
                Err(NoteError::Store(StoreError::EmptyBatchResult))
            }
            Err(e) => {
                tracing::error!(note_id, ops = batch.len(), error = %e, "content batch failed");
                Err(NoteError::Store(e))
            }
        }
    }
}
