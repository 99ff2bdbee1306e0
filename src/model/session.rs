//! Stateful editing session over one note.

use super::aggregate::{CommitPolicy, NoteAggregate, allocate_note_id};
use super::error::{NoteError, NoteResult};
use super::listener::SettingsListener;
use crate::domain::{
    ContentKind, ID_CALL_RECORD_FOLDER, INVALID_WIDGET_ID, PLAIN_MODE, WidgetBinding, WidgetType,
    columns,
};
use crate::infra::now_millis;
use crate::store::{Filter, Query, RecordStore, Table};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

const NOTE_PROJECTION: &[&str] = &[
    columns::note::PARENT_ID,
    columns::note::ALERT_DATE,
    columns::note::BG_COLOR_ID,
    columns::note::WIDGET_ID,
    columns::note::WIDGET_TYPE,
    columns::note::MODIFIED_DATE,
];

const DATA_PROJECTION: &[&str] = &[
    columns::data::ID,
    columns::data::MIME_TYPE,
    columns::data::CONTENT,
    columns::data::DATA1,
    columns::data::DATA3,
];

/// Phone number and call time of a call note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallInfo {
    pub phone_number: String,
    pub call_date: i64,
}

struct SessionState {
    note_id: i64,
    folder_id: i64,
    content: String,
    mode: i64,
    alert_date: i64,
    modified_date: i64,
    bg_color_id: i64,
    widget_id: i64,
    widget_type: WidgetType,
    call: Option<CallInfo>,
    deleted: bool,
    aggregate: NoteAggregate,
    listener: Option<Arc<dyn SettingsListener>>,
}

impl SessionState {
    fn fresh(folder_id: i64) -> Self {
        Self {
            note_id: 0,
            folder_id,
            content: String::new(),
            mode: PLAIN_MODE,
            alert_date: 0,
            modified_date: now_millis(),
            bg_color_id: 0,
            widget_id: INVALID_WIDGET_ID,
            widget_type: WidgetType::Invalid,
            call: None,
            deleted: false,
            aggregate: NoteAggregate::new(),
            listener: None,
        }
    }

    fn exists_in_store(&self) -> bool {
        self.note_id > 0
    }

    fn widget(&self) -> WidgetBinding {
        WidgetBinding::new(self.widget_id, self.widget_type)
    }

    fn is_worth_saving(&self) -> bool {
        !(self.deleted
            || (!self.exists_in_store() && self.content.is_empty())
            || (self.exists_in_store() && !self.aggregate.is_dirty()))
    }

    /// The listener to notify for a widget event, if the note is pinned.
    fn widget_listener(&self) -> Option<Arc<dyn SettingsListener>> {
        if self.widget().is_live() {
            self.listener.clone()
        } else {
            None
        }
    }
}

/// An editing session over one note.
///
/// Setters update a cached copy of the note's display state and stage the
/// change on the session's [`NoteAggregate`]; nothing reaches the store
/// until [`save`](Self::save). Setters are no-ops when the value is
/// unchanged.
///
/// All methods take `&self`. Calls on one session should still come from
/// one thread at a time, except `save`, which is mutually exclusive per
/// session: concurrent saves run one after another and never both
/// allocate a note id.
pub struct WorkingSession {
    store: Arc<dyn RecordStore>,
    state: Mutex<SessionState>,
}

impl WorkingSession {
    // ===========================================
    // Construction
    // ===========================================

    /// Starts a session for a note that does not exist yet.
    pub fn create(
        store: Arc<dyn RecordStore>,
        folder_id: i64,
        widget_id: i64,
        widget_type: WidgetType,
        default_bg_color: i64,
    ) -> Self {
        let session = Self {
            store,
            state: Mutex::new(SessionState::fresh(folder_id)),
        };
        session.set_background_color(default_bg_color);
        session.set_widget_id(widget_id);
        session.set_widget_type(widget_type);
        session
    }

    /// Loads an existing note and its content records.
    ///
    /// Fails with `NotFound` when the note row is missing or when the note
    /// or its content cannot be read. Content records with an unknown mime
    /// type are skipped, as are extra records of an already loaded kind.
    pub fn load(store: Arc<dyn RecordStore>, note_id: i64) -> NoteResult<Self> {
        if note_id <= 0 {
            return Err(NoteError::invalid_id("note", note_id));
        }

        let row = store
            .query_one(
                Table::Note,
                &Query::select(NOTE_PROJECTION).filter(Filter::by_id(note_id)),
            )
            .map_err(|e| {
                tracing::error!(note_id, error = %e, "load note failed");
                NoteError::NotFound {
                    what: "note",
                    id: note_id,
                }
            })?
            .ok_or(NoteError::NotFound {
                what: "note",
                id: note_id,
            })?;

        let mut state = SessionState::fresh(row.get_i64(columns::note::PARENT_ID).unwrap_or(0));
        state.note_id = note_id;
        state.bg_color_id = row.get_i64(columns::note::BG_COLOR_ID).unwrap_or(0);
        state.widget_id = row
            .get_i64(columns::note::WIDGET_ID)
            .unwrap_or(INVALID_WIDGET_ID);
        state.widget_type = WidgetType::from_code(row.get_i64(columns::note::WIDGET_TYPE).unwrap_or(-1));
        state.alert_date = row.get_i64(columns::note::ALERT_DATE).unwrap_or(0);
        state.modified_date = row.get_i64(columns::note::MODIFIED_DATE).unwrap_or(0);

        let contents = store
            .query(
                Table::Data,
                &Query::select(DATA_PROJECTION)
                    .filter(Filter::new().eq(columns::data::NOTE_ID, note_id)),
            )
            .map_err(|e| {
                tracing::error!(note_id, error = %e, "load note content failed");
                NoteError::NotFound {
                    what: "note content",
                    id: note_id,
                }
            })?;

        for content in contents {
            let mime = content.get_str(columns::data::MIME_TYPE).unwrap_or_default();
            let data_id = content.get_i64(columns::data::ID).unwrap_or(0);
            let kind = ContentKind::from_mime_type(mime);
            if let Some(kind) = kind
                && state.aggregate.content_id(kind) > 0
            {
                tracing::warn!(note_id, data_id, %kind, "skipping duplicate content record");
                continue;
            }
            match kind {
                Some(ContentKind::Text) => {
                    state.content = content
                        .get_str(columns::text::BODY)
                        .unwrap_or_default()
                        .to_string();
                    state.mode = content.get_i64(columns::text::MODE).unwrap_or(PLAIN_MODE);
                    state.aggregate.bind_content_id(ContentKind::Text, data_id)?;
                }
                Some(ContentKind::Call) => {
                    state.call = Some(CallInfo {
                        phone_number: content
                            .get_str(columns::call::PHONE_NUMBER)
                            .unwrap_or_default()
                            .to_string(),
                        call_date: content.get_i64(columns::call::CALL_DATE).unwrap_or(0),
                    });
                    state.aggregate.bind_content_id(ContentKind::Call, data_id)?;
                }
                None => {
                    tracing::debug!(note_id, data_id, mime, "skipping content with unknown type");
                }
            }
        }

        Ok(Self {
            store,
            state: Mutex::new(state),
        })
    }

    /// Sets what happens to pending changes when a save fails.
    pub fn with_commit_policy(self, policy: CommitPolicy) -> Self {
        self.lock().aggregate.set_policy(policy);
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attaches (or replaces) the settings listener.
    pub fn set_listener(&self, listener: Arc<dyn SettingsListener>) {
        self.lock().listener = Some(listener);
    }

    // ===========================================
    // Saving
    // ===========================================

    /// Writes pending changes to the store.
    ///
    /// Returns `NotWorthSaving` without touching the store when the session
    /// is marked deleted, is new with empty content, or exists with nothing
    /// pending. A new note gets its id allocated first.
    pub fn save(&self) -> NoteResult<()> {
        let mut state = self.lock();
        if !state.is_worth_saving() {
            return Err(NoteError::NotWorthSaving);
        }

        if !state.exists_in_store() {
            state.note_id = allocate_note_id(self.store.as_ref(), state.folder_id)?;
        }

        let note_id = state.note_id;
        state.aggregate.commit(self.store.as_ref(), note_id)?;

        let listener = state.widget_listener();
        drop(state);
        if let Some(listener) = listener {
            listener.on_widget_changed();
        }
        Ok(())
    }

    /// Flags the session as deleted so later saves are skipped.
    ///
    /// Does not move anything to the trash folder.
    pub fn mark_deleted(&self, deleted: bool) {
        let listener = {
            let mut state = self.lock();
            state.deleted = deleted;
            state.widget_listener()
        };
        if let Some(listener) = listener {
            listener.on_widget_changed();
        }
    }

    // ===========================================
    // Setters
    // ===========================================

    pub fn set_content(&self, text: &str) {
        let mut state = self.lock();
        if state.content == text {
            return;
        }
        state.content = text.to_string();
        state
            .aggregate
            .set_content_field(ContentKind::Text, columns::text::BODY, text);
    }

    pub fn set_checklist_mode(&self, mode: i64) {
        let (old, listener) = {
            let mut state = self.lock();
            if state.mode == mode {
                return;
            }
            let old = state.mode;
            state.mode = mode;
            state
                .aggregate
                .set_content_field(ContentKind::Text, columns::text::MODE, mode);
            (old, state.listener.clone())
        };
        if let Some(listener) = listener {
            listener.on_checklist_mode_changed(old, mode);
        }
    }

    pub fn set_alert_date(&self, date: i64, enabled: bool) {
        let listener = {
            let mut state = self.lock();
            if state.alert_date == date {
                return;
            }
            state.alert_date = date;
            state.aggregate.set_field(columns::note::ALERT_DATE, date);
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener.on_alert_changed(date, enabled);
        }
    }

    pub fn set_background_color(&self, color_id: i64) {
        let listener = {
            let mut state = self.lock();
            if state.bg_color_id == color_id {
                return;
            }
            state.bg_color_id = color_id;
            state.aggregate.set_field(columns::note::BG_COLOR_ID, color_id);
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener.on_background_color_changed();
        }
    }

    pub fn set_widget_id(&self, widget_id: i64) {
        let listener = {
            let mut state = self.lock();
            if state.widget_id == widget_id {
                return;
            }
            state.widget_id = widget_id;
            state.aggregate.set_field(columns::note::WIDGET_ID, widget_id);
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener.on_widget_changed();
        }
    }

    pub fn set_widget_type(&self, widget_type: WidgetType) {
        let listener = {
            let mut state = self.lock();
            if state.widget_type == widget_type {
                return;
            }
            state.widget_type = widget_type;
            state
                .aggregate
                .set_field(columns::note::WIDGET_TYPE, widget_type.code());
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener.on_widget_changed();
        }
    }

    /// Attaches call metadata and files the note under the call-record folder.
    pub fn convert_to_call_note(&self, phone_number: &str, call_date: i64) {
        let mut state = self.lock();
        let info = CallInfo {
            phone_number: phone_number.to_string(),
            call_date,
        };
        if state.call.as_ref() == Some(&info) && state.folder_id == ID_CALL_RECORD_FOLDER {
            return;
        }
        state.call = Some(info);
        state.folder_id = ID_CALL_RECORD_FOLDER;
        state
            .aggregate
            .set_content_field(ContentKind::Call, columns::call::CALL_DATE, call_date);
        state
            .aggregate
            .set_content_field(ContentKind::Call, columns::call::PHONE_NUMBER, phone_number);
        state
            .aggregate
            .set_field(columns::note::PARENT_ID, ID_CALL_RECORD_FOLDER);
    }

    // ===========================================
    // Getters
    // ===========================================

    /// The note id, or `0` if the note has never been saved.
    pub fn note_id(&self) -> i64 {
        self.lock().note_id
    }

    pub fn exists_in_store(&self) -> bool {
        self.lock().exists_in_store()
    }

    pub fn folder_id(&self) -> i64 {
        self.lock().folder_id
    }

    pub fn content(&self) -> String {
        self.lock().content.clone()
    }

    pub fn checklist_mode(&self) -> i64 {
        self.lock().mode
    }

    pub fn alert_date(&self) -> i64 {
        self.lock().alert_date
    }

    pub fn has_clock_alert(&self) -> bool {
        self.lock().alert_date > 0
    }

    pub fn modified_date(&self) -> i64 {
        self.lock().modified_date
    }

    pub fn bg_color_id(&self) -> i64 {
        self.lock().bg_color_id
    }

    pub fn widget_id(&self) -> i64 {
        self.lock().widget_id
    }

    pub fn widget_type(&self) -> WidgetType {
        self.lock().widget_type
    }

    pub fn call_info(&self) -> Option<CallInfo> {
        self.lock().call.clone()
    }

    pub fn is_deleted(&self) -> bool {
        self.lock().deleted
    }

    /// True if there are changes a save would write.
    pub fn has_pending_changes(&self) -> bool {
        self.lock().aggregate.is_dirty()
    }
}
