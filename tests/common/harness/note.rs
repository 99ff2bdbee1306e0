//! Builder for test notes with sensible defaults.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use notestore::domain::{CHECKLIST_MODE, ID_ROOT_FOLDER, INVALID_WIDGET_ID, WidgetType};
use notestore::model::WorkingSession;
use notestore::store::RecordStore;
use std::sync::Arc;

/// Builder for creating test notes with sensible defaults.
///
/// Notes land in the root folder with plain text and no settings unless
/// the fluent setters say otherwise.
#[derive(Debug, Clone)]
pub struct TestNote {
    text: String,
    folder_id: i64,
    checklist: bool,
    bg_color_id: i64,
    alert_date: i64,
    call: Option<(String, i64)>,
}

impl TestNote {
    /// Creates a new test note with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            folder_id: ID_ROOT_FOLDER,
            checklist: false,
            bg_color_id: 0,
            alert_date: 0,
            call: None,
        }
    }

    /// Files the note in a folder.
    pub fn folder(mut self, folder_id: i64) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// Turns on checklist mode.
    pub fn checklist(mut self) -> Self {
        self.checklist = true;
        self
    }

    /// Sets the background color.
    pub fn color(mut self, color: i64) -> Self {
        self.bg_color_id = color;
        self
    }

    /// Sets a reminder.
    pub fn alert(mut self, date: i64) -> Self {
        self.alert_date = date;
        self
    }

    /// Makes this a call note.
    pub fn call(mut self, phone: impl Into<String>, call_date: i64) -> Self {
        self.call = Some((phone.into(), call_date));
        self
    }

    /// Returns the note text.
    pub fn get_text(&self) -> &str {
        &self.text
    }

    /// Saves the note through a working session and returns its id.
    pub fn save(&self, store: Arc<dyn RecordStore>) -> i64 {
        let session = WorkingSession::create(
            store,
            self.folder_id,
            INVALID_WIDGET_ID,
            WidgetType::Invalid,
            self.bg_color_id,
        );
        session.set_content(&self.text);
        if self.checklist {
            session.set_checklist_mode(CHECKLIST_MODE);
        }
        if self.alert_date > 0 {
            session.set_alert_date(self.alert_date, true);
        }
        if let Some((phone, date)) = &self.call {
            session.convert_to_call_note(phone, *date);
        }
        session.save().expect("Failed to save test note");
        session.note_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let note = TestNote::new("Simple");
        assert_eq!(note.get_text(), "Simple");
        assert_eq!(note.folder_id, ID_ROOT_FOLDER);
        assert!(!note.checklist);
        assert!(note.call.is_none());
    }

    #[test]
    fn test_note_builder_chain() {
        let note = TestNote::new("Full").folder(7).checklist().color(2).alert(99);
        assert_eq!(note.folder_id, 7);
        assert!(note.checklist);
        assert_eq!(note.bg_color_id, 2);
        assert_eq!(note.alert_date, 99);
    }
}
