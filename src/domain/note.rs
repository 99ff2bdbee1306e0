//! Note kinds, reserved folder ids, and widget binding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root folder; notes with no user folder live here.
pub const ID_ROOT_FOLDER: i64 = 0;
/// Holding folder for notes that are being moved.
pub const ID_TEMPORARY_FOLDER: i64 = -1;
/// Folder that collects notes converted from call records.
pub const ID_CALL_RECORD_FOLDER: i64 = -2;
/// Soft-delete destination. Rows under it are never "visible".
pub const ID_TRASH_FOLDER: i64 = -3;

/// Returns true for the reserved folder ids seeded by the schema.
pub fn is_system_folder(id: i64) -> bool {
    matches!(
        id,
        ID_ROOT_FOLDER | ID_TEMPORARY_FOLDER | ID_CALL_RECORD_FOLDER | ID_TRASH_FOLDER
    )
}

/// Widget id meaning "not bound to a widget".
pub const INVALID_WIDGET_ID: i64 = 0;

/// Checklist mode values stored on text content.
pub const PLAIN_MODE: i64 = 0;
pub const CHECKLIST_MODE: i64 = 1;

/// The `type` column of the `note` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Note,
    Folder,
    System,
}

impl NoteKind {
    pub fn code(self) -> i64 {
        match self {
            NoteKind::Note => 0,
            NoteKind::Folder => 1,
            NoteKind::System => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(NoteKind::Note),
            1 => Some(NoteKind::Folder),
            2 => Some(NoteKind::System),
            _ => None,
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteKind::Note => write!(f, "note"),
            NoteKind::Folder => write!(f, "folder"),
            NoteKind::System => write!(f, "system"),
        }
    }
}

/// Home-screen widget size a note may be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Invalid,
    Small,
    Large,
}

impl WidgetType {
    pub fn code(self) -> i64 {
        match self {
            WidgetType::Invalid => -1,
            WidgetType::Small => 0,
            WidgetType::Large => 1,
        }
    }

    /// Unknown codes map to [`WidgetType::Invalid`].
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WidgetType::Small,
            1 => WidgetType::Large,
            _ => WidgetType::Invalid,
        }
    }
}

/// A widget id / widget type pair as stored on a note row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WidgetBinding {
    pub widget_id: i64,
    pub widget_type: WidgetType,
}

impl WidgetBinding {
    pub fn new(widget_id: i64, widget_type: WidgetType) -> Self {
        Self {
            widget_id,
            widget_type,
        }
    }

    /// A binding is live when both the id and the type are valid.
    pub fn is_live(&self) -> bool {
        self.widget_id != INVALID_WIDGET_ID && self.widget_type != WidgetType::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_folders_are_reserved() {
        assert!(is_system_folder(ID_ROOT_FOLDER));
        assert!(is_system_folder(ID_TRASH_FOLDER));
        assert!(is_system_folder(ID_CALL_RECORD_FOLDER));
        assert!(!is_system_folder(1));
    }

    #[test]
    fn note_kind_codes_round_trip() {
        for kind in [NoteKind::Note, NoteKind::Folder, NoteKind::System] {
            assert_eq!(NoteKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(NoteKind::from_code(9), None);
    }

    #[test]
    fn unknown_widget_code_is_invalid() {
        assert_eq!(WidgetType::from_code(7), WidgetType::Invalid);
    }

    #[test]
    fn widget_binding_liveness() {
        assert!(WidgetBinding::new(3, WidgetType::Small).is_live());
        assert!(!WidgetBinding::new(INVALID_WIDGET_ID, WidgetType::Small).is_live());
        assert!(!WidgetBinding::new(3, WidgetType::Invalid).is_live());
    }
}
