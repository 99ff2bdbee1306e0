//! Core types: field values, note kinds, content variants, reserved ids

pub mod columns;
mod content;
mod note;
mod value;

pub use content::{ContentKind, ParseContentKindError};
pub use note::{
    CHECKLIST_MODE, ID_CALL_RECORD_FOLDER, ID_ROOT_FOLDER, ID_TEMPORARY_FOLDER, ID_TRASH_FOLDER,
    INVALID_WIDGET_ID, NoteKind, PLAIN_MODE, WidgetBinding, WidgetType, is_system_folder,
};
pub use value::{Row, Value, Values};
