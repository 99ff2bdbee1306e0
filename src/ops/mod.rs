//! Stateless bulk operations and read-only queries over the record store

mod bulk;
mod catalog;
mod queries;
mod snippet;

pub use bulk::{batch_delete, batch_move, create_folder, move_single, rename_folder};
pub use catalog::{CALL_RECORD_FOLDER_NAME, ContentEntry, FolderEntry, NoteCatalog, NoteEntry};
pub use queries::{
    exists, exists_content, folder_name_taken, is_visible, note_id_for_call_and_date,
    phone_number_for_note, snippet_for_note, user_folder_count, widget_bindings_in_folder,
};
pub use snippet::first_line_of;
