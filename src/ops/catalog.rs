//! Ordered, read-only walk over folders, notes, and their content.

use crate::domain::{
    ContentKind, ID_CALL_RECORD_FOLDER, ID_ROOT_FOLDER, ID_TRASH_FOLDER, NoteKind, PLAIN_MODE, Row,
    columns::{call, data, note, text},
};
use crate::model::NoteResult;
use crate::store::{Filter, Order, Query, RecordStore, Table};
use serde::Serialize;

/// Display name of the call-record folder, which has no stored name.
pub const CALL_RECORD_FOLDER_NAME: &str = "Call Notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    pub id: i64,
    pub name: String,
    pub note_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    pub id: i64,
    pub parent_id: i64,
    pub snippet: String,
    pub created_date: i64,
    pub modified_date: i64,
    pub alert_date: i64,
    pub bg_color_id: i64,
}

impl NoteEntry {
    fn from_row(row: &Row) -> Self {
        Self {
            id: row.get_i64(note::ID).unwrap_or(0),
            parent_id: row.get_i64(note::PARENT_ID).unwrap_or(ID_ROOT_FOLDER),
            snippet: row.get_str(note::SNIPPET).unwrap_or_default().to_string(),
            created_date: row.get_i64(note::CREATED_DATE).unwrap_or(0),
            modified_date: row.get_i64(note::MODIFIED_DATE).unwrap_or(0),
            alert_date: row.get_i64(note::ALERT_DATE).unwrap_or(0),
            bg_color_id: row.get_i64(note::BG_COLOR_ID).unwrap_or(0),
        }
    }
}

/// One content record of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentEntry {
    Text {
        body: String,
        mode: i64,
    },
    Call {
        phone_number: String,
        call_date: i64,
        location: String,
    },
}

impl ContentEntry {
    fn from_row(row: &Row) -> Option<Self> {
        let mime = row.get_str(data::MIME_TYPE).unwrap_or_default();
        let entry = match ContentKind::from_mime_type(mime)? {
            ContentKind::Text => ContentEntry::Text {
                body: row.get_str(text::BODY).unwrap_or_default().to_string(),
                mode: row.get_i64(text::MODE).unwrap_or(PLAIN_MODE),
            },
            ContentKind::Call => ContentEntry::Call {
                phone_number: row.get_str(call::PHONE_NUMBER).unwrap_or_default().to_string(),
                call_date: row.get_i64(call::CALL_DATE).unwrap_or(0),
                location: row.get_str(call::LOCATION).unwrap_or_default().to_string(),
            },
        };
        Some(entry)
    }
}

/// Read model used by exporters and listings.
///
/// Folders come back as user folders outside the trash in id order,
/// followed by the call-record folder. Notes within a folder are newest
/// first by modified date.
pub struct NoteCatalog<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> NoteCatalog<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    fn count_notes(&self, folder_id: i64) -> NoteResult<usize> {
        let filter = Filter::new()
            .eq(note::TYPE, NoteKind::Note.code())
            .eq(note::PARENT_ID, folder_id);
        Ok(self.store.count(Table::Note, &filter)?)
    }

    pub fn folders(&self) -> NoteResult<Vec<FolderEntry>> {
        let rows = self.store.query(
            Table::Note,
            &Query::select(&[note::ID, note::SNIPPET])
                .filter(
                    Filter::new()
                        .eq(note::TYPE, NoteKind::Folder.code())
                        .ne(note::PARENT_ID, ID_TRASH_FOLDER),
                )
                .order_by(note::ID, Order::Asc),
        )?;

        let mut folders = Vec::with_capacity(rows.len() + 1);
        for row in &rows {
            let id = row.get_i64(note::ID).unwrap_or(0);
            folders.push(FolderEntry {
                id,
                name: row.get_str(note::SNIPPET).unwrap_or_default().to_string(),
                note_count: self.count_notes(id)?,
            });
        }
        folders.push(FolderEntry {
            id: ID_CALL_RECORD_FOLDER,
            name: CALL_RECORD_FOLDER_NAME.to_string(),
            note_count: self.count_notes(ID_CALL_RECORD_FOLDER)?,
        });
        Ok(folders)
    }

    pub fn notes_in(&self, folder_id: i64) -> NoteResult<Vec<NoteEntry>> {
        let rows = self.store.query(
            Table::Note,
            &Query::all()
                .filter(
                    Filter::new()
                        .eq(note::TYPE, NoteKind::Note.code())
                        .eq(note::PARENT_ID, folder_id),
                )
                .order_by(note::MODIFIED_DATE, Order::Desc),
        )?;
        Ok(rows.iter().map(NoteEntry::from_row).collect())
    }

    /// Notes filed directly under the root folder.
    pub fn root_notes(&self) -> NoteResult<Vec<NoteEntry>> {
        self.notes_in(ID_ROOT_FOLDER)
    }

    /// Content records of a note in insertion order. Unknown kinds are skipped.
    pub fn content_of(&self, note_id: i64) -> NoteResult<Vec<ContentEntry>> {
        let rows = self.store.query(
            Table::Data,
            &Query::all()
                .filter(Filter::new().eq(data::NOTE_ID, note_id))
                .order_by(data::ID, Order::Asc),
        )?;
        Ok(rows.iter().filter_map(ContentEntry::from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Values;
    use crate::ops::{batch_move, create_folder};
    use crate::store::SqliteStore;
    use pretty_assertions::assert_eq;

    fn note_at(store: &SqliteStore, parent: i64, modified: i64) -> i64 {
        let values: Values = Row::new()
            .with(note::PARENT_ID, parent)
            .with(note::MODIFIED_DATE, modified)
            .into_values();
        store.insert(Table::Note, &values).unwrap()
    }

    #[test]
    fn folders_list_user_folders_then_call_records() {
        let store = SqliteStore::open_in_memory().unwrap();
        let work = create_folder(&store, "work").unwrap();
        let gone = create_folder(&store, "gone").unwrap();
        let home = create_folder(&store, "home").unwrap();
        batch_move(&store, &[gone], ID_TRASH_FOLDER).unwrap();
        note_at(&store, work, 1);
        note_at(&store, work, 2);

        let folders = NoteCatalog::new(&store).folders().unwrap();
        let summary: Vec<_> = folders
            .iter()
            .map(|f| (f.id, f.name.as_str(), f.note_count))
            .collect();
        assert_eq!(
            summary,
            vec![
                (work, "work", 2),
                (home, "home", 0),
                (ID_CALL_RECORD_FOLDER, CALL_RECORD_FOLDER_NAME, 0),
            ]
        );
    }

    #[test]
    fn notes_are_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        let old = note_at(&store, ID_ROOT_FOLDER, 100);
        let new = note_at(&store, ID_ROOT_FOLDER, 300);
        let mid = note_at(&store, ID_ROOT_FOLDER, 200);
        create_folder(&store, "not a note").unwrap();

        let ids: Vec<_> = NoteCatalog::new(&store)
            .root_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![new, mid, old]);
    }

    #[test]
    fn content_is_classified_by_kind() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = note_at(&store, ID_CALL_RECORD_FOLDER, 1);
        let rows = [
            Row::new()
                .with(data::MIME_TYPE, ContentKind::Text.mime_type())
                .with(text::BODY, "notes about the call")
                .with(text::MODE, 1i64),
            Row::new()
                .with(data::MIME_TYPE, ContentKind::Call.mime_type())
                .with(call::PHONE_NUMBER, "5550100")
                .with(call::CALL_DATE, 99i64),
            Row::new().with(data::MIME_TYPE, "image/png"),
        ];
        for row in rows {
            store
                .insert(Table::Data, &row.with(data::NOTE_ID, id).into_values())
                .unwrap();
        }

        let content = NoteCatalog::new(&store).content_of(id).unwrap();
        assert_eq!(
            content,
            vec![
                ContentEntry::Text {
                    body: "notes about the call".into(),
                    mode: 1
                },
                ContentEntry::Call {
                    phone_number: "5550100".into(),
                    call_date: 99,
                    location: String::new()
                },
            ]
        );
    }
}
