//! Read-only projections over the note and data tables.

use crate::domain::{
    ContentKind, ID_TRASH_FOLDER, NoteKind, WidgetBinding, WidgetType, columns::call,
    columns::data, columns::note,
};
use crate::model::{NoteError, NoteResult};
use crate::store::{Filter, Query, RecordStore, Table};
use std::collections::BTreeSet;

fn call_content() -> Filter {
    Filter::new().eq(data::MIME_TYPE, ContentKind::Call.mime_type())
}

/// Number of user folders outside the trash.
pub fn user_folder_count(store: &dyn RecordStore) -> NoteResult<usize> {
    let filter = Filter::new()
        .eq(note::TYPE, NoteKind::Folder.code())
        .ne(note::PARENT_ID, ID_TRASH_FOLDER);
    Ok(store.count(Table::Note, &filter)?)
}

/// True if the row exists with the given kind and is not in the trash.
pub fn is_visible(store: &dyn RecordStore, id: i64, kind: NoteKind) -> NoteResult<bool> {
    let filter = Filter::by_id(id)
        .eq(note::TYPE, kind.code())
        .ne(note::PARENT_ID, ID_TRASH_FOLDER);
    Ok(store.count(Table::Note, &filter)? > 0)
}

/// True if a note row with this id exists, trashed or not.
pub fn exists(store: &dyn RecordStore, id: i64) -> NoteResult<bool> {
    Ok(store.count(Table::Note, &Filter::by_id(id))? > 0)
}

/// True if a content row with this id exists.
pub fn exists_content(store: &dyn RecordStore, data_id: i64) -> NoteResult<bool> {
    Ok(store.count(Table::Data, &Filter::by_id(data_id))? > 0)
}

/// True if a folder outside the trash already uses this exact name.
pub fn folder_name_taken(store: &dyn RecordStore, name: &str) -> NoteResult<bool> {
    let filter = Filter::new()
        .eq(note::TYPE, NoteKind::Folder.code())
        .ne(note::PARENT_ID, ID_TRASH_FOLDER)
        .eq(note::SNIPPET, name);
    Ok(store.count(Table::Note, &filter)? > 0)
}

/// Distinct live widget bindings among the notes filed in a folder.
///
/// Notes that are not pinned to a widget contribute nothing.
pub fn widget_bindings_in_folder(
    store: &dyn RecordStore,
    folder_id: i64,
) -> NoteResult<BTreeSet<WidgetBinding>> {
    let rows = store.query(
        Table::Note,
        &Query::select(&[note::WIDGET_ID, note::WIDGET_TYPE])
            .filter(Filter::new().eq(note::PARENT_ID, folder_id)),
    )?;

    Ok(rows
        .iter()
        .map(|row| {
            WidgetBinding::new(
                row.get_i64(note::WIDGET_ID).unwrap_or(0),
                WidgetType::from_code(row.get_i64(note::WIDGET_TYPE).unwrap_or(-1)),
            )
        })
        .filter(WidgetBinding::is_live)
        .collect())
}

/// Phone number of a call note, or an empty string if it has no call content.
pub fn phone_number_for_note(store: &dyn RecordStore, note_id: i64) -> NoteResult<String> {
    let row = store.query_one(
        Table::Data,
        &Query::select(&[call::PHONE_NUMBER]).filter(call_content().eq(data::NOTE_ID, note_id)),
    )?;
    Ok(row
        .and_then(|r| r.get_str(call::PHONE_NUMBER).map(str::to_string))
        .unwrap_or_default())
}

/// Note holding the call with this number and time, or `0` if none does.
///
/// Numbers are compared after normalization, so `555-123-4567` matches
/// `+1 (555) 123 4567`.
pub fn note_id_for_call_and_date(
    store: &dyn RecordStore,
    phone_number: &str,
    call_date: i64,
) -> NoteResult<i64> {
    let row = store.query_one(
        Table::Data,
        &Query::select(&[data::NOTE_ID]).filter(
            call_content()
                .eq(call::CALL_DATE, call_date)
                .phone_eq(call::PHONE_NUMBER, phone_number),
        ),
    )?;
    Ok(row.and_then(|r| r.get_i64(data::NOTE_ID)).unwrap_or(0))
}

/// The stored snippet of a note.
pub fn snippet_for_note(store: &dyn RecordStore, note_id: i64) -> NoteResult<String> {
    let row = store
        .query_one(
            Table::Note,
            &Query::select(&[note::SNIPPET]).filter(Filter::by_id(note_id)),
        )?
        .ok_or(NoteError::NotFound {
            what: "note",
            id: note_id,
        })?;
    Ok(row.get_str(note::SNIPPET).unwrap_or_default().to_string())
}
