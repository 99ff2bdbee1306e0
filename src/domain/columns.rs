//! Column names shared by the store schema and the write model.

/// Columns of the `note` table.
pub mod note {
    pub const ID: &str = "id";
    pub const PARENT_ID: &str = "parent_id";
    pub const ALERT_DATE: &str = "alert_date";
    pub const BG_COLOR_ID: &str = "bg_color_id";
    pub const CREATED_DATE: &str = "created_date";
    pub const MODIFIED_DATE: &str = "modified_date";
    pub const SNIPPET: &str = "snippet";
    pub const TYPE: &str = "type";
    pub const WIDGET_ID: &str = "widget_id";
    pub const WIDGET_TYPE: &str = "widget_type";
    pub const LOCAL_MODIFIED: &str = "local_modified";
    pub const ORIGIN_PARENT_ID: &str = "origin_parent_id";
}

/// Columns of the `data` table.
///
/// The generic `data1`..`data4` slots are interpreted per content kind;
/// use the [`text`] and [`call`] aliases rather than the raw names.
pub mod data {
    pub const ID: &str = "id";
    pub const MIME_TYPE: &str = "mime_type";
    pub const NOTE_ID: &str = "note_id";
    pub const CREATED_DATE: &str = "created_date";
    pub const MODIFIED_DATE: &str = "modified_date";
    pub const CONTENT: &str = "content";
    pub const DATA1: &str = "data1";
    pub const DATA2: &str = "data2";
    pub const DATA3: &str = "data3";
    pub const DATA4: &str = "data4";
}

/// Text content aliases.
pub mod text {
    pub const BODY: &str = super::data::CONTENT;
    pub const MODE: &str = super::data::DATA1;
}

/// Call-log content aliases.
pub mod call {
    pub const LOCATION: &str = super::data::CONTENT;
    pub const CALL_DATE: &str = super::data::DATA1;
    pub const PHONE_NUMBER: &str = super::data::DATA3;
}
