//! Closed set of content variants owned by a note.

use std::fmt;
use std::str::FromStr;

/// The kind of a content record attached to a note.
///
/// A note owns at most one record of each kind. The mime-type strings are
/// the values stored in the `data.mime_type` column and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    /// Note body and checklist mode.
    Text,
    /// Call-log metadata: phone number, call date, attachment location.
    Call,
}

impl ContentKind {
    pub const TEXT_MIME_TYPE: &'static str = "vnd.android.cursor.item/text_note";
    pub const CALL_MIME_TYPE: &'static str = "vnd.android.cursor.item/call_note";

    /// Both kinds, in flush order.
    pub const ALL: [ContentKind; 2] = [ContentKind::Text, ContentKind::Call];

    /// Returns the wire-level mime type for this kind.
    pub fn mime_type(self) -> &'static str {
        match self {
            ContentKind::Text => Self::TEXT_MIME_TYPE,
            ContentKind::Call => Self::CALL_MIME_TYPE,
        }
    }

    /// Classifies a stored mime type, returning `None` for unknown values.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            Self::TEXT_MIME_TYPE => Some(ContentKind::Text),
            Self::CALL_MIME_TYPE => Some(ContentKind::Call),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => write!(f, "text"),
            ContentKind::Call => write!(f, "call"),
        }
    }
}

/// Error returned when a string names neither content kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContentKindError(String);

impl fmt::Display for ParseContentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content kind '{}'", self.0)
    }
}

impl std::error::Error for ParseContentKindError {}

impl FromStr for ContentKind {
    type Err = ParseContentKindError;

    /// Accepts either the short name (`text`, `call`) or the mime type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ContentKind::Text),
            "call" => Ok(ContentKind::Call),
            other => Self::from_mime_type(other).ok_or_else(|| ParseContentKindError(s.to_string())),
        }
    }
}
