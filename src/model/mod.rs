//! Diff-tracking write model: buffers, the note aggregate, editing sessions

mod aggregate;
mod diff;
mod error;
mod listener;
mod session;

pub use aggregate::{CommitPolicy, NoteAggregate, allocate_note_id};
pub use diff::{ContentBuffer, DiffBuffer};
pub use error::{NoteError, NoteResult};
pub use listener::SettingsListener;
pub use session::{CallInfo, WorkingSession};
