//! Plain-text export of every folder and note.
//!
//! [`TextExporter`] renders a [`NoteCatalog`](crate::ops::NoteCatalog) to
//! any writer; [`ExportService`] owns the target directory and writes a
//! dated file there.

mod error;
mod service;
mod text;

pub use error::ExportError;
pub use service::{ExportReport, ExportService};
pub use text::{ExportCounts, NOTE_DATE_FORMAT, TextExporter};
