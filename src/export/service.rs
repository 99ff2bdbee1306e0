use super::error::ExportError;
use super::text::{ExportCounts, TextExporter};
use crate::ops::NoteCatalog;
use crate::store::RecordStore;
use chrono::Local;
use serde::Serialize;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Where an export landed and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub file_name: String,
    pub directory: PathBuf,
    #[serde(flatten)]
    pub counts: ExportCounts,
}

impl ExportReport {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Exports the whole store to a dated text file in one directory.
///
/// Construct one per target directory and pass it where exports are
/// triggered; it holds no state between exports.
pub struct ExportService {
    store: Arc<dyn RecordStore>,
    dir: PathBuf,
}

impl ExportService {
    pub fn new(store: Arc<dyn RecordStore>, dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an export made today, e.g. `notes_20240314.txt`.
    pub fn file_name_for_today() -> String {
        format!("notes_{}.txt", Local::now().format("%Y%m%d"))
    }

    /// Writes every folder, its notes, then the notes under the root.
    ///
    /// The file is written to a temporary sibling and renamed into place,
    /// so a failed export leaves any earlier file for the same day intact.
    pub fn export_to_text(&self) -> Result<ExportReport, ExportError> {
        if !self.dir.is_dir() {
            return Err(ExportError::NoDirectory {
                path: self.dir.clone(),
            });
        }

        let file_name = Self::file_name_for_today();
        let path = self.dir.join(&file_name);
        let io_err = |source: std::io::Error| ExportError::Io {
            path: path.clone(),
            source,
        };

        let temp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        let mut exporter = TextExporter::new(BufWriter::new(temp));
        let catalog = NoteCatalog::new(self.store.as_ref());

        for folder in catalog.folders()? {
            exporter.write_folder(&folder).map_err(io_err)?;
            for note in catalog.notes_in(folder.id)? {
                let content = catalog.content_of(note.id)?;
                exporter.write_note(&note, &content).map_err(io_err)?;
            }
        }
        for note in catalog.root_notes()? {
            let content = catalog.content_of(note.id)?;
            exporter.write_note(&note, &content).map_err(io_err)?;
        }

        let counts = exporter.counts();
        let writer = exporter.finish().map_err(io_err)?;
        let temp = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        temp.persist(&path).map_err(|e| io_err(e.error))?;

        tracing::info!(path = %path.display(), notes = counts.notes, "exported notes");
        Ok(ExportReport {
            file_name,
            directory: self.dir.clone(),
            counts,
        })
    }
}
