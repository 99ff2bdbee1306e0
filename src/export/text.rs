use crate::domain::CHECKLIST_MODE;
use crate::infra::format_millis;
use crate::ops::{ContentEntry, FolderEntry, NoteEntry};
use serde::Serialize;
use std::io::{self, Write};

/// `strftime` pattern for note and call dates.
pub const NOTE_DATE_FORMAT: &str = "%m-%d %H:%M";

const NOTE_INDENT: &str = "  ";
const CONTENT_INDENT: &str = "    ";

/// What an export wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportCounts {
    pub folders: usize,
    pub notes: usize,
}

/// Renders folders and notes as indented plain text.
///
/// ```text
/// [Recipes]
///   03-14 09:30
///     Pancakes
///     2 eggs
///
/// ```
pub struct TextExporter<W: Write> {
    out: W,
    counts: ExportCounts,
}

impl<W: Write> TextExporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            counts: ExportCounts::default(),
        }
    }

    /// Writes a folder heading. Folders without a name get no heading.
    pub fn write_folder(&mut self, folder: &FolderEntry) -> io::Result<()> {
        if !folder.name.is_empty() {
            writeln!(self.out, "[{}]", folder.name)?;
        }
        self.counts.folders += 1;
        Ok(())
    }

    /// Writes a note's date line, its content, and a blank separator line.
    pub fn write_note(&mut self, note: &NoteEntry, content: &[ContentEntry]) -> io::Result<()> {
        writeln!(
            self.out,
            "{NOTE_INDENT}{}",
            format_millis(note.modified_date, NOTE_DATE_FORMAT)
        )?;
        for entry in content {
            self.write_content(entry)?;
        }
        writeln!(self.out)?;
        self.counts.notes += 1;
        Ok(())
    }

    fn write_content(&mut self, entry: &ContentEntry) -> io::Result<()> {
        match entry {
            ContentEntry::Text { body, mode } => {
                for line in body.lines() {
                    if *mode == CHECKLIST_MODE {
                        writeln!(self.out, "{CONTENT_INDENT}- {line}")?;
                    } else {
                        writeln!(self.out, "{CONTENT_INDENT}{line}")?;
                    }
                }
            }
            ContentEntry::Call {
                phone_number,
                call_date,
                location,
            } => {
                if !phone_number.is_empty() {
                    writeln!(self.out, "{CONTENT_INDENT}{phone_number}")?;
                }
                writeln!(
                    self.out,
                    "{CONTENT_INDENT}{}",
                    format_millis(*call_date, NOTE_DATE_FORMAT)
                )?;
                if !location.is_empty() {
                    writeln!(self.out, "{CONTENT_INDENT}{location}")?;
                }
            }
        }
        Ok(())
    }

    pub fn counts(&self) -> ExportCounts {
        self.counts
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
