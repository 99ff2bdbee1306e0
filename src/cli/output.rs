//! Output format types for CLI commands.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::WidgetType;
use crate::model::CallInfo;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Prints the wrapper as pretty JSON on stdout.
    pub fn print_json(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Everything `show` reports about one note.
#[derive(Debug, Serialize)]
pub struct NoteDetail {
    pub id: i64,
    pub folder_id: i64,
    pub content: String,
    pub checklist: bool,
    pub alert_date: i64,
    pub modified_date: i64,
    pub bg_color_id: i64,
    pub widget_id: i64,
    pub widget_type: WidgetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<CallInfo>,
}
