//! Export command handler.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::export::{ExportReport, ExportService};
use crate::store::RecordStore;

pub(crate) fn run_export(
    args: &ExportArgs,
    store: &Arc<dyn RecordStore>,
    config: &Config,
) -> Result<ExportReport> {
    let dir = config.export_dir(args.dir.as_ref());
    ExportService::new(store.clone(), &dir)
        .export_to_text()
        .with_context(|| format!("failed to export to {}", dir.display()))
}

pub fn handle_export(args: &ExportArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let report = run_export(args, store, config)?;
    match args.format {
        OutputFormat::Json => Output::new(&report).print_json()?,
        OutputFormat::Human => println!(
            "Exported {} note(s) in {} folder(s) to {}",
            report.counts.notes,
            report.counts.folders,
            report.path().display()
        ),
    }
    Ok(())
}
