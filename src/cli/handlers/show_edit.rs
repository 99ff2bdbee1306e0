//! Show and Edit command handlers.

use anyhow::{Result, bail};
use std::sync::Arc;

use super::{load_session, save_session};
use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::{CHECKLIST_MODE, WidgetBinding};
use crate::infra::format_millis;
use crate::model::WorkingSession;
use crate::store::RecordStore;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(crate) fn note_detail(session: &WorkingSession) -> NoteDetail {
    NoteDetail {
        id: session.note_id(),
        folder_id: session.folder_id(),
        content: session.content(),
        checklist: session.checklist_mode() == CHECKLIST_MODE,
        alert_date: session.alert_date(),
        modified_date: session.modified_date(),
        bg_color_id: session.bg_color_id(),
        widget_id: session.widget_id(),
        widget_type: session.widget_type(),
        call: session.call_info(),
    }
}

pub fn handle_show(args: &ShowArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let session = load_session(store, args.id, config)?;
    let detail = note_detail(&session);

    match args.format {
        OutputFormat::Json => Output::new(detail).print_json()?,
        OutputFormat::Human => {
            println!(
                "ID: {}  Folder: {}  Modified: {}",
                detail.id,
                detail.folder_id,
                format_millis(detail.modified_date, DATE_FORMAT)
            );
            if detail.alert_date > 0 {
                println!("Alert: {}", format_millis(detail.alert_date, DATE_FORMAT));
            }
            if let Some(call) = &detail.call {
                println!(
                    "Call: {} at {}",
                    call.phone_number,
                    format_millis(call.call_date, DATE_FORMAT)
                );
            }
            if WidgetBinding::new(detail.widget_id, detail.widget_type).is_live() {
                println!("Widget: {} ({:?})", detail.widget_id, detail.widget_type);
            }
            println!();
            for line in detail.content.lines() {
                if detail.checklist {
                    println!("- {line}");
                } else {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

pub fn handle_edit(args: &EditArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    if args.text.trim().is_empty() {
        bail!("note text cannot be empty");
    }
    let session = load_session(store, args.id, config)?;
    session.set_content(&args.text);
    if save_session(&session)? {
        println!("Updated note {}", args.id);
    } else {
        println!("Note {} unchanged", args.id);
    }
    Ok(())
}
