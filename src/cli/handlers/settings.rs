//! Handlers that change one note setting: checklist, alert, color, call.

use anyhow::Result;
use std::sync::Arc;

use super::{load_session, save_session};
use crate::cli::config::Config;
use crate::cli::{AlertArgs, CallArgs, ChecklistArgs, ColorArgs, Toggle};
use crate::domain::{CHECKLIST_MODE, PLAIN_MODE};
use crate::infra::now_millis;
use crate::model::WorkingSession;
use crate::store::RecordStore;

fn report(id: i64, saved: bool, what: &str) {
    if saved {
        println!("Note {id}: {what}");
    } else {
        println!("Note {id} unchanged");
    }
}

fn apply(
    store: &Arc<dyn RecordStore>,
    id: i64,
    config: &Config,
    change: impl FnOnce(&WorkingSession),
) -> Result<bool> {
    let session = load_session(store, id, config)?;
    change(&session);
    save_session(&session)
}

pub fn handle_checklist(
    args: &ChecklistArgs,
    store: &Arc<dyn RecordStore>,
    config: &Config,
) -> Result<()> {
    let mode = match args.state {
        Toggle::On => CHECKLIST_MODE,
        Toggle::Off => PLAIN_MODE,
    };
    let saved = apply(store, args.id, config, |s| s.set_checklist_mode(mode))?;
    let what = if mode == CHECKLIST_MODE {
        "checklist on"
    } else {
        "checklist off"
    };
    report(args.id, saved, what);
    Ok(())
}

pub fn handle_alert(args: &AlertArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let date = if args.clear { 0 } else { args.at.unwrap_or(0) };
    let saved = apply(store, args.id, config, |s| s.set_alert_date(date, date > 0))?;
    report(args.id, saved, if date > 0 { "alert set" } else { "alert cleared" });
    Ok(())
}

pub fn handle_color(args: &ColorArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let saved = apply(store, args.id, config, |s| s.set_background_color(args.color))?;
    report(args.id, saved, "color set");
    Ok(())
}

pub fn handle_call(args: &CallArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let at = args.at.unwrap_or_else(now_millis);
    let saved = apply(store, args.id, config, |s| s.convert_to_call_note(&args.phone, at))?;
    report(args.id, saved, "filed under call records");
    Ok(())
}
