//! notestore - diff-tracking note store with folders, call notes, and text export

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod model;
pub mod ops;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_alert, handle_call, handle_checklist, handle_color, handle_completions,
        handle_edit, handle_export, handle_folders, handle_list, handle_mkdir, handle_mv,
        handle_new, handle_rename, handle_rm, handle_show, handle_trash, open_store,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    infra::logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db_path = config.db_path(cli.db.as_ref());
    tracing::debug!(db = %db_path.display(), "opening store");
    let store = open_store(&db_path)?;

    match &cli.command {
        Command::New(args) => handle_new(args, &store, &config),
        Command::Show(args) => handle_show(args, &store, &config),
        Command::Edit(args) => handle_edit(args, &store, &config),
        Command::Checklist(args) => handle_checklist(args, &store, &config),
        Command::Alert(args) => handle_alert(args, &store, &config),
        Command::Color(args) => handle_color(args, &store, &config),
        Command::Call(args) => handle_call(args, &store, &config),
        Command::List(args) => handle_list(args, &store),
        Command::Folders(args) => handle_folders(args, &store),
        Command::Mkdir(args) => handle_mkdir(args, &store),
        Command::Rename(args) => handle_rename(args, &store),
        Command::Mv(args) => handle_mv(args, &store),
        Command::Trash(args) => handle_trash(args, &store),
        Command::Rm(args) => handle_rm(args, &store),
        Command::Export(args) => handle_export(args, &store, &config),
        Command::Completions(args) => handle_completions(args),
    }
}
