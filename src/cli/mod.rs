//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notes - folder-organized text and call notes in a local store
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Store database (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Show a note's contents and settings
    Show(ShowArgs),

    /// Replace a note's text
    Edit(EditArgs),

    /// Turn checklist mode on or off
    Checklist(ChecklistArgs),

    /// Set or clear a note's reminder
    Alert(AlertArgs),

    /// Set a note's background color
    Color(ColorArgs),

    /// Attach call details and file the note under call records
    Call(CallArgs),

    /// List notes in a folder (the root folder by default)
    #[command(name = "ls")]
    List(ListArgs),

    /// List folders
    Folders(FoldersArgs),

    /// Create a folder
    Mkdir(MkdirArgs),

    /// Rename a folder
    Rename(RenameArgs),

    /// Move notes or folders into a folder
    Mv(MvArgs),

    /// Move notes or folders to the trash
    Trash(TrashArgs),

    /// Delete notes or folders permanently
    Rm(RmArgs),

    /// Export all notes to a dated text file
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note text
    pub text: String,

    /// Folder to create the note in
    #[arg(short = 'F', long, default_value_t = 0, allow_negative_numbers = true)]
    pub folder: i64,

    /// Background color id (defaults to the configured color)
    #[arg(short, long)]
    pub color: Option<i64>,

    /// Create the note in checklist mode
    #[arg(long)]
    pub checklist: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note id
    pub id: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note id
    pub id: i64,

    /// New note text
    pub text: String,
}

/// On/off switch for checklist mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Arguments for the `checklist` command
#[derive(Parser, Debug)]
pub struct ChecklistArgs {
    /// Note id
    pub id: i64,

    /// Whether checklist mode is on
    #[arg(value_enum)]
    pub state: Toggle,
}

/// Arguments for the `alert` command
#[derive(Parser, Debug)]
pub struct AlertArgs {
    /// Note id
    pub id: i64,

    /// Reminder time in milliseconds since the Unix epoch
    #[arg(required_unless_present = "clear", conflicts_with = "clear")]
    pub at: Option<i64>,

    /// Remove the reminder
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the `color` command
#[derive(Parser, Debug)]
pub struct ColorArgs {
    /// Note id
    pub id: i64,

    /// Background color id
    pub color: i64,
}

/// Arguments for the `call` command
#[derive(Parser, Debug)]
pub struct CallArgs {
    /// Note id
    pub id: i64,

    /// Phone number of the call
    pub phone: String,

    /// Call time in milliseconds since the Unix epoch (defaults to now)
    #[arg(long)]
    pub at: Option<i64>,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Folder id to list (root folder if omitted)
    #[arg(allow_negative_numbers = true)]
    pub folder: Option<i64>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `folders` command
#[derive(Parser, Debug)]
pub struct FoldersArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `mkdir` command
#[derive(Parser, Debug)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,
}

/// Arguments for the `rename` command
#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Folder id
    pub folder: i64,

    /// New folder name
    pub name: String,
}

/// Arguments for the `mv` command
#[derive(Parser, Debug)]
pub struct MvArgs {
    /// Destination folder id
    #[arg(allow_negative_numbers = true)]
    pub dest: i64,

    /// Ids of the notes or folders to move
    #[arg(required = true)]
    pub ids: Vec<i64>,
}

/// Arguments for the `trash` command
#[derive(Parser, Debug)]
pub struct TrashArgs {
    /// Ids of the notes or folders to trash
    #[arg(required = true)]
    pub ids: Vec<i64>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Ids of the notes or folders to delete
    #[arg(required = true, allow_negative_numbers = true)]
    pub ids: Vec<i64>,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Directory to write the export into (overrides config file)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output format for the export report
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
