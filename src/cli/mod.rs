//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// marginalia - reading notes organized by category
#[derive(Parser, Debug)]
#[command(name = "marginalia", version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Change a note's title, category, or content
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// List notes, optionally filtered by category and search text
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note
    Show(ShowArgs),

    /// List, add, or remove categories
    Categories(CategoriesArgs),

    /// Export all notes as JSON
    Export(ExportArgs),

    /// Import notes from a JSON export (appends, never replaces)
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Title of the book or work
    pub title: String,

    /// Category (defaults to the first category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Note content (markdown)
    #[arg(short = 'm', long)]
    pub content: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID or unique ID prefix
    pub note: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New content (markdown)
    #[arg(short = 'm', long)]
    pub content: Option<String>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID or unique ID prefix
    pub note: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Category to show ("all" for every category)
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Only notes whose title or content contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or unique ID prefix
    pub note: String,

    /// Render content as HTML instead of raw markdown
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the `categories` command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: Option<CategoriesCommand>,

    /// Output format for the listing
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },

    /// Remove a custom category (notes keep their category label)
    Rm {
        /// Category name
        name: String,
    },
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output path ("-" for stdout; defaults to reading-notes-export.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of note records
    pub path: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
