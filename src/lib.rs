//! marginalia - reading notes organized by category

pub mod cli;
pub mod domain;
pub mod draft;
pub mod infra;
pub mod library;
pub mod render;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::debug;
use std::rc::Rc;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_categories, handle_edit, handle_export, handle_import, handle_list, handle_new,
        handle_rm, handle_show,
    },
};
use infra::{PersistenceAdapter, SystemClock, init_logging};
use library::Library;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "marginalia", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    debug!("event=cli_start data_dir={}", data_dir.display());

    let mut library = Library::open_with(
        PersistenceAdapter::file(&data_dir),
        config.default_categories()?,
        Rc::new(SystemClock),
    );

    match &cli.command {
        Command::New(args) => handle_new(args, &mut library),
        Command::Edit(args) => handle_edit(args, &mut library),
        Command::Rm(args) => handle_rm(args, &mut library),
        Command::List(args) => handle_list(args, &mut library),
        Command::Show(args) => handle_show(args, &library),
        Command::Categories(args) => handle_categories(args, &mut library),
        Command::Export(args) => handle_export(args, &library),
        Command::Import(args) => handle_import(args, &mut library),
        Command::Completions(_) => Ok(()),
    }
}
