//! Export and import command handlers.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{ExportArgs, ImportArgs};
use crate::library::Library;
use crate::store::{DEFAULT_EXPORT_FILENAME, codec};

pub fn handle_export(args: &ExportArgs, library: &Library) -> Result<()> {
    let document = codec::export(library.notes().notes());

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILENAME));

    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&document)?;
        writeln!(stdout)?;
        return Ok(());
    }

    std::fs::write(&path, &document)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    println!(
        "Exported {} note(s) to {}",
        library.notes().len(),
        path.display()
    );
    Ok(())
}

pub fn handle_import(args: &ImportArgs, library: &mut Library) -> Result<()> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let summary = codec::import(&bytes, library.notes_mut())
        .with_context(|| format!("failed to import {}", args.path.display()))?;

    println!("Imported {} note(s)", summary.added);
    if summary.ids_assigned > 0 {
        println!("  {} note(s) received new IDs", summary.ids_assigned);
    }
    Ok(())
}
