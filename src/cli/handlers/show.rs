//! Show command handler.

use anyhow::{Context, Result};

use super::format_timestamp;
use super::resolve::resolve_note_id;
use crate::cli::ShowArgs;
use crate::library::Library;
use crate::render::markdown_to_html;

pub fn handle_show(args: &ShowArgs, library: &Library) -> Result<()> {
    let id = resolve_note_id(library.notes(), &args.note)?;
    let note = library
        .notes()
        .get(&id)
        .with_context(|| format!("note not found: '{}'", id))?;

    println!("# {}", note.title());
    println!();
    println!(
        "ID: {}  Category: {}  Created: {}  Updated: {}",
        note.id(),
        note.category(),
        format_timestamp(note.created_at()),
        format_timestamp(note.updated_at())
    );
    if !library.categories().contains(note.category()) {
        println!("(category no longer exists)");
    }
    println!();

    if !note.content().is_empty() {
        if args.html {
            print!("{}", markdown_to_html(note.content()));
        } else {
            println!("{}", note.content());
        }
    }

    Ok(())
}
