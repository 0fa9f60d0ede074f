//! Edit and remove command handlers.

use anyhow::{Context, Result, bail};

use super::resolve::resolve_note_id;
use super::warn_unregistered_category;
use crate::cli::{EditArgs, RmArgs};
use crate::library::Library;

pub fn handle_edit(args: &EditArgs, library: &mut Library) -> Result<()> {
    if args.title.is_none() && args.category.is_none() && args.content.is_none() {
        bail!("nothing to change: pass --title, --category, or --content");
    }

    let id = resolve_note_id(library.notes(), &args.note)?;
    let current = library
        .notes()
        .get(&id)
        .with_context(|| format!("note not found: '{}'", id))?;

    // Unspecified fields keep their current values
    let title = args.title.clone().unwrap_or_else(|| current.title().to_string());
    let category = args
        .category
        .as_deref()
        .map(|c| c.trim().to_string())
        .unwrap_or_else(|| current.category().to_string());
    let content = args
        .content
        .clone()
        .unwrap_or_else(|| current.content().to_string());

    if args.category.is_some() {
        warn_unregistered_category(library, &category);
    }

    let note = library
        .notes_mut()
        .update(&id, &title, &category, &content)
        .with_context(|| "failed to update note")?;

    println!("Updated: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}

pub fn handle_rm(args: &RmArgs, library: &mut Library) -> Result<()> {
    let id = resolve_note_id(library.notes(), &args.note)?;
    let title = library
        .notes()
        .get(&id)
        .map(|n| n.title().to_string())
        .unwrap_or_default();

    if !library.notes_mut().delete(&id) {
        bail!("note not found: '{}'", args.note);
    }

    println!("Deleted: {} [{}]", title, id.prefix());
    Ok(())
}
