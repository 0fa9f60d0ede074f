//! New note command handler.

use anyhow::{Context, Result};

use super::warn_unregistered_category;
use crate::cli::NewArgs;
use crate::library::Library;

pub fn handle_new(args: &NewArgs, library: &mut Library) -> Result<()> {
    let category = match &args.category {
        Some(category) => category.trim().to_string(),
        None => library.categories().first().to_string(),
    };
    warn_unregistered_category(library, &category);

    let content = args.content.as_deref().unwrap_or("");
    let note = library
        .notes_mut()
        .create(&args.title, &category, content)
        .with_context(|| "failed to create note")?;

    println!("Created: {} [{}]", note.title(), note.id().prefix());
    println!("  id: {}", note.id());
    println!("  category: {}", note.category());

    Ok(())
}
