//! List command handler.

use anyhow::Result;

use super::{format_timestamp, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::library::Library;
use crate::store::CategoryFilter;

pub fn handle_list(args: &ListArgs, library: &mut Library) -> Result<()> {
    let filter: CategoryFilter = args.category.parse()?;
    library.set_filter(filter);
    library.set_search(args.search.as_str());

    let notes = library.visible_notes();

    match args.format {
        OutputFormat::Human => print_table(&notes),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_table(notes: &[&Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    println!(
        "{:<10}  {:<12}  {:<40}  {:>16}",
        "ID", "Category", "Title", "Updated"
    );
    println!(
        "{:<10}  {:<12}  {:<40}  {:>16}",
        "----------",
        "------------",
        "----------------------------------------",
        "----------------"
    );

    for note in notes {
        println!(
            "{:<10}  {:<12}  {:<40}  {:>16}",
            note.id().prefix(),
            truncate_str(note.category(), 12),
            truncate_str(note.title(), 40),
            format_timestamp(note.last_touched())
        );
    }

    println!();
    println!("{} note(s)", notes.len());
}
