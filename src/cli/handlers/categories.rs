//! Category management command handler.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::cli::output::{CategoryListing, Output, OutputFormat};
use crate::cli::{CategoriesArgs, CategoriesCommand};
use crate::library::Library;

pub fn handle_categories(args: &CategoriesArgs, library: &mut Library) -> Result<()> {
    match &args.action {
        None => list_categories(library, args.format),
        Some(CategoriesCommand::Add { name }) => {
            let category = library
                .categories_mut()
                .add(name)
                .with_context(|| format!("failed to add category '{}'", name.trim()))?;
            println!("Added category: {}", category);
            Ok(())
        }
        Some(CategoriesCommand::Rm { name }) => {
            library
                .remove_category(name)
                .with_context(|| format!("failed to remove category '{}'", name.trim()))?;
            println!("Removed category: {}", name.trim());

            let orphaned = count_by_category(library)
                .get(name.trim())
                .copied()
                .unwrap_or(0);
            if orphaned > 0 {
                println!("  {} note(s) keep the label '{}'", orphaned, name.trim());
            }
            Ok(())
        }
    }
}

/// Counts notes per category label, including labels with no category.
pub(crate) fn count_by_category(library: &Library) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for note in library.notes().notes() {
        *counts.entry(note.category()).or_insert(0) += 1;
    }
    counts
}

/// Builds the listing: registered categories in order, then orphaned labels
/// still used by notes, sorted by name.
pub(crate) fn category_listings(library: &Library) -> Vec<CategoryListing> {
    let counts = count_by_category(library);
    let registry = library.categories();

    let mut listings: Vec<CategoryListing> = registry
        .list()
        .iter()
        .map(|c| CategoryListing {
            name: c.to_string(),
            default: registry.is_default(c.as_str()),
            count: counts.get(c.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let mut orphans: Vec<(&str, usize)> = counts
        .iter()
        .filter(|(name, _)| !registry.contains(name))
        .map(|(name, count)| (*name, *count))
        .collect();
    orphans.sort();
    listings.extend(orphans.into_iter().map(|(name, count)| CategoryListing {
        name: name.to_string(),
        default: false,
        count,
    }));

    listings
}

fn list_categories(library: &Library, format: OutputFormat) -> Result<()> {
    let listings = category_listings(library);
    let registry = library.categories();

    match format {
        OutputFormat::Human => {
            for listing in &listings {
                let marker = if listing.default {
                    " (default)"
                } else if !registry.contains(&listing.name) {
                    " (removed)"
                } else {
                    ""
                };
                println!("{} ({}){}", listing.name, listing.count, marker);
            }
        }
        OutputFormat::Json => {
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
