//! Command handlers for the CLI.

mod categories;
mod edit;
mod list;
mod new;
mod resolve;
mod show;
mod transfer;


use chrono::{DateTime, Utc};

use crate::library::Library;

// Re-export public items
pub use categories::handle_categories;
pub use edit::{handle_edit, handle_rm};
pub use list::handle_list;
pub use new::handle_new;
pub use resolve::resolve_note_id;
pub use show::handle_show;
pub use transfer::{handle_export, handle_import};

// ===========================================
// Shared Utilities
// ===========================================

/// Warns when a note is filed under a category the registry doesn't know.
pub(crate) fn warn_unregistered_category(library: &Library, category: &str) {
    if !library.categories().contains(category) {
        eprintln!(
            "warning: category '{}' is not registered (see `marginalia categories`)",
            category
        );
    }
}

/// Formats an optional timestamp for human output.
pub(crate) fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
