//! Command implementations for the `searx` CLI.

mod categories;
mod completions;
mod search;
mod version;

pub use categories::list_categories;
pub use completions::generate;
pub use search::search;
pub use version::show_version;
