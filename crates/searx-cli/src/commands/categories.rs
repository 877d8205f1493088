//! `searx categories`

use std::fmt::Write;

use anyhow::Result;
use searx_core::Category;

use crate::output::write_stdout;

/// The category table: one name and description per line.
#[must_use]
pub fn category_table() -> String {
    let width = Category::ALL
        .iter()
        .map(|c| c.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for category in Category::ALL {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            category.as_str(),
            category.description()
        );
    }
    out
}

/// Print the known search categories.
pub fn list_categories() -> Result<()> {
    write_stdout(category_table().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_category_in_order() {
        let table = category_table();
        let names: Vec<&str> = table
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        let expected: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_descriptions_are_aligned() {
        let table = category_table();
        let column = table.lines().next().and_then(|l| l.find("General"));
        assert!(column.is_some());
        assert!(table.lines().any(|l| l.starts_with("social_media  Social networks")));
    }
}
