//! Utility functions for label escaping in Newick output.
//!
//! Labels are stored unescaped in the tree model; when writing, labels that
//! contain structural characters must be quoted so they survive a round trip
//! through the format.

/// Checks if a label needs to be wrapped in single quotes to be safe in a
/// Newick string, i.e. whether it contains a structural or quote character.
fn needs_quoting(label: &str) -> bool {
    label.chars().any(|c| {
        matches!(
            c,
            ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\''
        )
    })
}

/// Escapes a label for safe use in a Newick string.
///
/// Labels containing structural characters are wrapped in single quotes,
/// with internal single quotes escaped by doubling them. Otherwise spaces
/// are replaced with underscores, following the usual Newick convention.
///
/// # Arguments
/// * `label` - The unescaped label string
///
/// # Returns
/// An escaped label string safe for use in Newick files
///
/// # Examples
/// ```
/// # use cladekit::parser::utils::escape_label;
/// assert_eq!(escape_label("Pan_troglodytes"), "Pan_troglodytes");
/// assert_eq!(escape_label("Pan troglodytes"), "Pan_troglodytes");
/// assert_eq!(escape_label("Pan[1]"), "'Pan[1]'");
/// assert_eq!(escape_label("Verreaux's sifaka"), "'Verreaux''s sifaka'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}
