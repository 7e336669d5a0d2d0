//! Taxon set resolution.
//!
//! Turns a taxon specification - a name prefix, a file of names, an inline
//! name list, or a union of the latter two - into the concrete terminal
//! names to target. Prefix selections resolve per tree, since the matching
//! terminals can differ from tree to tree.

use crate::error::CladeError;
use crate::model::Tree;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// TAXON SELECTION
// =#========================================================================#=
/// Specification of the taxa an operation targets.
///
/// Built from the command line via [`TaxonSelection::from_parts`], which
/// enforces that prefix selection cannot be combined with explicit names
/// (the two describe taxa in incompatible ways) and that at least one
/// selection is present.
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonSelection {
    /// Target every terminal whose name starts with one of these prefixes.
    /// Resolved per tree, with multiplicity: each matching terminal
    /// contributes one name occurrence.
    Prefixes(Vec<String>),
    /// Target terminals by exact name; deduplicated, in first-occurrence
    /// order, fixed across all trees of a run.
    Names(Vec<String>),
}

impl TaxonSelection {
    /// Builds a selection from the parts a command line provides, checking
    /// the selection rules before any tree is touched.
    ///
    /// # Arguments
    /// * `prefixes` - Prefix selections (`-p`)
    /// * `names_file` - Path to a newline-delimited name list (`-f`)
    /// * `names` - Inline names (`-t`); unioned with the file's names
    ///
    /// # Errors
    /// * [CladeError::ConfigurationConflict] if prefixes are combined with
    ///   explicit names
    /// * [CladeError::NoSelection] if nothing was specified
    pub fn from_parts(
        prefixes: Vec<String>,
        names_file: Option<&Path>,
        names: Vec<String>,
    ) -> Result<Self, CladeError> {
        let has_prefixes = !prefixes.is_empty();
        let has_names = names_file.is_some() || !names.is_empty();

        if has_prefixes && has_names {
            return Err(CladeError::ConfigurationConflict);
        }
        if !has_prefixes && !has_names {
            return Err(CladeError::NoSelection);
        }

        if has_prefixes {
            return Ok(TaxonSelection::Prefixes(prefixes));
        }

        let mut all = Vec::new();
        if let Some(path) = names_file {
            all.extend(read_taxon_names(path)?);
        }
        all.extend(names);

        // Deduplicate, keeping first-occurrence order
        let mut seen = HashSet::new();
        all.retain(|name| seen.insert(name.clone()));

        Ok(TaxonSelection::Names(all))
    }

    /// Resolves this selection against a tree, returning the target names.
    ///
    /// For [Names](TaxonSelection::Names) this is the fixed name list. For
    /// [Prefixes](TaxonSelection::Prefixes) the tree's terminals are scanned
    /// and every matching terminal contributes its name, so duplicated taxon
    /// names appear with their multiplicity - the clade locator counts
    /// matches, and two terminals sharing a name are two targets.
    ///
    /// # Errors
    /// [CladeError::NoMatchingTaxa] if a prefix selection matches no terminal.
    pub fn resolve(&self, tree: &Tree) -> Result<Vec<String>, CladeError> {
        match self {
            TaxonSelection::Names(names) => Ok(names.clone()),
            TaxonSelection::Prefixes(prefixes) => {
                let names: Vec<String> = tree
                    .terminals()
                    .filter_map(|t| t.taxon())
                    .filter(|taxon| prefixes.iter().any(|p| taxon.starts_with(p.as_str())))
                    .map(str::to_string)
                    .collect();
                if names.is_empty() {
                    return Err(CladeError::NoMatchingTaxa(self.describe()));
                }
                Ok(names)
            }
        }
    }

    /// Returns whether a terminal with the given name is targeted by this
    /// selection (exact name match, or any prefix match).
    pub fn matches(&self, taxon: &str) -> bool {
        match self {
            TaxonSelection::Names(names) => names.iter().any(|n| n == taxon),
            TaxonSelection::Prefixes(prefixes) => {
                prefixes.iter().any(|p| taxon.starts_with(p.as_str()))
            }
        }
    }

    /// Short human-readable form of the selection, for error messages.
    pub fn describe(&self) -> String {
        match self {
            TaxonSelection::Prefixes(prefixes) => format!("prefix {}", prefixes.join(", ")),
            TaxonSelection::Names(names) => format!("name {}", names.join(", ")),
        }
    }
}

/// Reads taxon names from a newline-delimited file, one name per line,
/// with trailing whitespace stripped and blank lines ignored.
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
pub fn read_taxon_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>, CladeError> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
