//! Cladekit is a toolkit to label, prune, and reroot phylogenetic trees
//! in Newick format.
//!
//! A clade of interest is specified by the taxa it contains - by name
//! prefix, by a file listing names, or by naming taxa inline - and resolved
//! to the terminals carrying those names and their common ancestor, even
//! when taxon names repeat across terminals. Core functionality provided:
//! - Label: attach a marker (e.g. a PAML-style `#1`) to the common ancestor
//!   of the selected taxa, emitted verbatim in the output.
//! - Prune: remove the selected terminals and collapse now-redundant
//!   internal vertices, preserving root-to-terminal path lengths.
//! - Reroot: place a new root half way along the branch leading to the
//!   selected outgroup clade.
//! - Newick: parse files with one or more semicolon-terminated trees and
//!   write each edited tree back as one line of Newick, appending to the
//!   output file.
//!
//! Limitations:
//! - Only Newick-with-branch-lengths is supported; no NEXUS blocks.
//! - Matching taxa to names uses the first-k-occurrences policy described
//!   on [clade::locate]; names scattered non-contiguously among duplicates
//!   may resolve to a wider clade than intended.
//!
//! # Usage patterns
//! The library can be used in two main ways:
//! 1. The file-level functions [`label_file`], [`prune_file`], and
//!    [`reroot_file`] drive a whole Newick file through one operation,
//!    exactly as the command line tools do.
//! 2. The modules give full control: parse with [newick::NewickParser],
//!    resolve a [clade::TaxonSelection], call the [clade::editor]
//!    operations, and render with [newick::to_newick].
//!
//! # Example
//!
//! Label the clade spanned by two taxa:
//! ```
//! use cladekit::clade::label_clade;
//! use cladekit::newick::{parse_str, to_newick};
//!
//! let mut tree = parse_str("((a:0.1,b:0.2):0.3,c:0.4);").unwrap();
//! label_clade(&mut tree, &["a".into(), "b".into()], "#1").unwrap();
//! assert_eq!(to_newick(&tree), "((a:0.1,b:0.2)#1:0.3,c:0.4);");
//! ```

pub mod clade;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;

pub use crate::clade::TaxonSelection;
pub use crate::error::CladeError;
pub use crate::model::Tree;

use crate::clade::{label_clade, prune_taxa, read_taxon_names, reroot_on_outgroup};
use crate::newick::write_newick_line;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, error};

// ============================================================================
// Quick file-level API
// ============================================================================
/// Labels the clade of interest in every tree of a Newick file and appends
/// the results to `out_path`, one tree per line, in input order.
///
/// Prefix selections are re-resolved for every tree, since the taxa
/// carrying the prefix may vary between trees; explicit name selections are
/// fixed across the whole file.
///
/// # Errors
/// Configuration and input errors are fatal; per-tree resolution failures
/// are reported individually and collected into [CladeError::Batch].
pub fn label_file(
    tree_path: &Path,
    out_path: &Path,
    selection: &TaxonSelection,
    label: &str,
) -> Result<(), CladeError> {
    let trees = newick::parse_file(tree_path)?;
    apply_and_write(trees, out_path, |tree, _| {
        let names = selection.resolve(tree)?;
        label_clade(tree, &names, label)
    })
}

/// Prunes the selected taxa from every tree of a Newick file and appends
/// the results to `out_path`, one tree per line, in input order.
///
/// # Errors
/// Configuration and input errors are fatal; per-tree failures (nothing to
/// prune, or a prune that would empty the tree) are reported individually
/// and collected into [CladeError::Batch].
pub fn prune_file(
    tree_path: &Path,
    out_path: &Path,
    selection: &TaxonSelection,
) -> Result<(), CladeError> {
    let trees = newick::parse_file(tree_path)?;
    apply_and_write(trees, out_path, |tree, _| {
        prune_taxa(tree, selection).map(|_| ())
    })
}

/// Reroots the tree(s) of a Newick file on the branch leading to the common
/// ancestor of the outgroup taxa listed in `outgroup_path`, and appends the
/// results to `out_path`.
///
/// Unless `multiple` is set, the input must contain exactly one tree.
///
/// # Errors
/// * [CladeError::NoSelection] if the outgroup file lists no names
/// * [CladeError::SingleTreeExpected] if `multiple` is unset and the input
///   holds more than one tree
/// * Per-tree resolution failures are reported individually and collected
///   into [CladeError::Batch]
pub fn reroot_file(
    tree_path: &Path,
    outgroup_path: &Path,
    out_path: &Path,
    multiple: bool,
) -> Result<(), CladeError> {
    let outgroup_names = read_taxon_names(outgroup_path)?;
    if outgroup_names.is_empty() {
        return Err(CladeError::NoSelection);
    }

    let trees = newick::parse_file(tree_path)?;
    if !multiple && trees.len() != 1 {
        return Err(CladeError::SingleTreeExpected(trees.len()));
    }

    apply_and_write(trees, out_path, |tree, _| {
        reroot_on_outgroup(tree, &outgroup_names)
    })
}

/// Applies `op` to each tree and appends the edited trees to `out_path`,
/// one Newick line per tree, in input order.
///
/// A tree whose operation fails is skipped - never emitted unmodified - and
/// the failure is reported with the tree's index; if any tree failed, the
/// whole run ends with [CladeError::Batch].
fn apply_and_write<F>(trees: Vec<Tree>, out_path: &Path, mut op: F) -> Result<(), CladeError>
where
    F: FnMut(&mut Tree, usize) -> Result<(), CladeError>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(out_path)?;
    let mut writer = BufWriter::new(file);

    let total = trees.len();
    let mut failed = 0;
    for (index, mut tree) in trees.into_iter().enumerate() {
        match op(&mut tree, index) {
            Ok(()) => {
                write_newick_line(&mut writer, &tree)?;
                debug!(tree = index, "wrote edited tree");
            }
            Err(err) => {
                error!(tree = index, %err, "skipping tree");
                failed += 1;
            }
        }
    }
    writer.flush()?;

    if failed > 0 {
        return Err(CladeError::Batch { failed, total });
    }
    Ok(())
}
