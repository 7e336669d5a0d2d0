//! The three structural editing operations: label, prune, reroot.
//!
//! All three operate on a [Tree] in place; serialization happens afterwards
//! through the writer, so a failed operation never produces output.

use crate::clade::locator::locate;
use crate::clade::taxa::TaxonSelection;
use crate::error::CladeError;
use crate::model::tree::{Tree, VertexIndex};
use tracing::{debug, warn};

/// Midpoint split used when rerooting: the outgroup branch and the
/// remainder branch each get half of the original branch length.
const MIDPOINT: f64 = 0.5;

/// Attaches `label` to the clade spanned by `names`, to be emitted verbatim
/// directly after the clade's closing parenthesis in Newick output - the
/// position a support value would occupy (PAML-style markers like `#1` are
/// the typical use). Branch lengths elsewhere in the tree are untouched.
///
/// # Errors
/// Propagates [locate]'s [CladeError::TaxaNotFound] if not every requested
/// name can be matched.
pub fn label_clade(tree: &mut Tree, names: &[String], label: &str) -> Result<(), CladeError> {
    let clade = locate(tree, names)?;
    tree[clade].set_label(label);
    Ok(())
}

/// Removes every terminal targeted by `selection` (exact name, or name
/// prefix) and collapses now-redundant internal structure, so that the
/// root-to-terminal path lengths of all surviving terminals are preserved.
///
/// Terminals that are siblings under one parent prune cleanly: the collapse
/// cascade runs after each removal, so intermediate single-child and
/// childless vertices never survive. Selected names that match no terminal
/// are tolerated, as in the reference behavior, but logged.
///
/// # Returns
/// The number of terminals removed.
///
/// # Errors
/// * [CladeError::NoMatchingTaxa] if the selection matches no terminal
/// * [CladeError::EmptyResultTree] if it matches every terminal
///   (checked before any mutation)
pub fn prune_taxa(tree: &mut Tree, selection: &TaxonSelection) -> Result<usize, CladeError> {
    let mut targets: Vec<VertexIndex> = Vec::new();
    let mut num_terminals = 0;
    for terminal in tree.terminals() {
        num_terminals += 1;
        if terminal.taxon().is_some_and(|taxon| selection.matches(taxon)) {
            targets.push(terminal.index());
        }
    }

    if targets.is_empty() {
        return Err(CladeError::NoMatchingTaxa(selection.describe()));
    }
    if targets.len() == num_terminals {
        return Err(CladeError::EmptyResultTree);
    }

    if let TaxonSelection::Names(names) = selection {
        for name in names {
            let found = targets
                .iter()
                .any(|&t| tree[t].taxon() == Some(name.as_str()));
            if !found {
                warn!(taxon = name.as_str(), "prune target matches no terminal");
            }
        }
    }

    for &target in &targets {
        tree.remove_terminal(target);
    }
    debug!(
        removed = targets.len(),
        remaining = tree.num_terminals(),
        "pruned terminals"
    );
    Ok(targets.len())
}

/// Reroots the tree on the branch leading to the common ancestor of the
/// outgroup taxa, placing the new root exactly half way along that branch:
/// rooting on a branch of length `t`, the branches from the new root to the
/// outgroup clade and to the ingroup will each be of length `t/2`. The
/// outgroup clade becomes the new root's first child.
///
/// # Errors
/// * [locate]'s [CladeError::TaxaNotFound] if the outgroup cannot be resolved
/// * [CladeError::DegenerateRoot] if the outgroup clade is the current root,
///   or its incoming branch carries no length to split
pub fn reroot_on_outgroup(tree: &mut Tree, outgroup_names: &[String]) -> Result<(), CladeError> {
    let clade = locate(tree, outgroup_names)?;
    if clade == tree.root_index() || !tree[clade].has_branch_length() {
        return Err(CladeError::DegenerateRoot);
    }

    let new_root = tree.reroot_above(clade, MIDPOINT);
    debug!(outgroup = clade, root = new_root, "rerooted on outgroup branch");
    Ok(())
}
