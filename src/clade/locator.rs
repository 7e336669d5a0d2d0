//! Locating the clade spanned by a set of taxon names.

use crate::error::CladeError;
use crate::model::tree::{Tree, VertexIndex};
use tracing::debug;

/// Locates the clade whose terminals carry the given names and returns its
/// root vertex (the common ancestor of the matched terminals).
///
/// # Matching policy: first k occurrences
/// Terminal names are not guaranteed unique - repeated sample labels are
/// common in the source domain - so matching is by counting, not by a
/// one-to-one index: the tree's terminals are scanned in document order,
/// every terminal whose name is contained in `names` is collected, and the
/// scan stops as soon as the number of matches equals `names.len()`.
/// Duplicated names are thereby treated as acceptable substitutes for each
/// other, and the first k matches in document order stand in for the
/// intended clade members. When a name occurs more often in the tree than
/// in `names`, the located clade can differ from the one a positional
/// notation would describe; callers relying on duplicated names should keep
/// the duplicates contiguous in the tree.
///
/// # Arguments
/// * `tree` - The tree to search
/// * `names` - The target names; duplicates are counted, so a name listed
///   twice requires two matching terminals
///
/// # Errors
/// [CladeError::TaxaNotFound] if the scan ends before every requested name
/// occurrence was matched, naming the identifiers that were never satisfied.
pub fn locate(tree: &Tree, names: &[String]) -> Result<VertexIndex, CladeError> {
    debug_assert!(!names.is_empty(), "Callers resolve selections first");

    let mut matched: Vec<VertexIndex> = Vec::with_capacity(names.len());
    for terminal in tree.terminals() {
        let Some(taxon) = terminal.taxon() else {
            continue;
        };
        if names.iter().any(|name| name == taxon) {
            matched.push(terminal.index());
            if matched.len() == names.len() {
                break;
            }
        }
    }

    if matched.len() < names.len() {
        return Err(CladeError::TaxaNotFound {
            missing: missing_names(tree, names, &matched),
        });
    }

    let ancestor = tree.common_ancestor(&matched);
    debug!(
        matched = matched.len(),
        clade = ancestor,
        "located common ancestor of requested taxa"
    );
    Ok(ancestor)
}

/// Determines which requested names were never satisfied, by multiset
/// accounting: a name is missing if it was requested more often than it was
/// matched. Returned in request order, each name listed once.
fn missing_names(tree: &Tree, names: &[String], matched: &[VertexIndex]) -> Vec<String> {
    let requested = |name: &str| names.iter().filter(|n| n.as_str() == name).count();
    let found = |name: &str| {
        matched
            .iter()
            .filter(|&&i| tree[i].taxon() == Some(name))
            .count()
    };

    let mut missing: Vec<String> = Vec::new();
    for name in names {
        if missing.contains(name) {
            continue;
        }
        if found(name) < requested(name) {
            missing.push(name.clone());
        }
    }
    missing
}
