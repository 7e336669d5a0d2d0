//! Newick format writing for phylogenetic trees.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::utils::escape_label;
use std::io::{self, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the Newick representation of this tree with closing semicolon.
///
/// The Newick format represents phylogenetic trees as nested parentheses
/// with branch lengths, e.g. `((A:1,B:2):0.5,C:1.5);`.
///
/// Node labels (support values, or clade markers attached by a labelling
/// operation) are emitted verbatim directly after the vertex, before its
/// branch length; branch lengths of all other vertices render exactly as
/// they would without the label, so attaching a label never disturbs the
/// rest of the string. A branch length on the root is re-emitted if the
/// input carried one.
///
/// # Example
/// ```
/// use cladekit::model::tree::Tree;
/// use cladekit::model::vertex::BranchLength;
/// use cladekit::newick::to_newick;
///
/// let mut tree = Tree::new(2);
/// let a = tree.add_terminal(Some(BranchLength::new(1.0)), Some("A".into()));
/// let b = tree.add_terminal(Some(BranchLength::new(2.0)), Some("B".into()));
/// tree.add_root(vec![a, b], None);
///
/// assert_eq!(to_newick(&tree), "(A:1,B:2);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree));
    build_newick(tree, &mut newick, tree.root_index());
    newick.push(';');
    newick
}

/// Writes a tree to the given writer as a single Newick line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_line<W: Write>(writer: &mut W, tree: &Tree) -> io::Result<()> {
    writer.write_all(to_newick(tree).as_bytes())?;
    writer.write_all(b"\n")
}

/// Helper for adding branch lengths
fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
    if let Some(branch_length) = branch_length {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }
}

/// Recursive helper for building the Newick string
fn build_newick(tree: &Tree, newick: &mut String, index: VertexIndex) {
    let vertex = &tree[index];

    if vertex.is_terminal() {
        if let Some(taxon) = vertex.taxon() {
            newick.push_str(&escape_label(taxon));
        }
        if let Some(label) = vertex.label() {
            newick.push_str(label);
        }
        push_branch_length(newick, vertex.branch_length());
    } else {
        newick.push('(');
        for (i, &child) in vertex.children().iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            build_newick(tree, newick, child);
        }
        newick.push(')');

        if let Some(label) = vertex.label() {
            newick.push_str(label);
        }
        push_branch_length(newick, vertex.branch_length());
    }
}

/// Estimates the length of a Newick string for a given tree.
///
/// Accounts for structure, labels, and branch lengths; used to pre-allocate
/// string capacity for efficient writing.
fn estimate_newick_len(tree: &Tree) -> usize {
    // Each internal vertex: "(,)" ~= 3 chars
    const INTERNAL_VERTEX_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let num_internal = tree.num_internal();
    let structure_capacity = num_internal * INTERNAL_VERTEX_CHARS;

    let label_capacity: usize = tree
        .terminals()
        .map(|t| t.taxon().map_or(0, |taxon| taxon.len() + 2))
        .sum();

    let num_branches = tree.num_terminals() + num_internal;
    let branch_capacity = num_branches * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}
