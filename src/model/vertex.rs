//! Vertex module for phylogenetic tree representation.

use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// Unlike strictly binary representations, a vertex holds an ordered list of
/// child indices, so trees with arbitrary branching factor (including the
/// degree-two vertices that re-rooting can leave behind) are representable.
/// The role of a vertex follows from its shape:
/// - **Terminal (leaf)**: no children, carries a `taxon` name
/// - **Internal**: one or more children, may carry a `label`
/// - **Root**: the vertex registered as root of its [Tree](crate::model::Tree);
///   has no parent
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `branch_length` is the length of the branch to the parent;
///   non-negative if present, meaningless for the root
/// - `parent` is `None` for the root and for vertices detached by pruning
/// - `label` is emitted verbatim after the vertex in Newick output
///   (a support value, or a clade marker attached by an editing operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: usize,
    /// Index of the parent vertex, `None` for the root
    parent: Option<usize>,
    /// Indices of child vertices, in document order; empty for terminals
    children: Vec<usize>,
    /// Distance to parent vertex (optional, non-negative if present)
    branch_length: Option<BranchLength>,
    /// Taxon name; set for terminals only
    taxon: Option<String>,
    /// Verbatim node label (support value or clade marker)
    label: Option<String>,
}

impl Vertex {
    /// Creates a new terminal (leaf) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent vertex (non-negative)
    /// * `taxon` - Taxon name of this terminal, if named
    pub fn new_terminal(
        index: usize,
        branch_length: Option<BranchLength>,
        taxon: Option<String>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            branch_length,
            taxon,
            label: None,
        }
    }

    /// Creates a new internal vertex with the given children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Indices of the child vertices, in document order
    /// * `branch_length` - Distance to parent vertex (non-negative)
    pub fn new_internal(
        index: usize,
        children: Vec<usize>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            branch_length,
            taxon: None,
            label: None,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if this vertex is a terminal (has no children).
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the indices of the children of this vertex, in document order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Returns the index of the parent, or `None` for the root
    /// (and for vertices detached by pruning).
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the branch length of this vertex, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the taxon name if this is a named terminal, else `None`.
    pub fn taxon(&self) -> Option<&str> {
        self.taxon.as_deref()
    }

    /// Returns the verbatim node label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the node label, to be emitted verbatim in Newick output.
    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.label = Some(label.into());
    }

    /// Sets or clears the branch length.
    pub fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Sets or clears the parent of this vertex.
    pub(crate) fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    /// Appends a child index to this vertex.
    pub(crate) fn push_child(&mut self, child: usize) {
        self.children.push(child);
    }

    /// Removes `child` from the child list, keeping sibling order.
    pub(crate) fn remove_child(&mut self, child: usize) {
        self.children.retain(|&c| c != child);
    }

    /// Replaces `old` with `new` in the child list, keeping its position.
    pub(crate) fn replace_child(&mut self, old: usize, new: usize) {
        for c in self.children.iter_mut() {
            if *c == old {
                *c = new;
            }
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }

    /// Sums two optional branch lengths, treating a missing length as absent
    /// rather than zero: if both are `None` the result is `None`.
    ///
    /// Used when a single-child vertex is collapsed and its branch is merged
    /// into the branch of its remaining child.
    pub fn merge(a: Option<BranchLength>, b: Option<BranchLength>) -> Option<BranchLength> {
        match (a, b) {
            (Some(a), Some(b)) => Some(BranchLength::new(*a + *b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
