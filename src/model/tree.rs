//! Provides the rooted tree representation the editing operations work on.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [`Tree`] - tree structure using the arena pattern, with vertices
//!   referenced by [VertexIndex]
//! * Traversal via [`Tree::pre_order_iter`] and [`Tree::terminals`]
//! * Structural mutation via [`Tree::remove_terminal`] (the prune primitive)
//!   and [`Tree::reroot_above`]

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
/// Parent links are plain indices, so ownership flows strictly root-to-leaf.
///
/// # Structure
/// - All vertices (root, internal, and terminals) are stored in the arena.
/// - Index of root is maintained.
/// - Internal vertices have an ordered list of one or more children;
///   branching factor is arbitrary, not binary-only.
/// - Branch lengths are optional, but if provided must be non-negative.
/// - Structural mutation (pruning, re-rooting) may leave detached slots in
///   the arena; traversal and counting always walk from the root and never
///   visit detached vertices.
///
/// # Construction
/// To construct a tree, specify its expected size based on the number of
/// terminals, then add vertices one by one, bottom-up (children before their
/// parent). Test validity with [`Tree::is_valid()`].
///
/// # Example
/// ```
/// use cladekit::model::tree::Tree;
/// use cladekit::model::vertex::BranchLength;
///
/// let mut tree = Tree::new(2);
/// let a = tree.add_terminal(Some(BranchLength::new(1.0)), Some("Apteryx_owenii".into()));
/// let b = tree.add_terminal(Some(BranchLength::new(1.0)), Some("Apteryx_haastii".into()));
/// tree.add_root(vec![a, b], None);
///
/// assert_eq!(tree.num_terminals(), 2);
/// assert!(tree.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,
    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new tree with capacity for a fully resolved (binary) tree
    /// with `num_terminals` terminals.
    ///
    /// # Arguments
    /// * `num_terminals` - expected number of terminals; used for
    ///   pre-allocation only, the tree grows as needed
    pub fn new(num_terminals: usize) -> Self {
        let capacity = if num_terminals > 0 {
            2 * num_terminals - 1
        } else {
            0
        };
        Tree {
            vertices: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a terminal to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    /// * `taxon` - Taxon name of this terminal, if named
    ///
    /// # Returns
    /// The index of the newly created terminal vertex.
    pub fn add_terminal(
        &mut self,
        branch_length: Option<BranchLength>,
        taxon: Option<String>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_terminal(index, branch_length, taxon));
        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index,
    /// which gets returned. The children get their parent set to it.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in document order
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    ///
    /// # Panics
    /// Panics if `children` is empty or contains an out-of-bounds index.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        assert!(!children.is_empty(), "Internal vertex requires children");
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(Some(index));
        }
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length));
        index
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// The root may carry a branch length (some Newick files attach one),
    /// which has no structural meaning.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in document order
    /// * `branch_length` - Optional length found on the root in the input
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.add_internal(children, branch_length);
        self.root_index = index;
        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully
    /// constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Returns the number of terminals currently reachable from the root.
    pub fn num_terminals(&self) -> usize {
        self.terminals().count()
    }

    /// Returns the number of internal vertices currently reachable from the root.
    pub fn num_internal(&self) -> usize {
        self.pre_order_iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of slots in the arena.
    ///
    /// This includes vertices detached by pruning or re-rooting, so it is an
    /// upper bound on the number of reachable vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Traversal (pub)
// ============================================================================
impl Tree {
    /// Returns an iterator over the tree in pre-order (parents before
    /// children, children in document order).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the terminals of this tree, in document order.
    ///
    /// The order is stable and deterministic: it is the order in which the
    /// terminals appeared in the source Newick string, which the clade
    /// locator's first-k-occurrences matching relies on.
    pub fn terminals(&self) -> impl Iterator<Item = &Vertex> {
        self.pre_order_iter().filter(|v| v.is_terminal())
    }

    /// Returns the path from `index` up to the root, starting with `index`
    /// itself and ending with the root.
    fn path_to_root(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut path = vec![index];
        let mut current = self[index].parent();
        while let Some(i) = current {
            path.push(i);
            current = self[i].parent();
        }
        path
    }

    /// Returns the unique minimal vertex that contains all given vertices as
    /// descendants (every vertex counting as a descendant of itself).
    ///
    /// Defined for terminal and internal inputs alike; in particular, the
    /// common ancestor of a single vertex is that vertex.
    ///
    /// # Arguments
    /// * `indices` - Non-empty set of vertex indices, all reachable from the root
    ///
    /// # Panics
    /// Panics if `indices` is empty or contains a detached vertex.
    pub fn common_ancestor(&self, indices: &[VertexIndex]) -> VertexIndex {
        assert!(
            !indices.is_empty(),
            "Common ancestor requires at least one vertex"
        );

        // Root-first paths; the common ancestor is the deepest vertex on
        // which all paths still agree.
        let paths: Vec<Vec<VertexIndex>> = indices
            .iter()
            .map(|&i| {
                let mut path = self.path_to_root(i);
                path.reverse();
                path
            })
            .collect();

        let mut ancestor = self.root_index;
        'deepen: for (depth, &candidate) in paths[0].iter().enumerate() {
            for path in &paths[1..] {
                if path.get(depth) != Some(&candidate) {
                    break 'deepen;
                }
            }
            ancestor = candidate;
        }
        ancestor
    }
}

// ============================================================================
// Structural mutation (pub)
// ============================================================================
impl Tree {
    /// Unlinks `index` from its parent, keeping the order of its former
    /// siblings, and returns the former parent.
    ///
    /// Returns `None` (and changes nothing) if `index` has no parent.
    /// The subtree below `index` stays intact but becomes unreachable from
    /// the root; its arena slots are not reclaimed.
    pub fn detach(&mut self, index: VertexIndex) -> Option<VertexIndex> {
        let parent = self.vertices[index].parent()?;
        self.vertices[parent].remove_child(index);
        self.vertices[index].set_parent(None);
        Some(parent)
    }

    /// Removes a terminal and collapses now-redundant internal structure:
    /// the prune primitive.
    ///
    /// After detaching the terminal, the former parent is inspected and the
    /// check cascades up the ancestor chain:
    /// - a vertex left with a single child is spliced out, the child
    ///   absorbing the collapsed vertex's branch length (so child length +
    ///   parent length equals the direct path length in the original tree);
    /// - a vertex left with no children is detached as well;
    /// - a root left with a single child hands root-ship to that child,
    ///   whose branch length is cleared (a root has no branch above it).
    ///
    /// # Panics
    /// Panics if `index` is not a terminal, or is the root itself.
    pub fn remove_terminal(&mut self, index: VertexIndex) {
        assert!(
            self.vertices[index].is_terminal(),
            "Can only remove terminals, vertex {} is internal",
            index
        );
        assert!(
            index != self.root_index,
            "Cannot remove the root; prune callers must keep at least one terminal"
        );

        let mut current = self.detach(index);
        while let Some(vertex) = current {
            match self.vertices[vertex].children().len() {
                0 => {
                    // Lost every child to pruning; remove it as well
                    if vertex == self.root_index {
                        break;
                    }
                    current = self.detach(vertex);
                }
                1 => {
                    let child = self.vertices[vertex].children()[0];
                    if vertex == self.root_index {
                        self.vertices[vertex].remove_child(child);
                        self.vertices[child].set_parent(None);
                        self.vertices[child].set_branch_length(None);
                        self.root_index = child;
                        break;
                    }
                    let merged = BranchLength::merge(
                        self.vertices[child].branch_length(),
                        self.vertices[vertex].branch_length(),
                    );
                    let parent = self.vertices[vertex]
                        .parent()
                        .expect("non-root vertex has a parent");
                    self.vertices[parent].replace_child(vertex, child);
                    self.vertices[child].set_parent(Some(parent));
                    self.vertices[child].set_branch_length(merged);
                    self.vertices[vertex].remove_child(child);
                    self.vertices[vertex].set_parent(None);
                    current = Some(parent);
                }
                _ => break,
            }
        }
    }

    /// Restructures the tree so that a new root sits on the branch directly
    /// above `index`, dividing that branch's original length `t` into
    /// `t * split_fraction` (towards `index`) and `t * (1 - split_fraction)`
    /// (towards the rest of the tree).
    ///
    /// Parent/child polarity is reversed along the former root-to-`index`
    /// path; the rest of the topology is preserved. In particular the former
    /// root is kept even if it is left with a single child, so the new
    /// root's two child branches have exactly the split lengths.
    ///
    /// # Arguments
    /// * `index` - Vertex whose incoming branch receives the new root
    /// * `split_fraction` - Fraction of the branch length assigned to the
    ///   branch from the new root towards `index`; rooting at the midpoint
    ///   uses `0.5`
    ///
    /// # Returns
    /// The index of the new root vertex.
    ///
    /// # Panics
    /// Panics if `index` is the current root, has no branch length, or if
    /// `split_fraction` is outside `[0, 1]`.
    pub fn reroot_above(&mut self, index: VertexIndex, split_fraction: f64) -> VertexIndex {
        assert!(
            index != self.root_index,
            "Cannot reroot above the current root"
        );
        assert!(
            (0.0..=1.0).contains(&split_fraction),
            "Split fraction must be in [0, 1], got {}",
            split_fraction
        );
        let total = *self.vertices[index]
            .branch_length()
            .expect("Rerooting requires a branch length above the target");

        // Former attachment point up to the former root.
        let path = self.path_to_root(self.vertices[index].parent().expect("non-root"));
        // Incoming branch lengths along the path, towards the former root.
        let saved: Vec<Option<BranchLength>> =
            path.iter().map(|&i| self.vertices[i].branch_length()).collect();

        let anchor = path[0];
        self.vertices[anchor].remove_child(index);

        // Reverse parent/child polarity along the path: each vertex adopts
        // its former parent as its last child, and the former parent takes
        // over the branch length that used to point the other way.
        for i in 0..path.len() - 1 {
            let lower = path[i];
            let upper = path[i + 1];
            self.vertices[upper].remove_child(lower);
            self.vertices[lower].push_child(upper);
            self.vertices[upper].set_parent(Some(lower));
            self.vertices[upper].set_branch_length(saved[i]);
        }

        let towards_target = BranchLength::new(total * split_fraction);
        let towards_rest = BranchLength::new(total - *towards_target);
        let new_root = self.add_internal(vec![index, anchor], None);
        self.vertices[index].set_branch_length(Some(towards_target));
        self.vertices[anchor].set_branch_length(Some(towards_rest));
        self.root_index = new_root;
        new_root
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl Tree {
    /// Validates the tree structure reachable from the root.
    ///
    /// Checks:
    /// - Root index is set, in bounds, and the root has no parent
    /// - Every reachable vertex records its own arena position
    /// - All child indices are in bounds and point back to the parent
    /// - No vertex is reached twice (no sharing, no cycles)
    ///
    /// Detached arena slots are ignored; they are unreachable by design.
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }
        if self.root().parent().is_some() {
            return false;
        }

        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            if visited[index] {
                return false;
            }
            visited[index] = true;

            let vertex = &self.vertices[index];
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() {
                    return false;
                }
                if self.vertices[child].parent() != Some(index) {
                    return false;
                }
                stack.push(child);
            }
        }

        true
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without
/// recursion. Each vertex is visited before any of its descendants, and
/// children are visited in document order.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the first child is processed first
        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
