//! Data model for rooted phylogenetic trees.
//!
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Taxon names are owned by
//! their terminal vertices, branching factor is arbitrary, and parent links
//! are plain indices, so ownership flows strictly root-to-leaf.
//!
//! Besides traversal, the model provides the two structural mutations the
//! editing operations are built on: terminal removal with collapse of
//! now-redundant internal vertices, and re-rooting on the branch above a
//! chosen vertex.

/// Phylogenetic tree structure, traversal, and structural mutation
pub mod tree;
/// Tree vertex type and branch lengths
pub mod vertex;

pub use tree::Tree;
pub use tree::VertexIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
