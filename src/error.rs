//! Error type for the clade editing operations and their drivers.

use crate::parser::ParseError;
use thiserror::Error;

// =#========================================================================#=
// CLADE ERROR
// =#========================================================================#=
/// Errors raised while resolving taxa, locating clades, editing trees,
/// or driving a whole file through an operation.
///
/// Configuration errors ([ConfigurationConflict](CladeError::ConfigurationConflict),
/// [NoSelection](CladeError::NoSelection)) and input errors
/// ([Parse](CladeError::Parse), [Io](CladeError::Io)) are fatal and reported
/// before any output is produced. The remaining kinds are per-tree failures;
/// in a multi-tree batch each failing tree is reported individually and the
/// run finishes with [Batch](CladeError::Batch).
#[derive(Debug, Error)]
pub enum CladeError {
    /// Taxa were specified both by prefix and by explicit name.
    #[error("cannot select taxa both by prefix (-p) and by explicit names (-f/-t)")]
    ConfigurationConflict,

    /// No taxon selection was provided at all.
    #[error("no taxon identifiers provided; use -p, -f, or -t")]
    NoSelection,

    /// Fewer matching terminals than requested names; lists the names whose
    /// occurrence count was never satisfied.
    #[error("taxa not found among terminals: {}", missing.join(", "))]
    TaxaNotFound {
        /// Requested names that never matched, in request order
        missing: Vec<String>,
    },

    /// A selection resolved to no terminal at all.
    #[error("no terminals match {0}")]
    NoMatchingTaxa(String),

    /// A prune would remove every terminal from the tree.
    #[error("pruning would remove every terminal from the tree")]
    EmptyResultTree,

    /// The reroot target is the current root, or has no branch length above
    /// it to place the new root on.
    #[error("outgroup clade has no branch above it to reroot on")]
    DegenerateRoot,

    /// A single-tree operation was run on a multi-tree input.
    #[error("expected a single tree but input contains {0}; use -m for multi-tree files")]
    SingleTreeExpected(usize),

    /// One or more trees of a batch failed; the individual failures have
    /// been reported with their tree indices.
    #[error("failed on {failed} of {total} trees; successfully processed trees were written")]
    Batch {
        /// Number of trees that failed
        failed: usize,
        /// Number of trees in the input
        total: usize,
    },

    /// Input was not valid Newick.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
