//! Clade resolution and editing.
//!
//! The pipeline shared by all tools: a [TaxonSelection] names the taxa of
//! interest, [locator::locate] finds the terminals carrying those names and
//! their common ancestor, and the [editor] operations mutate the tree
//! around the located clade (attach a label, prune the terminals, or
//! reroot on the branch above the clade).

/// Label, prune, and reroot operations
pub mod editor;
/// Clade location with first-k-occurrences name matching
pub mod locator;
/// Taxon selection and name list reading
pub mod taxa;

pub use editor::{label_clade, prune_taxa, reroot_on_outgroup};
pub use locator::locate;
pub use taxa::{TaxonSelection, read_taxon_names};
