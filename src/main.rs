use clap::{Parser, Subcommand};
use cladekit::{TaxonSelection, label_file, prune_file, reroot_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "Label, prune, and reroot phylogenetic trees in Newick format.\n\n\
    Taxa of interest can be specified by name prefix (-p), a file listing \
    them (-f), or listing them on the command line (-t). -f and -t can be \
    used in conjunction, but neither can be used with -p.\n\n\
    Labelling the common ancestor of taxa is especially useful for PAML \
    models, where branches of interest are marked with \"#1\" etc. Note that \
    the label must be passed as \\#1, so the shell does not mistake '#' for \
    a comment.";

#[derive(Parser)]
#[command(name = "cladekit", about = "Manipulate phylogenetic trees in Newick format", long_about = LONG_ABOUT)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Label an internal node, specified by its descendant taxa
    Label {
        /// File containing one or more Newick trees
        tree_path: PathBuf,
        /// Output file; results are appended if it already exists
        out_path: PathBuf,
        /// Label to add to the clade of interest (e.g. \#1)
        #[arg(short, long)]
        label: String,
        /// Prefix denoting taxa whose common ancestor node is to be labelled
        #[arg(short, long)]
        prefix: Option<String>,
        /// File containing names of taxa whose common ancestor node is to be
        /// labelled (in a single column with no header)
        #[arg(short = 'f', long = "file")]
        taxa_file: Option<PathBuf>,
        /// Names of individual taxa whose common ancestor node is to be labelled
        #[arg(short = 't', long = "taxa", num_args = 1..)]
        taxa: Vec<String>,
    },
    /// Prune one or more Newick trees of specified taxa
    Prune {
        /// File containing one or more Newick trees
        tree_path: PathBuf,
        /// Output file; results are appended if it already exists
        out_path: PathBuf,
        /// Prefixes for taxon names to be pruned (e.g. 'hu.' for human)
        #[arg(short, long, num_args = 1..)]
        prefixes: Vec<String>,
        /// File containing names of taxa to be pruned from the tree
        /// (in a single column with no header)
        #[arg(short = 'f', long = "file")]
        taxa_file: Option<PathBuf>,
        /// Names of individual taxa to be pruned
        #[arg(short = 't', long = "taxa", num_args = 1..)]
        taxa: Vec<String>,
    },
    /// Reroot trees on the branch leading to an outgroup's common ancestor
    ///
    /// The root is placed exactly half way along that branch: rooting on a
    /// branch of length t, the branches leading from the root to the
    /// outgroup clade and to the ingroup clade will each be of length t/2.
    Reroot {
        /// Input file contains more than one tree, all rooted with the same outgroup
        #[arg(short, long)]
        multiple: bool,
        /// File containing one or more Newick trees
        tree_path: PathBuf,
        /// File containing names of the outgroup taxa; the tree will be
        /// rooted on the branch leading to their most recent common ancestor
        outgroup_file: PathBuf,
        /// Output file; results are appended if it already exists
        out_path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Label {
            tree_path,
            out_path,
            label,
            prefix,
            taxa_file,
            taxa,
        } => {
            // Selection conflicts are reported before any tree is read
            let selection = TaxonSelection::from_parts(
                prefix.into_iter().collect(),
                taxa_file.as_deref(),
                taxa,
            )?;
            label_file(&tree_path, &out_path, &selection, &label)?;
        }
        Command::Prune {
            tree_path,
            out_path,
            prefixes,
            taxa_file,
            taxa,
        } => {
            let selection = TaxonSelection::from_parts(prefixes, taxa_file.as_deref(), taxa)?;
            prune_file(&tree_path, &out_path, &selection)?;
        }
        Command::Reroot {
            multiple,
            tree_path,
            outgroup_file,
            out_path,
        } => {
            reroot_file(&tree_path, &outgroup_file, &out_path, multiple)?;
        }
    }

    Ok(())
}
