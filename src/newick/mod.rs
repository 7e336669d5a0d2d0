//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [Tree] structures, and a writer to render mutated trees back to
//! Newick text.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file, returns all [`Tree`]s in input order
//! * [`parse_str`] - parses a single string, returns a [`Tree`]
//! * [`to_newick`] - renders a [`Tree`] as a Newick string
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Internal vertices may have any number of children, and a label following
//! the closing parenthesis (a support value, or a clade marker such as `#1`)
//! is stored verbatim and re-emitted verbatim.

mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, write_newick_line};

use crate::model::Tree;
use crate::parser::ParseError;
use crate::parser::byte_parser::ByteParser;
use std::fs;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees, in input order.
///
/// This is a convenience function to parse a file containing a
/// semicolon-separated list of Newick strings, using default settings and
/// thus not requiring configuration of a parser.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or
///   `PathBuf`) with semicolon-separated list of Newick strings
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees
/// * [`ParseError`] - If file reading fails or Newick format is invalid
///
/// # Format
/// Expects standard Newick format with trees separated by semicolons.
/// Multiple trees can appear on the same line or across multiple lines,
/// and `[...]` comments and whitespace are fine.
///
/// # Example
/// ```ignore
/// use cladekit::newick::parse_file;
///
/// let trees = parse_file("strigiformes.nwk")?;
/// println!("Parsed {} trees", trees.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParseError> {
    let contents = fs::read(path)?;
    let byte_parser = ByteParser::from_vec(contents);
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string to obtain a [`Tree`].
///
/// This is a convenience function for quick parsing of a single Newick
/// string using default settings and thus not requiring configuration of a
/// parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [`Tree`] - Tree parsed from the string
/// * [`ParseError`] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use cladekit::newick::parse_str;
///
/// let tree = parse_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
/// assert_eq!(tree.num_terminals(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse(&mut byte_parser)
}
