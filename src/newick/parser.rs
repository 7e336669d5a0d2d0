//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods to
//! parse a single Newick string or all trees in a semicolon-separated input.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::byte_parser::ByteParser;
use crate::parser::parse_error::ParseError;

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace
const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Default guess for number of terminals, when unknown
const DEFAULT_NUM_TERMINALS_GUESS: usize = 10;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for single/multiple Newick format phylogenetic
/// [Tree]s.
///
/// Internal vertices may have any number of children (one or more), so
/// multifurcating trees and the degree-two vertices left behind by
/// re-rooting parse fine. Node labels following a closing parenthesis
/// (support values, clade markers) are stored verbatim on the vertex.
///
/// # Configuration
/// * [`with_num_terminals(n)`](Self::with_num_terminals) - Can be configured
///   with the number of terminals in the trees to parse, otherwise it is
///   inferred from the first parsed tree and then stored.
///
/// # Format
/// The Newick format has the following simple structure:
/// * `tree ::= vertex ';'`
/// * `vertex ::= leaf | internal_vertex`
/// * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
/// * `leaf ::= label [branch_length]`
/// * `branch_length ::= ':' number`
///
/// Furthermore:
/// * Whitespace can occur between elements,
///   just not within an unquoted label or a branch_length
/// * Comments are square brackets and can occur anywhere whitespace can
///
/// # Example
/// ```
/// use cladekit::newick::NewickParser;
/// use cladekit::parser::byte_parser::ByteParser;
///
/// let input = "((A:1.0,B:1.0):0.5,C:1.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let mut newick_parser = NewickParser::new();
///
/// let tree = newick_parser.parse(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_terminals(), 3);
/// ```
pub struct NewickParser {
    know_num_terminals: bool,
    num_terminals: usize,
}

impl NewickParser {
    /// Creates a new `NewickParser` with default settings:
    /// the number of terminals is unknown and will be counted during parsing.
    pub fn new() -> Self {
        Self {
            know_num_terminals: false,
            num_terminals: DEFAULT_NUM_TERMINALS_GUESS,
        }
    }

    /// Sets the expected number of terminals in each parsed tree.
    ///
    /// This allows pre-allocation of data structures for better performance.
    /// If not set, the parser will count terminals during parsing.
    pub fn with_num_terminals(mut self, num_terminals: usize) -> Self {
        self.num_terminals = num_terminals;
        self.know_num_terminals = true;
        self
    }

    /// Parses all Newick trees from the byte parser until EOF.
    ///
    /// # Arguments
    /// * `parser` - A byte parser whose input contains only Newick strings,
    ///   except for whitespace and `[...]` comments
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees, in input order
    /// * `Err(ParseError)` - If any tree fails to parse
    pub fn parse_all(&mut self, mut parser: ByteParser) -> Result<Vec<Tree>, ParseError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                break;
            }
            trees.push(self.parse(&mut parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParseError)` - If the Newick format is invalid
    pub fn parse(&mut self, parser: &mut ByteParser) -> Result<Tree, ParseError> {
        let mut tree = Tree::new(self.num_terminals);

        // If the number of terminals is not known yet, reset it to 0,
        // so the actual count can now be tracked
        if !self.know_num_terminals {
            self.num_terminals = 0;
        }

        self.parse_root(parser, &mut tree)?;

        // Having parsed a full tree, the number of terminals is now known
        self.know_num_terminals = true;

        Ok(tree)
    }

    /// Parses root of tree and adds it to tree:
    /// - `(children)[label][:branch_length];`
    /// - Skips leading comments and whitespace
    ///
    /// Equivalent to `parse_internal_vertex` but takes care of root
    /// specialities, in particular the terminating semicolon.
    fn parse_root(&mut self, parser: &mut ByteParser, tree: &mut Tree) -> Result<(), ParseError> {
        parser.skip_comment_and_whitespace()?;

        let children = self.parse_children(parser, tree)?;
        let label = self.parse_node_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParseError::invalid_newick(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        let root_index = tree.add_root(children, branch_length);
        if let Some(label) = label {
            tree[root_index].set_label(label);
        }

        Ok(())
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`,
    ///   otherwise `parse_leaf`
    fn parse_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParseError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(children)[label][:branch_length]`
    fn parse_internal_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParseError> {
        let children = self.parse_children(parser, tree)?;
        let label = self.parse_node_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        let index = tree.add_internal(children, branch_length);
        if let Some(label) = label {
            tree[index].set_label(label);
        }

        Ok(index)
    }

    /// Parses a parenthesized child list `(vertex, vertex, ...)` and returns
    /// the child indices:
    /// - Expects parser at opening `(`
    ///   (caller should skip leading comments/whitespace)
    /// - One or more children, comma-separated
    fn parse_children(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<Vec<VertexIndex>, ParseError> {
        // Parse: "(first"
        // Calling methods should have skipped comments and whitespace
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParseError::invalid_newick(
                parser,
                format!("Expected '(' before children but found {:?}", next_char),
            ));
        }
        let mut children = vec![self.parse_vertex(parser, tree)?];

        // Parse: ",next" as long as there are more children
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b',') {
                children.push(self.parse_vertex(parser, tree)?);
            } else {
                break;
            }
        }

        // Parse: ")"
        if !parser.consume_if(b')') {
            let next_char = parser.peek().map(char::from);
            return Err(ParseError::invalid_newick(
                parser,
                format!("Expected ',' or ')' after child but found {:?}", next_char),
            ));
        }

        Ok(children)
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///   (caller should skip leading comments/whitespace)
    ///
    /// An empty label yields an unnamed terminal, which the Newick format
    /// permits.
    fn parse_leaf(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParseError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let taxon = if label.is_empty() { None } else { Some(label) };
        let branch_length = self.parse_branch_length(parser)?;

        let index = tree.add_terminal(branch_length, taxon);
        if !self.know_num_terminals {
            self.num_terminals += 1;
        }

        Ok(index)
    }

    /// Parses an optional node label following a closing parenthesis
    /// (a support value like `0.95` or a clade marker like `#1`).
    ///
    /// # Returns
    /// - `Ok(Some(label))` if a label was found
    /// - `Ok(None)` if a delimiter follows immediately
    fn parse_node_label(&mut self, parser: &mut ByteParser) -> Result<Option<String>, ParseError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        Ok(if label.is_empty() { None } else { Some(label) })
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if found no branch length
    /// - [ParseError] if the value is not a valid non-negative finite number
    fn parse_branch_length(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Option<BranchLength>, ParseError> {
        // Parse: Whitespace/Comments : Whitespace/Comments
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte(); // consume it
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParseError::invalid_newick(
                parser,
                format!("Invalid branch length: {}", branch_length_str),
            )
        })?;
        if value < 0.0 || !value.is_finite() {
            return Err(ParseError::invalid_newick(
                parser,
                format!("Branch length must be non-negative, got {}", branch_length_str),
            ));
        }
        Ok(Some(BranchLength::new(value)))
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}
