//! Error types for the Newick parser.
//!
//! This module provides [ParseError] and [ParseErrorKind] for representing
//! and reporting errors that occur while parsing phylogenetic tree files.

use crate::parser::byte_parser::ByteParser;
use std::fmt;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSE ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur during Newick parsing.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParseErrorKind {
    #[error("IO error - {0}")]
    Io(String),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Invalid newick string: {0}")]
    InvalidNewick(String),
}

// =#========================================================================#=
// PARSE ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
    context: String,
}

impl ParseError {
    /// Create a ParseError from an error kind and parser state
    pub fn from_parser(kind: ParseErrorKind, parser: &ByteParser) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof(parser: &ByteParser) -> Self {
        Self::from_parser(ParseErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment(parser: &ByteParser) -> Self {
        Self::from_parser(ParseErrorKind::UnclosedComment, parser)
    }

    /// Convenience constructor for InvalidNewick
    pub fn invalid_newick(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::InvalidNewick(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)?;

        if !self.context.is_empty() {
            write!(
                f,
                "\n  Context (next {} bytes): {}",
                self.context.len(),
                self.context
            )?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError {
            kind: ParseErrorKind::Io(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}
