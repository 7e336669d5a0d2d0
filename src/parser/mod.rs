//! Low-level parsing infrastructure shared by the Newick parser.

/// Byte-by-byte cursor with quote-aware label parsing
pub mod byte_parser;
/// Parse errors with position and context
pub mod parse_error;
/// Label escaping for Newick output
pub mod utils;

pub use byte_parser::ByteParser;
pub use parse_error::{ParseError, ParseErrorKind};
