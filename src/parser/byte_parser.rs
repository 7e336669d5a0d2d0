//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser], the cursor the Newick parser runs on,
//! with support for peeking, consuming, whitespace and comment skipping, and
//! quote-aware label parsing. Input trees are small, so the whole input is
//! held in memory.

use crate::parser::parse_error::ParseError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming,
/// and quote-aware label parsing.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes with doubled-quote escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use cladekit::parser::byte_parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("(A:1.0,B:1.0);");
/// assert!(parser.consume_if(b'('));
/// let label = parser.parse_label(b",:()").unwrap();
/// assert_eq!(label, "A");
/// ```
pub struct ByteParser {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the input
    pos: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` owning the given bytes.
    pub fn from_vec(input: Vec<u8>) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` from a string by copying its bytes.
    pub fn for_str(input: &str) -> Self {
        Self::from_vec(input.as_bytes().to_vec())
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Checks if the current byte matches the target byte.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space, tab, newline, and carriage return.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a `[...]` comment if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParseError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParseError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }
        loop {
            match self.next_byte() {
                Some(b']') => return Ok(true),
                Some(_) => continue,
                None => return Err(ParseError::unclosed_comment(self)),
            }
        }
    }

    /// Skips (consumes) all consecutive whitespace and `[...]` comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current parser position in the input.
    ///
    /// Useful for error messages and tracking parser state.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string of up to `k` bytes from the current position for
    /// error context. Invalid UTF-8 sequences are replaced with the Unicode
    /// replacement character.
    pub fn context_as_string(&self, k: usize) -> String {
        let end = (self.pos + k).min(self.input.len());
        String::from_utf8_lossy(&self.input[self.pos..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// This method automatically detects whether the label is quoted (single
    /// quotes) or unquoted and calls the appropriate parsing method. Leading
    /// whitespace and comments are skipped.
    ///
    /// # Arguments
    /// * `delimiters` - Byte array of characters that end an unquoted label
    ///
    /// # Returns
    /// The parsed label string; empty if a delimiter follows immediately
    ///
    /// # Errors
    /// Returns an error if quote parsing fails
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParseError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes
    /// within the label are escaped by doubling them (e.g., `'Wilson''s'`
    /// becomes `Wilson's`).
    ///
    /// # Returns
    /// The parsed label string without the enclosing quotes
    ///
    /// # Errors
    /// Returns an error if the quoted label is not properly closed
    pub fn parse_quoted_label(&mut self) -> Result<String, ParseError> {
        self.next_byte(); // consume opening '

        let mut label = String::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Check for escaped quote (two single quotes in a row)
                    if self.peek() == Some(b'\'') {
                        label.push('\'');
                        self.next_byte(); // consume second quote
                    } else {
                        // End of quoted label
                        return Ok(label);
                    }
                }
                Some(b) => label.push(b as char),
                None => return Err(ParseError::unexpected_eof(self)),
            }
        }
    }

    /// Parses an unquoted label until any of the given delimiters is
    /// encountered.
    ///
    /// # Arguments
    /// * `delimiters` - Byte array of characters that terminate the label
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = String::new();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b as char);
            self.pos += 1;
        }
        label
    }
}
