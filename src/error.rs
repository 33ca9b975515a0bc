//! This module contains the error and result definitions used when parsing
//! puzzle input.
//!
//! Contract violations inside the engine itself (such as reading the value of
//! an undetermined cell) are programming errors and panic instead of being
//! reported through these types.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// An error that occurred while parsing textual puzzle input, together with
/// the 1-based input line on which it was detected.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseError {

    /// The 1-based number of the offending input line. For errors raised at
    /// the end of the input, this is the number of the last line read.
    pub line: usize,

    /// The kind of malformation that was detected.
    pub kind: ParseErrorKind
}

impl ParseError {
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line,
            kind
        }
    }
}

/// An enumeration of the ways in which puzzle input can be malformed.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseErrorKind {

    /// Indicates that the input ended before the grid was complete.
    UnexpectedEnd,

    /// Indicates that a token which should have been a number could not be
    /// parsed as one.
    MalformedNumber,

    /// Indicates that the declared quadrant count is too small. A meaningful
    /// puzzle requires at least 2 quadrants per side.
    InvalidQuadrantCount,

    /// Indicates that a grid line does not contain the number of cell values
    /// required by the declared dimensions.
    WrongNumberOfValues {

        /// The number of values the grid dimensions require per line.
        expected: usize,

        /// The number of values that were actually found.
        actual: usize
    },

    /// Indicates that a cell value lies outside the valid range, which is
    /// determined by the grid dimensions.
    ValueOutOfRange {

        /// The offending value.
        value: usize,

        /// The highest value valid for this grid.
        max: usize
    }
}

/// Syntactic sugar for `Result<V, ParseError>`.
pub type ParseResult<V> = Result<V, ParseError>;

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "error at input line {}: ", self.line)?;

        match &self.kind {
            ParseErrorKind::UnexpectedEnd =>
                write!(f, "unexpected end of input"),
            ParseErrorKind::MalformedNumber =>
                write!(f, "expected a number"),
            ParseErrorKind::InvalidQuadrantCount =>
                write!(f, "quadrant count must be at least 2"),
            ParseErrorKind::WrongNumberOfValues { expected, actual } =>
                write!(f, "expected {} values, got {}", expected, actual),
            ParseErrorKind::ValueOutOfRange { value, max } =>
                write!(f, "value {} is outside the valid range [1, {}]",
                    value, max)
        }
    }
}

impl Error for ParseError { }

impl From<ParseIntError> for ParseErrorKind {
    fn from(_: ParseIntError) -> Self {
        ParseErrorKind::MalformedNumber
    }
}
