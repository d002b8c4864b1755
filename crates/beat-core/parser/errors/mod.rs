//! Parser error types for beat scripts
//!
//! Parsing favors forward progress: malformed tags, unknown beat names and
//! unrecognized speakers all degrade gracefully. Only input with nothing to
//! parse is an error, so [`ParseError`] is the single failure a caller must
//! branch on.

pub mod parse_error;

pub use parse_error::ParseError;
