//! Unrecoverable parse failures

use thiserror::Error;

/// Failure to produce any beat from a script
///
/// Display strings are part of the output contract and appear verbatim in
/// the failure shape of [`crate::ParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or whitespace-only
    #[error("No script content provided")]
    EmptyInput,

    /// Input held only episode directives and no beat content
    #[error("No beats found in script content")]
    NoBeats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(ParseError::EmptyInput.to_string(), "No script content provided");
        assert_eq!(
            ParseError::NoBeats.to_string(),
            "No beats found in script content"
        );
    }
}
