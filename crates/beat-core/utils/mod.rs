//! Utility functions and shared types for beat-core
//!
//! Contains error types, ahash-backed collections and text helpers used across
//! the parser, diagnostics and output modules.

pub mod errors;
pub mod hashers;
pub mod text;

pub use errors::{CoreError, Result};
pub use hashers::{create_hash_map, create_hash_set, distinct_in_order};
pub use text::{
    count_words, format_duration, humanize_title, normalize_line_endings, round_hundredths,
    strip_bom, truncate_chars,
};
