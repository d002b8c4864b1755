//! Fixed lookup tables shared by every parse
//!
//! Beat taxonomy with per-type defaults and the speaker alias table. These
//! are immutable process-wide constants, safe to read from concurrent parses.
//! UI action durations live with [`crate::parser::ast::UiActionType`].

pub mod beat_type;
pub mod speaker;

pub use beat_type::{
    BeatDefaults, BeatType, Density, CANONICAL_BEAT_TYPES, FALLBACK_DEFAULTS,
    FALLBACK_DURATION_SECONDS,
};
pub use speaker::{Speaker, SpeakerDisplay};
