//! Typed records produced by the parser
//!
//! - [`RawBeatBlock`]: segmenter output
//! - [`Beat`] and [`UiAction`]: the native Scene Plan shape
//! - [`EpisodeTags`]: episode-scoped directives
//!
//! Every type here is owned data (`Send + Sync`) created fresh per parse.

pub mod beat;
pub mod episode_tags;
pub mod raw_block;
pub mod ui_action;

pub use beat::{Beat, BeatSource, BeatTags, Confidence, FxCue, SceneCue, StatTag};
pub use episode_tags::{EpisodeTags, StatDeltas, TagMap, TagValue};
pub use raw_block::{RawBeatBlock, SourceLine};
pub use ui_action::{UiAction, UiActionSource, UiActionType, DEFAULT_UI_DURATION_SECONDS};
