//! The canonical unit of output

use super::TagMap;
use crate::taxonomy::{BeatType, Density, Speaker};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Whether the beat boundary came from an explicit header
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Opened by a `## BEAT:` header
    Confident,
    /// Inferred; an author should review it
    Review,
}

/// Source span of a beat
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatSource {
    /// Whether an explicit header opened the beat
    pub header_present: bool,
    /// First line of the beat (header line when present)
    pub start_line: usize,
    /// Last buffered line of the beat
    pub end_line: usize,
}

/// `[FX:<TYPE> <target>]`
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxCue {
    /// Effect type, upper-cased
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Effect target or size
    pub target: String,
}

/// `[SCENE:<ACTION> <target>]`
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCue {
    /// Scene action, upper-cased
    pub action: String,
    /// Scene target
    pub target: String,
}

/// `[STAT: <key> <delta>]`
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTag {
    /// Stat name
    pub key: String,
    /// Signed change
    pub delta: i64,
}

/// Optional inline tags collected from a beat
///
/// Each group is populated only when present in source and omitted from
/// serialized output otherwise.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatTags {
    /// `[MAIL:]` payloads
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub mail: Vec<TagMap>,
    /// `[STAT:]` changes
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub stats: Vec<StatTag>,
    /// `[FX:]` cues
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub fx: Vec<FxCue>,
    /// `[SCENE:]` directives
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub scenes: Vec<SceneCue>,
    /// Last `[LOCATION_HINT:]` / `[LOCATION:]` value
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub location_hint: Option<String>,
}

impl BeatTags {
    /// Check if no tag group is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mail.is_empty()
            && self.stats.is_empty()
            && self.fx.is_empty()
            && self.scenes.is_empty()
            && self.location_hint.is_none()
    }
}

/// One parsed beat
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Beat {
    /// `beat-{orderPosition}`
    pub temp_id: String,
    /// Canonical type or normalized fallback
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub beat_type: BeatType,
    /// Author ordinal from the header
    pub beat_index: u32,
    /// Dense 1-based position in the script
    pub order_position: usize,
    /// Humanized title
    pub title: String,
    /// Header text as written
    pub raw_title: String,
    /// `confident` with a header, `review` without
    pub confidence: Confidence,
    /// Synthesized or overridden screen time
    pub duration_seconds: u32,
    /// `[DURATION:]` value, if any
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub duration_override: Option<u32>,
    /// Where the beat came from
    pub source: BeatSource,
    /// Distinct canonical speakers in first-seen order
    pub speakers: Vec<Speaker>,
    /// Number of dialogue lines
    pub dialogue_count: usize,
    /// Words across dialogue, stage directions and narration
    pub word_count: usize,
    /// Visual density
    pub density: Density,
    /// Mood keyword
    pub mood: String,
    /// Explicit `[TRANSITION:]` value
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub transition: Option<String>,
    /// Inline tag groups
    pub tags: BeatTags,
    /// First content lines, for scene summaries
    #[cfg_attr(feature = "serde", serde(skip))]
    pub excerpt: String,
}

impl Beat {
    /// Check if the beat was opened by an explicit header
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.source.header_present
    }

    /// Check if a canonical speaker talks in this beat
    #[must_use]
    pub fn has_speaker(&self, speaker: Speaker) -> bool {
        self.speakers.contains(&speaker)
    }
}
