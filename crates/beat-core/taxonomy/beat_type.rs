//! Canonical beat taxonomy and per-type defaults
//!
//! Beat headers are free text. They are canonicalized into one of twelve
//! known beat types, or kept as a normalized fallback string so unknown beat
//! names never fail a parse.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default duration used when a beat type has no table entry
pub const FALLBACK_DURATION_SECONDS: u32 = 10;

/// Visual density of a beat
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    /// Sparse frame, few elements moving
    Low,
    /// Default pacing
    Medium,
    /// Busy frame, many elements moving
    High,
}

impl Density {
    /// Parse density keyword (case-insensitive)
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Keyword form used in output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type defaults for duration floor, density and mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatDefaults {
    /// Minimum on-screen duration in seconds
    pub duration: u32,
    /// Default visual density
    pub density: Density,
    /// Default mood keyword
    pub mood: &'static str,
}

/// Defaults for beat types outside the canonical taxonomy
pub const FALLBACK_DEFAULTS: BeatDefaults = BeatDefaults {
    duration: FALLBACK_DURATION_SECONDS,
    density: Density::Medium,
    mood: "calm",
};

/// Canonical beat type
///
/// Twelve known narrative beats plus an open fallback carrying the normalized
/// header text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BeatType {
    /// Headphones-on ritual that opens an episode
    OpeningRitual,
    /// Creator greets the audience and logs in
    CreatorWelcome,
    /// Notification or mail breaks the flow
    Interruption,
    /// Invite or surprise is shown
    Reveal,
    /// Stakes and intention are stated
    StakesIntention,
    /// Styling / wardrobe transformation
    Transformation,
    /// Short bridge between beats
    Transition,
    /// Travel to the event location
    EventTravel,
    /// Outcome of the event
    EventOutcome,
    /// A deliverable is made on screen
    DeliverableCreation,
    /// Payoff and call to action
    PayoffCta,
    /// Closing hook
    Cliffhanger,
    /// Normalized header text that matched no canonical type
    Other(String),
}

/// Canonical beat types in table order
pub const CANONICAL_BEAT_TYPES: [BeatType; 12] = [
    BeatType::OpeningRitual,
    BeatType::CreatorWelcome,
    BeatType::Interruption,
    BeatType::Reveal,
    BeatType::StakesIntention,
    BeatType::Transformation,
    BeatType::Transition,
    BeatType::EventTravel,
    BeatType::EventOutcome,
    BeatType::DeliverableCreation,
    BeatType::PayoffCta,
    BeatType::Cliffhanger,
];

impl BeatType {
    /// Canonical snake_case name, or the fallback text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpeningRitual => "opening_ritual",
            Self::CreatorWelcome => "creator_welcome",
            Self::Interruption => "interruption",
            Self::Reveal => "reveal",
            Self::StakesIntention => "stakes_intention",
            Self::Transformation => "transformation",
            Self::Transition => "transition",
            Self::EventTravel => "event_travel",
            Self::EventOutcome => "event_outcome",
            Self::DeliverableCreation => "deliverable_creation",
            Self::PayoffCta => "payoff_cta",
            Self::Cliffhanger => "cliffhanger",
            Self::Other(name) => name,
        }
    }

    /// Check whether this is one of the twelve canonical types
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Classify normalized header text
    ///
    /// The longest canonical name contained in `normalized` wins, so
    /// `"big_event_travel_day"` maps to `EventTravel`. Unmatched text becomes
    /// `Other`, empty text becomes `Other("untitled")`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use beat_core::BeatType;
    ///
    /// assert_eq!(BeatType::classify("reveal"), BeatType::Reveal);
    /// assert_eq!(BeatType::classify("the_opening_ritual"), BeatType::OpeningRitual);
    /// assert_eq!(BeatType::classify("montage"), BeatType::Other("montage".into()));
    /// ```
    #[must_use]
    pub fn classify(normalized: &str) -> Self {
        if normalized.is_empty() {
            return Self::Other("untitled".to_string());
        }

        CANONICAL_BEAT_TYPES
            .iter()
            .filter(|candidate| normalized.contains(candidate.as_str()))
            .max_by_key(|candidate| candidate.as_str().len())
            .cloned()
            .unwrap_or_else(|| Self::Other(normalized.to_string()))
    }

    /// Duration floor, density and mood for this type
    #[must_use]
    pub const fn defaults(&self) -> BeatDefaults {
        let (duration, density, mood) = match self {
            Self::OpeningRitual => (8, Density::Low, "calm"),
            Self::CreatorWelcome => (10, Density::Medium, "playful"),
            Self::Interruption => (10, Density::Medium, "energetic"),
            Self::Reveal => (12, Density::High, "dramatic"),
            Self::StakesIntention => (10, Density::Medium, "tense"),
            Self::Transformation => (15, Density::High, "energetic"),
            Self::Transition => (5, Density::Low, "calm"),
            Self::EventTravel => (10, Density::Medium, "dramatic"),
            Self::EventOutcome => (12, Density::High, "dramatic"),
            Self::DeliverableCreation => (10, Density::Medium, "playful"),
            Self::PayoffCta => (8, Density::Medium, "playful"),
            Self::Cliffhanger => (6, Density::Medium, "tense"),
            Self::Other(_) => return FALLBACK_DEFAULTS,
        };
        BeatDefaults {
            duration,
            density,
            mood,
        }
    }
}

impl fmt::Display for BeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for BeatType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_name_classifies_to_itself() {
        for beat_type in &CANONICAL_BEAT_TYPES {
            assert_eq!(&BeatType::classify(beat_type.as_str()), beat_type);
        }
    }

    #[test]
    fn longest_contained_name_wins() {
        assert_eq!(
            BeatType::classify("final_event_outcome"),
            BeatType::EventOutcome
        );
        assert_eq!(
            BeatType::classify("deliverable_creation_part"),
            BeatType::DeliverableCreation
        );
    }

    #[test]
    fn unknown_and_empty_fall_back() {
        assert_eq!(
            BeatType::classify("montage"),
            BeatType::Other("montage".to_string())
        );
        assert_eq!(
            BeatType::classify(""),
            BeatType::Other("untitled".to_string())
        );
        assert!(!BeatType::classify("montage").is_canonical());
    }

    #[test]
    fn fallback_defaults_for_unknown_type() {
        let defaults = BeatType::Other("montage".to_string()).defaults();
        assert_eq!(defaults.duration, FALLBACK_DURATION_SECONDS);
        assert_eq!(defaults.density, Density::Medium);
    }

    #[test]
    fn density_keywords() {
        assert_eq!(Density::from_keyword(" HIGH "), Some(Density::High));
        assert_eq!(Density::from_keyword("extreme"), None);
        assert_eq!(Density::Low.to_string(), "low");
    }
}
