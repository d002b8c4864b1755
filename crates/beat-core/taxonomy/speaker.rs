//! Speaker alias table
//!
//! Dialogue lines name their speaker loosely (`Lala`, `ME`, `Prime`,
//! `Message`). Every alias resolves case-insensitively to one of four canonical
//! speakers; anything unknown is attributed to `system`.

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Canonical speaker identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Speaker {
    /// The animated avatar; needs a voice activation cue before speaking
    Lala,
    /// The creator persona narrating the episode
    Prime,
    /// A visiting guest
    Guest,
    /// On-screen text, system messages and unknown speakers
    System,
}

/// Alias → speaker lookup, matched case-insensitively
const SPEAKER_ALIASES: &[(&str, Speaker)] = &[
    ("lala", Speaker::Lala),
    ("prime", Speaker::Prime),
    ("me", Speaker::Prime),
    ("you", Speaker::Prime),
    ("justawoman", Speaker::Prime),
    ("justawomaninherprime", Speaker::Prime),
    ("guest", Speaker::Guest),
    ("system", Speaker::System),
    ("message", Speaker::System),
];

/// Display record for legacy scene projection
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerDisplay {
    /// Canonical id
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Badge shown in scene notes
    pub emoji: &'static str,
}

impl Speaker {
    /// Resolve an authored speaker name, falling back to `System`
    ///
    /// # Example
    ///
    /// ```rust
    /// use beat_core::Speaker;
    ///
    /// assert_eq!(Speaker::resolve("ME"), Speaker::Prime);
    /// assert_eq!(Speaker::resolve("Narrator"), Speaker::System);
    /// ```
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or(Self::System)
    }

    /// Resolve an alias without fallback
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        SPEAKER_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, speaker)| *speaker)
    }

    /// Canonical id used in output
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Lala => "lala",
            Self::Prime => "prime",
            Self::Guest => "guest",
            Self::System => "system",
        }
    }

    /// Display record for scene notes
    #[must_use]
    pub const fn display(self) -> SpeakerDisplay {
        let (name, emoji) = match self {
            Self::Lala => ("Lala", "\u{1F451}"),
            Self::Prime => ("JustAWomanInHerPrime", "\u{1F48E}"),
            Self::Guest => ("Guest", "\u{1F31F}"),
            Self::System => ("System", "\u{1F4AC}"),
        };
        SpeakerDisplay {
            id: self.id(),
            name,
            emoji,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Speaker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_case_insensitive() {
        assert_eq!(Speaker::resolve("LALA"), Speaker::Lala);
        assert_eq!(Speaker::resolve("You"), Speaker::Prime);
        assert_eq!(Speaker::resolve("message"), Speaker::System);
        assert_eq!(Speaker::resolve(" guest "), Speaker::Guest);
    }

    #[test]
    fn unknown_speaker_is_system() {
        assert_eq!(Speaker::lookup("Text"), None);
        assert_eq!(Speaker::resolve("Text"), Speaker::System);
    }

    #[test]
    fn display_records() {
        let display = Speaker::Lala.display();
        assert_eq!(display.id, "lala");
        assert_eq!(display.name, "Lala");
        assert_eq!(Speaker::Prime.to_string(), "prime");
    }
}
