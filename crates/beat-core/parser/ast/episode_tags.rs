//! Episode-scoped directive payloads
//!
//! Tag payloads stay open `key → value` maps because the tag vocabulary is
//! extended by authors; only the value shape (text or number) is typed.

use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Single value in a key/value tag payload
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Bare integer token (`prestige=7`)
    Integer(i64),
    /// Bare decimal token (`score=8.5`)
    Float(f64),
    /// Quoted value or any non-numeric bare token
    Text(String),
}

impl TagValue {
    /// Coerce a bare token: integers, then finite decimals, else text
    ///
    /// # Example
    ///
    /// ```rust
    /// use beat_core::parser::ast::TagValue;
    ///
    /// assert_eq!(TagValue::coerce("150"), TagValue::Integer(150));
    /// assert_eq!(TagValue::coerce("-2.5"), TagValue::Float(-2.5));
    /// assert_eq!(TagValue::coerce("150coins"), TagValue::Text("150coins".into()));
    /// ```
    #[must_use]
    pub fn coerce(token: &str) -> Self {
        if let Ok(value) = token.parse::<i64>() {
            return Self::Integer(value);
        }

        let numeric_shape = token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
            && token.bytes().any(|b| b.is_ascii_digit());
        match token.parse::<f64>() {
            Ok(value) if numeric_shape && value.is_finite() => Self::Float(value),
            _ => Self::Text(token.to_string()),
        }
    }

    /// Text content, if this is a text value
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for TagValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Open key/value payload of an `[EVENT:]`, `[RESULT:]`, `[OVERRIDE:]` or
/// `[MAIL:]` tag
pub type TagMap = BTreeMap<String, TagValue>;

/// Integer deltas from one `[STAT_CHANGE:]` tag
pub type StatDeltas = BTreeMap<String, i64>;

/// Episode-scoped, order-independent directives
///
/// At most one `event`, `intent` and `result` (last occurrence wins);
/// `overrides` and `stat_changes` accumulate in document order. Empty or
/// malformed bodies are dropped, so every present field is well formed.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeTags {
    /// `[EVENT:]` payload (name, prestige, cost, strictness, deadline, …)
    pub event: Option<TagMap>,
    /// `[EPISODE_INTENT:]` text without quotes
    pub intent: Option<String>,
    /// `[RESULT:]` payload
    pub result: Option<TagMap>,
    /// `[OVERRIDE:]` payloads in document order
    pub overrides: Vec<TagMap>,
    /// `[STAT_CHANGE:]` deltas in document order
    pub stat_changes: Vec<StatDeltas>,
}

impl EpisodeTags {
    /// Check if an `[EVENT:]` tag was found
    #[must_use]
    pub const fn has_event(&self) -> bool {
        self.event.is_some()
    }

    /// Check if an `[EPISODE_INTENT:]` tag was found
    #[must_use]
    pub const fn has_intent(&self) -> bool {
        self.intent.is_some()
    }

    /// Event name, if the event payload carries one
    #[must_use]
    pub fn event_name(&self) -> Option<&str> {
        self.event.as_ref()?.get("name")?.as_text()
    }
}
