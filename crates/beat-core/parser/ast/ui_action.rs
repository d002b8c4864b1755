//! Simulated interface events
//!
//! `[UI:<VERB> <target>]` lines become [`UiAction`]s. Verbs fold into a closed
//! set of nineteen action types, each with a fixed on-screen duration that
//! drives the per-beat clock.

use core::fmt;

use super::{TagMap, TagValue};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Duration for action types missing from the table
pub const DEFAULT_UI_DURATION_SECONDS: f64 = 0.5;

/// Closed enumeration of UI action types
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiActionType {
    /// Open a window or panel
    Open,
    /// Close a window or panel
    Close,
    /// Click an element
    Click,
    /// Type text into a field
    Type,
    /// Show an overlay
    Display,
    /// Hide an element
    Hide,
    /// Notification ping
    Notification,
    /// Activate the avatar voice
    VoiceActivate,
    /// Scroll a list
    Scroll,
    /// Add an item
    Add,
    /// Remove an item
    Remove,
    /// Tick a checklist entry
    CheckItem,
    /// Swap the background
    SetBackground,
    /// Play a sound effect
    PlaySfx,
    /// Start music
    PlayMusic,
    /// Stop music
    StopMusic,
    /// Hover an element
    Hover,
    /// Select an item
    Select,
    /// Pulse an element for attention
    Pulse,
}

impl UiActionType {
    /// Fold an authored verb into its canonical action type
    ///
    /// Case, dashes and underscores are ignored, so `VOICE_ACTIVATE`,
    /// `voice-activate` and `VoiceActivate` agree. A few short aliases are
    /// accepted (`CHECK`, `SHOW`, `NOTIFY`, `SFX`, `MUSIC`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use beat_core::parser::ast::UiActionType;
    ///
    /// assert_eq!(UiActionType::from_verb("VOICE_ACTIVATE"), Some(UiActionType::VoiceActivate));
    /// assert_eq!(UiActionType::from_verb("Check"), Some(UiActionType::CheckItem));
    /// assert_eq!(UiActionType::from_verb("TELEPORT"), None);
    /// ```
    #[must_use]
    pub fn from_verb(verb: &str) -> Option<Self> {
        let folded: String = verb
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        let action = match folded.as_str() {
            "open" => Self::Open,
            "close" => Self::Close,
            "click" => Self::Click,
            "type" => Self::Type,
            "display" | "show" => Self::Display,
            "hide" => Self::Hide,
            "notification" | "notify" => Self::Notification,
            "voiceactivate" => Self::VoiceActivate,
            "scroll" => Self::Scroll,
            "add" => Self::Add,
            "remove" => Self::Remove,
            "checkitem" | "check" => Self::CheckItem,
            "setbackground" | "background" => Self::SetBackground,
            "playsfx" | "sfx" => Self::PlaySfx,
            "playmusic" | "music" => Self::PlayMusic,
            "stopmusic" => Self::StopMusic,
            "hover" => Self::Hover,
            "select" => Self::Select,
            "pulse" => Self::Pulse,
            _ => return None,
        };
        Some(action)
    }

    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Click => "click",
            Self::Type => "type",
            Self::Display => "display",
            Self::Hide => "hide",
            Self::Notification => "notification",
            Self::VoiceActivate => "voice_activate",
            Self::Scroll => "scroll",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::CheckItem => "check_item",
            Self::SetBackground => "set_background",
            Self::PlaySfx => "play_sfx",
            Self::PlayMusic => "play_music",
            Self::StopMusic => "stop_music",
            Self::Hover => "hover",
            Self::Select => "select",
            Self::Pulse => "pulse",
        }
    }

    /// Fixed on-screen duration in seconds
    #[must_use]
    pub const fn duration_seconds(self) -> f64 {
        match self {
            Self::Type => 2.0,
            Self::Display | Self::Notification | Self::Scroll => 1.5,
            Self::Pulse => 1.2,
            Self::Open | Self::VoiceActivate | Self::CheckItem | Self::SetBackground => 1.0,
            Self::Click | Self::Add | Self::Remove | Self::Select => 0.8,
            Self::Hover => 0.6,
            Self::Close | Self::Hide | Self::PlaySfx | Self::PlayMusic | Self::StopMusic => {
                DEFAULT_UI_DURATION_SECONDS
            }
        }
    }

    /// Check if the target of this action is an element shown to the viewer
    #[must_use]
    pub const fn is_visible_element(self) -> bool {
        matches!(self, Self::Open | Self::Display | Self::Notification)
    }

    /// Extract type-specific structured fields from the raw target
    ///
    /// - `type`: `{field, text}` from `Field "text"`
    /// - `scroll` / `pulse`: `{element, count}` from `Element x3` (count 1
    ///   without a repeat suffix)
    ///
    /// Other types carry no metadata.
    #[must_use]
    pub fn extract_metadata(self, target: &str) -> TagMap {
        let mut metadata = TagMap::new();
        match self {
            Self::Type => {
                if let Some((field, text)) = split_quoted(target) {
                    if !field.is_empty() {
                        metadata.insert("field".to_string(), TagValue::from(field));
                    }
                    metadata.insert("text".to_string(), TagValue::from(text));
                } else if !target.is_empty() {
                    metadata.insert("field".to_string(), TagValue::from(target));
                }
            }
            Self::Scroll | Self::Pulse => {
                let (element, count) = split_repeat(target);
                if !element.is_empty() {
                    metadata.insert("element".to_string(), TagValue::from(element));
                }
                metadata.insert("count".to_string(), TagValue::Integer(count));
            }
            _ => {}
        }
        metadata
    }
}

impl fmt::Display for UiActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `Field "text"` into the label and the quoted text
fn split_quoted(target: &str) -> Option<(&str, &str)> {
    let open = target.find(['"', '\u{201C}'])?;
    let quote_len = target[open..].chars().next()?.len_utf8();
    let rest = &target[open + quote_len..];
    let close = rest.find(['"', '\u{201D}']).unwrap_or(rest.len());
    Some((target[..open].trim(), &rest[..close]))
}

/// Split `Element x3` into the element and the repeat count
fn split_repeat(target: &str) -> (&str, i64) {
    let repeat = target.rsplit_once(char::is_whitespace).and_then(|(element, suffix)| {
        let digits = suffix.strip_prefix(['x', 'X'])?;
        let count = digits.parse::<i64>().ok()?;
        Some((element.trim(), count))
    });
    repeat.unwrap_or((target, 1))
}

/// Source position of a UI action
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiActionSource {
    /// 1-based line number in the original script
    pub line: usize,
}

/// One simulated interface event inside a beat
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct UiAction {
    /// `{beat_temp_id}-ui-{n}`
    pub temp_id: String,
    /// Back-reference to the owning beat
    pub beat_temp_id: String,
    /// Canonical action type
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub action_type: UiActionType,
    /// Target text as written
    pub target: String,
    /// Offset from the start of the beat
    pub timestamp_seconds: f64,
    /// Table duration for the action type
    pub duration_seconds: f64,
    /// 1-based position within the beat
    pub order_position: usize,
    /// Type-specific extracted fields
    pub metadata: TagMap,
    /// Where the tag was written
    pub source: UiActionSource,
}
