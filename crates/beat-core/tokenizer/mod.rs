//! Line grammar for beat scripts
//!
//! Every script line is classified exactly once into a [`LineToken`]. The
//! grammar is an ordered list of matchers; the first one that accepts a line
//! wins and plain text falls through to narration:
//!
//! 1. Dialogue: `Speaker (parenthetical): "text"` or a bare trailing colon
//! 2. Stage direction: a line wrapped in parentheses
//! 3. Bracket tags: `[UI:…]`, `[FX:…]`, `[SCENE:…]`, `[MAIL:…]`, `[STAT:…]`,
//!    location / duration / cast / mood tags, then any other `[KEY: …]`
//! 4. Narration
//!
//! Beat headers (`## BEAT: …`) and episode directives (`[EVENT: …]`, …) are
//! recognized separately by the segmenter through [`parse_beat_header`] and
//! [`parse_episode_directive`].
//!
//! # Example
//!
//! ```rust
//! use beat_core::tokenizer::{classify_line, LineToken};
//!
//! match classify_line(r#"Lala (softly): "Bestie...""#) {
//!     LineToken::Dialogue { speaker, parenthetical, text } => {
//!         assert_eq!(speaker, "Lala");
//!         assert_eq!(parenthetical, Some("softly"));
//!         assert_eq!(text, "Bestie...");
//!     }
//!     other => panic!("unexpected token {other:?}"),
//! }
//! ```

pub mod tags;

pub use tags::{
    parse_key_values, parse_signed_integer, parse_stat_changes, strip_quotes,
};

/// Longest speaker name accepted by the dialogue matcher
const MAX_SPEAKER_CHARS: usize = 40;

/// Most words a speaker name may contain
const MAX_SPEAKER_WORDS: usize = 4;

/// Classified script line, borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// Spoken line; `text` is empty for a continuation cue (`LALA:`)
    Dialogue {
        /// Speaker name as written
        speaker: &'a str,
        /// Optional delivery note from `Speaker (note):`
        parenthetical: Option<&'a str>,
        /// Spoken text without surrounding quotes
        text: &'a str,
    },
    /// `( … )` with the parentheses removed
    StageDirection(&'a str),
    /// `[UI:<VERB> <target>]`
    UiAction {
        /// Raw action verb, not yet canonicalized
        verb: &'a str,
        /// Remainder of the tag
        target: &'a str,
    },
    /// `[FX:<TYPE> <target>]`
    Fx {
        /// Effect type
        kind: &'a str,
        /// Effect target or size
        target: &'a str,
    },
    /// `[SCENE:<ACTION> <target>]`
    SceneDirective {
        /// Scene action (`LOAD`, `CUT`, …)
        action: &'a str,
        /// Scene target
        target: &'a str,
    },
    /// `[MAIL: k=v …]` body
    Mail(&'a str),
    /// `[STAT: <key> <signed number>]`
    Stat {
        /// Stat name
        key: &'a str,
        /// Signed change
        delta: i64,
    },
    /// `[LOCATION_HINT: …]` or `[LOCATION: …]` with quotes removed
    LocationHint(&'a str),
    /// `[DURATION: 8s]`
    Duration(u32),
    /// `[CHARACTERS: a, b]` body
    Characters(&'a str),
    /// `[DENSITY: …]` body
    Density(&'a str),
    /// `[MOOD: …]` body
    Mood(&'a str),
    /// `[TRANSITION: …]` body
    Transition(&'a str),
    /// Any other `[KEY: …]`; skipped for forward compatibility
    Metadata {
        /// Tag name as written
        name: &'a str,
    },
    /// Free text
    Narration(&'a str),
}

/// Bracketed `[NAME: body]` tag split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTag<'a> {
    /// Tag name before the colon
    pub name: &'a str,
    /// Trimmed text after the colon
    pub body: &'a str,
}

impl BracketTag<'_> {
    /// Case-insensitive tag name comparison
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Episode-scoped directive recognized anywhere in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeDirective<'a> {
    /// `[EVENT: k=v …]`
    Event(&'a str),
    /// `[EPISODE_INTENT: "…"]`
    Intent(&'a str),
    /// `[RESULT: k=v …]`
    Result(&'a str),
    /// `[OVERRIDE: k=v …]`
    Override(&'a str),
    /// `[STAT_CHANGE: coins-150 …]`
    StatChange(&'a str),
}

/// Classify one line with the ordered beat grammar
///
/// The line is trimmed before matching.
#[must_use]
pub fn classify_line(line: &str) -> LineToken<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineToken::Blank;
    }

    if let Some(dialogue) = match_dialogue(line) {
        return dialogue;
    }

    if let Some(inner) = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return LineToken::StageDirection(inner.trim());
    }

    if let Some(tag) = split_bracket_tag(line) {
        return classify_tag(tag);
    }

    LineToken::Narration(line)
}

/// Recognize `## BEAT: <title>` and return the trimmed title
///
/// Matching is case-insensitive and tolerates missing spaces (`##BEAT:x`).
/// An empty title is still a header.
///
/// # Example
///
/// ```rust
/// use beat_core::tokenizer::parse_beat_header;
///
/// assert_eq!(parse_beat_header("## BEAT: REVEAL #2"), Some("REVEAL #2"));
/// assert_eq!(parse_beat_header("##beat:opening"), Some("opening"));
/// assert_eq!(parse_beat_header("# BEAT: nope"), None);
/// ```
#[must_use]
pub fn parse_beat_header(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("##")?.trim_start();
    let keyword = rest.get(..4)?;
    if !keyword.eq_ignore_ascii_case("beat") {
        return None;
    }
    let title = rest[4..].trim_start().strip_prefix(':')?;
    Some(title.trim())
}

/// Recognize an episode-scoped directive line
#[must_use]
pub fn parse_episode_directive(line: &str) -> Option<EpisodeDirective<'_>> {
    let tag = split_bracket_tag(line.trim())?;
    let directive = if tag.is("EVENT") {
        EpisodeDirective::Event(tag.body)
    } else if tag.is("EPISODE_INTENT") {
        EpisodeDirective::Intent(tag.body)
    } else if tag.is("RESULT") {
        EpisodeDirective::Result(tag.body)
    } else if tag.is("OVERRIDE") {
        EpisodeDirective::Override(tag.body)
    } else if tag.is("STAT_CHANGE") {
        EpisodeDirective::StatChange(tag.body)
    } else {
        return None;
    };
    Some(directive)
}

/// Split a whole-line `[NAME: body]` tag
///
/// The name must be non-empty and made of ASCII letters, digits or
/// underscores.
#[must_use]
pub fn split_bracket_tag(line: &str) -> Option<BracketTag<'_>> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (name, body) = inner.split_once(':')?;
    let name = name.trim();

    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }

    Some(BracketTag {
        name,
        body: body.trim(),
    })
}

/// Dispatch a bracket tag by name
fn classify_tag(tag: BracketTag<'_>) -> LineToken<'_> {
    let metadata = LineToken::Metadata { name: tag.name };

    if tag.is("UI") {
        let (verb, target) = split_verb(tag.body);
        if verb.is_empty() {
            return metadata;
        }
        LineToken::UiAction { verb, target }
    } else if tag.is("FX") {
        let (kind, target) = split_verb(tag.body);
        if kind.is_empty() {
            return metadata;
        }
        LineToken::Fx { kind, target }
    } else if tag.is("SCENE") {
        let (action, target) = split_verb(tag.body);
        if action.is_empty() {
            return metadata;
        }
        LineToken::SceneDirective { action, target }
    } else if tag.is("MAIL") {
        LineToken::Mail(tag.body)
    } else if tag.is("STAT") {
        parse_stat_tag(tag.body).map_or(metadata, |(key, delta)| LineToken::Stat { key, delta })
    } else if tag.is("LOCATION_HINT") || tag.is("LOCATION") {
        let hint = strip_quotes(tag.body);
        if hint.is_empty() {
            return metadata;
        }
        LineToken::LocationHint(hint)
    } else if tag.is("DURATION") {
        parse_duration_seconds(tag.body).map_or(metadata, LineToken::Duration)
    } else if tag.is("CHARACTERS") || tag.is("CHARACTER") {
        LineToken::Characters(tag.body)
    } else if tag.is("DENSITY") {
        LineToken::Density(tag.body)
    } else if tag.is("MOOD") {
        LineToken::Mood(tag.body)
    } else if tag.is("TRANSITION") {
        LineToken::Transition(tag.body)
    } else {
        metadata
    }
}

/// Split `VERB rest of target` at the first whitespace
fn split_verb(body: &str) -> (&str, &str) {
    body.split_once(char::is_whitespace)
        .map_or((body, ""), |(verb, target)| (verb, target.trim()))
}

/// Parse `[STAT:]` bodies: `coins -5`, `coins +5` or compact `coins-5`
fn parse_stat_tag(body: &str) -> Option<(&str, i64)> {
    if let Some((key, value)) = body.split_once(char::is_whitespace) {
        let delta = parse_signed_integer(value)?;
        let key = key.trim_end_matches(':');
        return (!key.is_empty()).then_some((key, delta));
    }

    let sign_pos = body.rfind(['+', '-'])?;
    let (key, value) = body.split_at(sign_pos);
    let delta = parse_signed_integer(value)?;
    (!key.is_empty()).then_some((key, delta))
}

/// Parse `8`, `8s` or `8 sec` into whole seconds
fn parse_duration_seconds(body: &str) -> Option<u32> {
    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let unit = body[digits_end..].trim().to_ascii_lowercase();
    if !matches!(unit.as_str(), "" | "s" | "sec" | "secs" | "seconds") {
        return None;
    }
    body[..digits_end].parse().ok()
}

/// Match a dialogue line
fn match_dialogue(line: &str) -> Option<LineToken<'_>> {
    let (head, rest) = line.split_once(':')?;
    let head = head.trim();

    let (speaker, parenthetical) = match head.strip_suffix(')') {
        Some(without_close) => {
            let open = without_close.find('(')?;
            (
                without_close[..open].trim(),
                Some(without_close[open + 1..].trim()),
            )
        }
        None => (head, None),
    };

    if !is_speaker_name(speaker) {
        return None;
    }

    let rest = rest.trim();
    let text = if rest.is_empty() {
        ""
    } else if rest.starts_with(['"', '\u{201C}', '\'']) {
        strip_quotes(rest)
    } else {
        return None;
    };

    Some(LineToken::Dialogue {
        speaker,
        parenthetical,
        text,
    })
}

/// Check the shape of a speaker name
fn is_speaker_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(char::is_alphabetic);

    starts_with_letter
        && name.chars().count() <= MAX_SPEAKER_CHARS
        && name.split_whitespace().count() <= MAX_SPEAKER_WORDS
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ' ' | '\'' | '.' | '-'))
}
