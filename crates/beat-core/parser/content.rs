//! Stage 2: turn one raw block into a beat and its UI actions
//!
//! Each buffered line is classified once by [`classify_line`] and dispatched
//! in a single match; the grammar order lives in the tokenizer.

use tracing::{debug, trace};

use super::context::ParseContext;
use crate::{
    parser::ast::{
        Beat, BeatSource, BeatTags, Confidence, FxCue, RawBeatBlock, SceneCue, StatTag, UiAction,
        UiActionSource, UiActionType,
    },
    taxonomy::{Density, Speaker},
    tokenizer::{classify_line, parse_key_values, LineToken},
    utils::{count_words, distinct_in_order, humanize_title, round_hundredths, truncate_chars},
};

/// Content lines quoted in a scene excerpt
const EXCERPT_LINES: usize = 3;

/// Longest scene excerpt in characters
const EXCERPT_MAX_CHARS: usize = 200;

/// One block after content parsing, before duration synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBeat {
    /// Beat record; `duration_seconds` is still zero
    pub beat: Beat,
    /// UI actions owned by the beat
    pub ui_actions: Vec<UiAction>,
    /// Unrounded sum of UI action durations
    pub ui_seconds: f64,
}

/// Running accumulators for one block
struct BeatBuilder {
    temp_id: String,
    speakers: Vec<Speaker>,
    dialogue_count: usize,
    word_count: usize,
    tags: BeatTags,
    duration_override: Option<u32>,
    density: Option<Density>,
    mood: Option<String>,
    transition: Option<String>,
    ui_actions: Vec<UiAction>,
    clock: f64,
    excerpt: Vec<String>,
}

impl BeatBuilder {
    fn new(temp_id: String) -> Self {
        Self {
            temp_id,
            speakers: Vec::new(),
            dialogue_count: 0,
            word_count: 0,
            tags: BeatTags::default(),
            duration_override: None,
            density: None,
            mood: None,
            transition: None,
            ui_actions: Vec::new(),
            clock: 0.0,
            excerpt: Vec::new(),
        }
    }

    fn quote(&mut self, line: &str) {
        if self.excerpt.len() < EXCERPT_LINES {
            self.excerpt.push(line.trim().to_string());
        }
    }

    fn push_ui_action(&mut self, action_type: UiActionType, target: &str, line: usize) {
        let duration = action_type.duration_seconds();
        let order_position = self.ui_actions.len() + 1;

        self.ui_actions.push(UiAction {
            temp_id: format!("{}-ui-{order_position}", self.temp_id),
            beat_temp_id: self.temp_id.clone(),
            action_type,
            target: target.to_string(),
            timestamp_seconds: self.clock,
            duration_seconds: duration,
            order_position,
            metadata: action_type.extract_metadata(target),
            source: UiActionSource { line },
        });
        self.clock = round_hundredths(self.clock + duration);
    }
}

/// Parse one block at `order_position` (1-based)
///
/// Updates the cross-beat flags in `ctx` and queues voice-activation
/// diagnostics for `lala` lines spoken before the first activation.
pub fn parse_block(block: &RawBeatBlock, order_position: usize, ctx: &mut ParseContext) -> ParsedBeat {
    let mut builder = BeatBuilder::new(format!("beat-{order_position}"));

    for line in &block.lines {
        match classify_line(&line.text) {
            LineToken::Blank => {}
            LineToken::Dialogue { speaker, text, .. } => {
                let speaker = Speaker::resolve(speaker);
                if speaker == Speaker::Lala && !ctx.voice_activate_seen {
                    ctx.queue_voice_warning(&builder.temp_id, line.number);
                }
                builder.speakers.push(speaker);
                builder.dialogue_count += 1;
                builder.word_count += count_words(text);
                builder.quote(&line.text);
            }
            LineToken::StageDirection(text) => {
                builder.word_count += count_words(text);
                builder.quote(&line.text);
            }
            LineToken::UiAction { verb, target } => {
                let Some(action_type) = UiActionType::from_verb(verb) else {
                    debug!(line = line.number, verb, "skipping unknown UI verb");
                    continue;
                };
                if action_type == UiActionType::VoiceActivate {
                    ctx.voice_activate_seen = true;
                }
                ctx.observe_ui_target(target);
                builder.push_ui_action(action_type, target, line.number);
            }
            LineToken::Fx { kind, target } => builder.tags.fx.push(FxCue {
                kind: kind.to_ascii_uppercase(),
                target: target.to_string(),
            }),
            LineToken::SceneDirective { action, target } => builder.tags.scenes.push(SceneCue {
                action: action.to_ascii_uppercase(),
                target: target.to_string(),
            }),
            LineToken::Mail(body) => {
                let payload = parse_key_values(body);
                if !payload.is_empty() {
                    builder.tags.mail.push(payload);
                }
            }
            LineToken::Stat { key, delta } => builder.tags.stats.push(StatTag {
                key: key.to_string(),
                delta,
            }),
            LineToken::LocationHint(hint) => builder.tags.location_hint = Some(hint.to_string()),
            LineToken::Duration(seconds) => builder.duration_override = Some(seconds),
            LineToken::Characters(names) => builder.speakers.extend(
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(Speaker::resolve),
            ),
            LineToken::Density(keyword) => {
                if let Some(density) = Density::from_keyword(keyword) {
                    builder.density = Some(density);
                }
            }
            LineToken::Mood(mood) => builder.mood = non_empty_lowercase(mood),
            LineToken::Transition(transition) => {
                builder.transition = non_empty_lowercase(transition);
            }
            LineToken::Metadata { name } => {
                trace!(line = line.number, tag = name, "skipping metadata tag");
            }
            LineToken::Narration(text) => {
                builder.word_count += count_words(text);
                builder.quote(&line.text);
            }
        }
    }

    finish(block, order_position, builder)
}

/// Lower-cased trimmed value, `None` when empty
fn non_empty_lowercase(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

/// Assemble the beat record from the accumulators
fn finish(block: &RawBeatBlock, order_position: usize, builder: BeatBuilder) -> ParsedBeat {
    let defaults = block.beat_type.defaults();
    let title = if block.raw_title.trim().is_empty() {
        humanize_title(block.beat_type.as_str())
    } else {
        humanize_title(&block.raw_title)
    };
    let excerpt = builder.excerpt.join(" ");
    let ui_seconds: f64 = builder.ui_actions.iter().map(|a| a.duration_seconds).sum();

    let beat = Beat {
        temp_id: builder.temp_id,
        beat_type: block.beat_type.clone(),
        beat_index: block.beat_index,
        order_position,
        title,
        raw_title: block.raw_title.clone(),
        confidence: if block.header_present {
            Confidence::Confident
        } else {
            Confidence::Review
        },
        duration_seconds: 0,
        duration_override: builder.duration_override,
        source: BeatSource {
            header_present: block.header_present,
            start_line: block.start_line(),
            end_line: block.end_line(),
        },
        speakers: distinct_in_order(builder.speakers),
        dialogue_count: builder.dialogue_count,
        word_count: builder.word_count,
        density: builder.density.unwrap_or(defaults.density),
        mood: builder.mood.unwrap_or_else(|| defaults.mood.to_string()),
        transition: builder.transition,
        tags: builder.tags,
        excerpt: truncate_chars(&excerpt, EXCERPT_MAX_CHARS).to_string(),
    };

    debug!(
        beat = %beat.temp_id,
        beat_type = %beat.beat_type,
        words = beat.word_count,
        dialogue = beat.dialogue_count,
        ui_actions = builder.ui_actions.len(),
        "parsed beat"
    );

    ParsedBeat {
        beat,
        ui_actions: builder.ui_actions,
        ui_seconds,
    }
}
