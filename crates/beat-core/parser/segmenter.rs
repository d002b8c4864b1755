//! Stage 1: split script text into raw beat blocks
//!
//! One line-by-line pass. `## BEAT:` headers open blocks, episode directives
//! are lifted into [`EpisodeTags`] wherever they appear, and content before
//! the first header becomes an implicit `opening_ritual` block.

use tracing::{debug, trace};

use crate::{
    parser::ast::{EpisodeTags, RawBeatBlock},
    taxonomy::BeatType,
    tokenizer::{
        parse_beat_header, parse_episode_directive, parse_key_values, parse_stat_changes,
        strip_quotes, EpisodeDirective,
    },
};

/// Segmenter output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    /// Blocks in document order
    pub blocks: Vec<RawBeatBlock>,
    /// Episode-scoped directives
    pub episode_tags: EpisodeTags,
}

/// Split normalized script text into blocks and episode tags
///
/// Line numbers are 1-based over `text` as given. Directive lines never enter
/// a block buffer, except `[EVENT:]` which is also kept in the open block.
///
/// # Example
///
/// ```rust
/// use beat_core::parser::segmenter::segment;
/// use beat_core::BeatType;
///
/// let seg = segment("Preamble\n## BEAT: REVEAL #2\nLala: \"Surprise.\"");
/// assert_eq!(seg.blocks.len(), 2);
/// assert!(!seg.blocks[0].header_present);
/// assert_eq!(seg.blocks[1].beat_type, BeatType::Reveal);
/// assert_eq!(seg.blocks[1].beat_index, 2);
/// ```
#[must_use]
pub fn segment(text: &str) -> Segmentation {
    let mut segmentation = Segmentation::default();
    let mut current: Option<RawBeatBlock> = None;

    for (idx, line) in text.lines().enumerate() {
        let number = idx + 1;

        if let Some(title) = parse_beat_header(line) {
            if let Some(block) = current.take() {
                close_block(&mut segmentation.blocks, block);
            }
            let (beat_type, beat_index) = canonicalize_header(title);
            current = Some(RawBeatBlock::with_header(title, beat_type, beat_index, number));
            continue;
        }

        if let Some(directive) = parse_episode_directive(line) {
            let is_event = matches!(directive, EpisodeDirective::Event(_));
            apply_directive(&mut segmentation.episode_tags, directive);
            if let (true, Some(block)) = (is_event, current.as_mut()) {
                block.push_line(line, number);
            }
            continue;
        }

        match current.as_mut() {
            Some(block) => block.push_line(line, number),
            None if !line.trim().is_empty() => {
                trace!(line = number, "content before first header, opening implicit block");
                let mut block = RawBeatBlock::implicit();
                block.push_line(line, number);
                current = Some(block);
            }
            None => {}
        }
    }

    if let Some(block) = current {
        close_block(&mut segmentation.blocks, block);
    }

    segmentation
}

/// Finish a block and append it
fn close_block(blocks: &mut Vec<RawBeatBlock>, block: RawBeatBlock) {
    debug!(
        beat_type = %block.beat_type,
        beat_index = block.beat_index,
        header = block.header_present,
        lines = block.lines.len(),
        "segmented beat block"
    );
    blocks.push(block);
}

/// Canonicalize header text into a beat type and ordinal
///
/// A trailing `#<digits>` is the ordinal (default 1). The rest is
/// lower-cased with every run of separators folded to one underscore, then
/// classified against the taxonomy.
///
/// # Example
///
/// ```rust
/// use beat_core::parser::segmenter::canonicalize_header;
/// use beat_core::BeatType;
///
/// assert_eq!(canonicalize_header("INTERRUPTION #2"), (BeatType::Interruption, 2));
/// assert_eq!(canonicalize_header("Stakes \u{2014} Intention"), (BeatType::StakesIntention, 1));
/// assert_eq!(canonicalize_header("Montage!"), (BeatType::Other("montage".into()), 1));
/// ```
#[must_use]
pub fn canonicalize_header(title: &str) -> (BeatType, u32) {
    let (name, beat_index) = split_ordinal(title);
    (BeatType::classify(&normalize_beat_name(name)), beat_index)
}

/// Split a trailing `#N` ordinal from a header title
fn split_ordinal(title: &str) -> (&str, u32) {
    title
        .rsplit_once('#')
        .and_then(|(name, digits)| {
            let digits = digits.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some((name, digits.parse().ok()?))
        })
        .unwrap_or((title, 1))
}

/// Lower-case and fold separator runs to single underscores
fn normalize_beat_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    normalized
}

/// Record one episode directive; empty bodies are dropped
fn apply_directive(tags: &mut EpisodeTags, directive: EpisodeDirective<'_>) {
    match directive {
        EpisodeDirective::Event(body) => {
            let payload = parse_key_values(body);
            if !payload.is_empty() {
                tags.event = Some(payload);
            }
        }
        EpisodeDirective::Intent(body) => {
            let intent = strip_quotes(body);
            if !intent.is_empty() {
                tags.intent = Some(intent.to_string());
            }
        }
        EpisodeDirective::Result(body) => {
            let payload = parse_key_values(body);
            if !payload.is_empty() {
                tags.result = Some(payload);
            }
        }
        EpisodeDirective::Override(body) => {
            let payload = parse_key_values(body);
            if !payload.is_empty() {
                tags.overrides.push(payload);
            }
        }
        EpisodeDirective::StatChange(body) => {
            let deltas = parse_stat_changes(body);
            if !deltas.is_empty() {
                tags.stat_changes.push(deltas);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::TagValue;

    #[test]
    fn headers_open_blocks() {
        let seg = segment("## BEAT: OPENING RITUAL\nPrime: \"Hello.\"\n\n## BEAT: CLIFFHANGER\n(fade)");
        assert_eq!(seg.blocks.len(), 2);
        assert_eq!(seg.blocks[0].beat_type, BeatType::OpeningRitual);
        assert_eq!(seg.blocks[0].header_line, Some(1));
        assert_eq!(seg.blocks[0].lines.len(), 2);
        assert_eq!(seg.blocks[1].lines[0].number, 5);
    }

    #[test]
    fn leading_blank_lines_do_not_open_a_block() {
        let seg = segment("\n\n## BEAT: REVEAL\nx");
        assert_eq!(seg.blocks.len(), 1);
        assert!(seg.blocks[0].header_present);
    }

    #[test]
    fn directives_only_produce_no_blocks() {
        let seg = segment("[EVENT: name=\"Gala\"]\n[STAT_CHANGE: coins-5]");
        assert!(seg.blocks.is_empty());
        assert!(seg.episode_tags.has_event());
        assert_eq!(seg.episode_tags.stat_changes.len(), 1);
    }

    #[test]
    fn event_is_buffered_but_other_directives_are_not() {
        let seg = segment(
            "## BEAT: STAKES_INTENTION\n[EVENT: name=\"Gala\"]\n[RESULT: score=8]\n[OVERRIDE: reason=\"x\"]",
        );
        let texts: Vec<_> = seg.blocks[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["[EVENT: name=\"Gala\"]"]);
        assert_eq!(
            seg.episode_tags.result.as_ref().map(|r| r["score"].clone()),
            Some(TagValue::Integer(8))
        );
        assert_eq!(seg.episode_tags.overrides.len(), 1);
    }

    #[test]
    fn last_event_wins_and_empty_bodies_drop() {
        let seg = segment(
            "[EVENT: name=\"A\"]\n[EVENT: name=\"B\"]\n[EVENT: ]\n[EPISODE_INTENT: \"\"]\n## BEAT: REVEAL",
        );
        assert_eq!(seg.episode_tags.event_name(), Some("B"));
        assert_eq!(seg.episode_tags.intent, None);
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_beat_name("  Event -- Travel  "), "event_travel");
        assert_eq!(normalize_beat_name("PAYOFF/CTA"), "payoff_cta");
        assert_eq!(normalize_beat_name("***"), "");
        assert_eq!(canonicalize_header(""), (BeatType::Other("untitled".into()), 1));
    }

    #[test]
    fn ordinal_requires_digits() {
        assert_eq!(split_ordinal("REVEAL #12"), ("REVEAL ", 12));
        assert_eq!(split_ordinal("REVEAL #x"), ("REVEAL #x", 1));
        assert_eq!(split_ordinal("REVEAL"), ("REVEAL", 1));
    }

    #[test]
    fn oversized_ordinal_stays_in_the_name() {
        assert_eq!(split_ordinal("REVEAL #99999999999"), ("REVEAL #99999999999", 1));
        assert_eq!(split_ordinal("REVEAL #4294967295"), ("REVEAL ", u32::MAX));
        assert_eq!(
            canonicalize_header("REVEAL #99999999999"),
            (BeatType::Reveal, 1)
        );
    }
}
