//! Scene Plan assembly
//!
//! Aggregates totals over the parsed beats, projects the legacy scene
//! records and wraps everything in the serializable [`ParseResult`] shape.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    analysis::Warning,
    parser::{
        ast::{Beat, EpisodeTags, UiAction},
        CompiledScript, ParseError, ParseOptions,
    },
    taxonomy::{Density, Speaker},
    tokenizer::strip_quotes,
    utils::{create_hash_map, distinct_in_order, format_duration},
};

pub mod scene;

pub use scene::{Scene, NOTES_SEPARATOR};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// How beat boundaries were found
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Every beat has an explicit header
    Headers,
    /// Implicit preamble followed by headers
    Mixed,
    /// No headers at all
    Inference,
}

impl ParseMode {
    /// Classify from the header flags of all beats
    #[must_use]
    pub fn from_beats(beats: &[Beat]) -> Self {
        let with_header = beats.iter().filter(|beat| beat.has_header()).count();
        match with_header {
            0 => Self::Inference,
            n if n == beats.len() => Self::Headers,
            _ => Self::Mixed,
        }
    }
}

/// Beats per density level
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DensityBreakdown {
    /// Low density beats
    pub low: usize,
    /// Medium density beats
    pub medium: usize,
    /// High density beats
    pub high: usize,
}

/// Aggregates over a whole script
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanMetadata {
    /// Number of beats
    pub total_beats: usize,
    /// Sum of beat durations in seconds
    pub total_duration: u32,
    /// Sum of beat word counts
    pub total_words: usize,
    /// Sum of dialogue lines
    pub total_dialogue_lines: usize,
    /// Number of UI actions
    pub total_ui_actions: usize,
    /// Distinct speakers in first-seen order
    pub speakers: Vec<Speaker>,
    /// Whether any beat has an explicit header
    pub has_headers: bool,
    /// How beat boundaries were found
    pub parse_mode: ParseMode,
    /// Whether an `[EVENT:]` tag was found
    pub has_event_tag: bool,
    /// Whether an `[EPISODE_INTENT:]` tag was found
    pub has_intent: bool,
    /// Distinct UI element names in first-seen order
    pub ui_elements_used: Vec<String>,
    /// Whether any beat carries a location hint
    pub has_location_hints: bool,
    /// Beats per density level
    pub density_breakdown: DensityBreakdown,
    /// RFC 3339 wall-clock time of the parse
    pub parsed_at: String,
}

/// Successful parse
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlan {
    /// Caller-supplied episode id
    #[cfg_attr(feature = "serde", serde(rename = "episodeId"))]
    pub episode_id: Option<String>,
    /// Caller-supplied episode title
    #[cfg_attr(feature = "serde", serde(rename = "episodeTitle"))]
    pub episode_title: Option<String>,
    /// Beats in order
    pub beats: Vec<Beat>,
    /// UI actions of all beats in order
    pub ui_actions: Vec<UiAction>,
    /// Advisory diagnostics
    pub warnings: Vec<Warning>,
    /// Episode-scoped directives
    pub episode_tags: EpisodeTags,
    /// Aggregates
    pub metadata: PlanMetadata,
    /// Number of legacy scenes
    #[cfg_attr(feature = "serde", serde(rename = "totalScenes"))]
    pub total_scenes: usize,
    /// Sum of beat durations in seconds
    #[cfg_attr(feature = "serde", serde(rename = "totalDuration"))]
    pub total_duration: u32,
    /// `total_duration` as `"{m}m {s}s"`
    #[cfg_attr(feature = "serde", serde(rename = "formattedDuration"))]
    pub formatted_duration: String,
    /// Legacy scene projection
    pub scenes: Vec<Scene>,
}

impl ScenePlan {
    /// UI actions owned by a beat
    pub fn ui_actions_for<'a>(&'a self, beat: &'a Beat) -> impl Iterator<Item = &'a UiAction> {
        self.ui_actions
            .iter()
            .filter(move |action| action.beat_temp_id == beat.temp_id)
    }

    /// Warnings with a given code
    pub fn warnings_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Warning> {
        self.warnings.iter().filter(move |w| w.code() == code)
    }
}

/// Empty `metadata` object of the failure shape
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyMetadata {}

/// Failed parse in the serializable failure shape
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FailedParse {
    /// Failure kind
    #[cfg_attr(feature = "serde", serde(skip))]
    pub kind: ParseError,
    /// Display message of `kind`
    pub error: String,
    /// Always empty
    pub beats: Vec<Beat>,
    /// Always empty
    pub ui_actions: Vec<UiAction>,
    /// Always empty
    pub warnings: Vec<Warning>,
    /// Always empty
    pub metadata: EmptyMetadata,
    /// Always default
    pub episode_tags: EpisodeTags,
}

impl From<ParseError> for FailedParse {
    fn from(kind: ParseError) -> Self {
        Self {
            kind,
            error: kind.to_string(),
            beats: Vec::new(),
            ui_actions: Vec::new(),
            warnings: Vec::new(),
            metadata: EmptyMetadata {},
            episode_tags: EpisodeTags::default(),
        }
    }
}

/// Outcome of [`crate::parse_script`]
///
/// Serializes with a leading `success` flag followed by the fields of the
/// plan or the failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Structured plan
    Success(ScenePlan),
    /// Nothing to parse
    Failure(FailedParse),
}

impl ParseResult {
    /// Check if the parse produced a plan
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Get the plan
    #[must_use]
    pub const fn plan(&self) -> Option<&ScenePlan> {
        match self {
            Self::Success(plan) => Some(plan),
            Self::Failure(_) => None,
        }
    }

    /// Get the failure message
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failed) => Some(&failed.error),
        }
    }

    /// Convert into a standard result
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of a failed parse.
    pub fn into_result(self) -> Result<ScenePlan, ParseError> {
        match self {
            Self::Success(plan) => Ok(plan),
            Self::Failure(failed) => Err(failed.kind),
        }
    }
}

impl From<Result<ScenePlan, ParseError>> for ParseResult {
    fn from(result: Result<ScenePlan, ParseError>) -> Self {
        match result {
            Ok(plan) => Self::Success(plan),
            Err(err) => Self::Failure(err.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flagged<'a, T: Serialize> {
            success: bool,
            #[serde(flatten)]
            body: &'a T,
        }

        match self {
            Self::Success(plan) => Flagged {
                success: true,
                body: plan,
            }
            .serialize(serializer),
            Self::Failure(failed) => Flagged {
                success: false,
                body: failed,
            }
            .serialize(serializer),
        }
    }
}

/// Build the Scene Plan from compiled beats and diagnostics
#[must_use]
pub fn assemble(
    compiled: CompiledScript,
    warnings: Vec<Warning>,
    options: &ParseOptions,
    parsed_at: DateTime<Utc>,
) -> ScenePlan {
    let CompiledScript {
        beats,
        ui_actions,
        episode_tags,
        ..
    } = compiled;

    let mut actions_by_beat = create_hash_map::<&str, Vec<&UiAction>>();
    for action in &ui_actions {
        actions_by_beat
            .entry(action.beat_temp_id.as_str())
            .or_default()
            .push(action);
    }

    let scenes: Vec<Scene> = beats
        .iter()
        .map(|beat| {
            let actions = actions_by_beat
                .get(beat.temp_id.as_str())
                .map_or(&[][..], Vec::as_slice);
            Scene::project(beat, actions)
        })
        .collect();

    let total_duration = beats
        .iter()
        .map(|beat| beat.duration_seconds)
        .fold(0u32, u32::saturating_add);
    let mut density_breakdown = DensityBreakdown::default();
    for beat in &beats {
        match beat.density {
            Density::Low => density_breakdown.low += 1,
            Density::Medium => density_breakdown.medium += 1,
            Density::High => density_breakdown.high += 1,
        }
    }

    let metadata = PlanMetadata {
        total_beats: beats.len(),
        total_duration,
        total_words: beats.iter().map(|beat| beat.word_count).sum(),
        total_dialogue_lines: beats.iter().map(|beat| beat.dialogue_count).sum(),
        total_ui_actions: ui_actions.len(),
        speakers: distinct_in_order(beats.iter().flat_map(|beat| beat.speakers.iter().copied())),
        has_headers: beats.iter().any(Beat::has_header),
        parse_mode: ParseMode::from_beats(&beats),
        has_event_tag: episode_tags.has_event(),
        has_intent: episode_tags.has_intent(),
        ui_elements_used: distinct_in_order(
            ui_actions
                .iter()
                .filter_map(|action| ui_element(&action.target))
                .map(str::to_string),
        ),
        has_location_hints: beats.iter().any(|beat| beat.tags.location_hint.is_some()),
        density_breakdown,
        parsed_at: parsed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    ScenePlan {
        episode_id: options.episode_id.clone(),
        episode_title: options.episode_title.clone(),
        total_scenes: scenes.len(),
        total_duration,
        formatted_duration: format_duration(total_duration),
        beats,
        ui_actions,
        warnings,
        episode_tags,
        metadata,
        scenes,
    }
}

/// Element name of a UI target: its first token without quotes
fn ui_element(target: &str) -> Option<&str> {
    let first = target.split_whitespace().next()?;
    let element = strip_quotes(first);
    (!element.is_empty()).then_some(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::compile;

    fn plan(script: &str) -> ScenePlan {
        let compiled = compile(script).unwrap();
        assemble(compiled, Vec::new(), &ParseOptions::default(), Utc::now())
    }

    #[test]
    fn parse_modes() {
        assert_eq!(plan("## BEAT: REVEAL\nx").metadata.parse_mode, ParseMode::Headers);
        assert_eq!(plan("pre\n## BEAT: REVEAL\nx").metadata.parse_mode, ParseMode::Mixed);
        let inferred = plan("just text");
        assert_eq!(inferred.metadata.parse_mode, ParseMode::Inference);
        assert!(!inferred.metadata.has_headers);
    }

    #[test]
    fn totals_and_breakdown() {
        let plan = plan(
            "## BEAT: OPENING_RITUAL\nPrime: \"One two.\"\n[UI:OPEN LoginWindow]\n## BEAT: REVEAL\nLala: \"Three.\"\n[LOCATION: roof]",
        );
        let meta = &plan.metadata;
        assert_eq!(meta.total_beats, 2);
        assert_eq!(meta.total_words, 3);
        assert_eq!(meta.total_dialogue_lines, 2);
        assert_eq!(meta.total_ui_actions, 1);
        assert_eq!(meta.speakers, vec![Speaker::Prime, Speaker::Lala]);
        assert_eq!(meta.ui_elements_used, vec!["LoginWindow".to_string()]);
        assert!(meta.has_location_hints);
        assert_eq!(meta.density_breakdown, DensityBreakdown { low: 1, medium: 0, high: 1 });
        assert_eq!(meta.total_duration, 20);
        assert_eq!(plan.formatted_duration, "20s");
        assert_eq!(plan.total_scenes, 2);
    }

    #[test]
    fn ui_element_names() {
        assert_eq!(ui_element("ClosetCategory Outfit"), Some("ClosetCategory"));
        assert_eq!(ui_element("\"Quoted\" rest"), Some("Quoted"));
        assert_eq!(ui_element(""), None);
    }

    #[test]
    fn failure_conversion() {
        let result: ParseResult = Err(ParseError::NoBeats).into();
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("No beats found in script content"));
        assert_eq!(result.into_result().unwrap_err(), ParseError::NoBeats);
    }

    #[test]
    fn plan_lookups() {
        let plan = plan("## BEAT: REVEAL\n[UI:CLICK A]\n## BEAT: CLIFFHANGER\n[UI:CLICK B]");
        let second: Vec<_> = plan.ui_actions_for(&plan.beats[1]).map(|a| a.target.as_str()).collect();
        assert_eq!(second, vec!["B"]);
        assert_eq!(plan.warnings_with_code("missing_login").count(), 0);
    }
}
