//! Beat script parser
//!
//! Strictly forward pipeline, one call per script:
//!
//! 1. [`segmenter`]: raw beat blocks and episode tags
//! 2. [`content`]: one [`ast::Beat`] plus its [`ast::UiAction`]s per block
//! 3. [`duration`]: screen-time synthesis
//! 4. [`crate::analysis`]: advisory warnings
//! 5. [`crate::output`]: totals and the legacy scene projection
//!
//! All mutable state lives in a per-call [`ParseContext`], so concurrent
//! parses never interact.
//!
//! # Example
//!
//! ```rust
//! use beat_core::{parser::SceneParser, ParseOptions};
//!
//! let parser = SceneParser::with_options(ParseOptions::default().with_episode_id("ep-12"));
//! let plan = parser.parse("## BEAT: OPENING RITUAL\nPrime: \"Hello.\"")?;
//!
//! assert_eq!(plan.episode_id.as_deref(), Some("ep-12"));
//! assert_eq!(plan.beats[0].dialogue_count, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::Utc;
use tracing::debug;

use crate::{
    analysis::{run_diagnostics, DiagnosticConfig, DiagnosticInput},
    output::{assemble, ParseResult, ScenePlan},
    utils::{normalize_line_endings, strip_bom},
};

pub mod ast;
pub mod content;
pub mod context;
pub mod duration;
pub mod errors;
pub mod segmenter;

pub use context::{ParseContext, PendingVoiceWarning};
pub use errors::ParseError;

use ast::{Beat, EpisodeTags, UiAction};

/// Per-call parse options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Episode id echoed into the plan
    pub episode_id: Option<String>,
    /// Episode title echoed into the plan
    pub episode_title: Option<String>,
    /// Diagnostics filtering
    pub diagnostics: DiagnosticConfig,
}

impl ParseOptions {
    /// Set episode id
    #[must_use]
    pub fn with_episode_id(mut self, id: impl Into<String>) -> Self {
        self.episode_id = Some(id.into());
        self
    }

    /// Set episode title
    #[must_use]
    pub fn with_episode_title(mut self, title: impl Into<String>) -> Self {
        self.episode_title = Some(title.into());
        self
    }

    /// Set diagnostics configuration
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Parser output after content parsing and duration synthesis
///
/// Everything diagnostics and assembly need, before either runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScript {
    /// Beats in order with final durations
    pub beats: Vec<Beat>,
    /// UI actions of all beats in order
    pub ui_actions: Vec<UiAction>,
    /// Episode-scoped directives
    pub episode_tags: EpisodeTags,
    /// Cross-beat flags and queued findings
    pub context: ParseContext,
}

impl CompiledScript {
    /// Borrow as diagnostics input
    #[must_use]
    pub fn diagnostic_input(&self) -> DiagnosticInput<'_> {
        DiagnosticInput {
            beats: &self.beats,
            ui_actions: &self.ui_actions,
            episode_tags: &self.episode_tags,
            context: &self.context,
        }
    }
}

/// Run stages 1–3 on a script
///
/// # Errors
///
/// [`ParseError::EmptyInput`] for empty or whitespace-only text,
/// [`ParseError::NoBeats`] when only episode directives were found.
pub fn compile(text: &str) -> Result<CompiledScript, ParseError> {
    let (text, _) = strip_bom(text);
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let text = normalize_line_endings(text);
    let segmentation = segmenter::segment(&text);
    if segmentation.blocks.is_empty() {
        return Err(ParseError::NoBeats);
    }

    let mut context = ParseContext::new();
    let mut beats = Vec::with_capacity(segmentation.blocks.len());
    let mut ui_actions = Vec::new();

    for (idx, block) in segmentation.blocks.iter().enumerate() {
        let mut parsed = content::parse_block(block, idx + 1, &mut context);
        parsed.beat.duration_seconds = duration::synthesize(
            &parsed.beat.beat_type,
            parsed.beat.word_count,
            parsed.ui_seconds,
            parsed.beat.duration_override,
        );
        beats.push(parsed.beat);
        ui_actions.extend(parsed.ui_actions);
    }

    Ok(CompiledScript {
        beats,
        ui_actions,
        episode_tags: segmentation.episode_tags,
        context,
    })
}

/// Scene Plan compiler
#[derive(Debug, Clone, Default)]
pub struct SceneParser {
    /// Options applied to every parse
    options: ParseOptions,
}

impl SceneParser {
    /// Create parser with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with options
    #[must_use]
    pub const fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get options
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Compile a script into a Scene Plan
    ///
    /// # Errors
    ///
    /// Only fails when there is nothing to parse; see [`compile`].
    pub fn parse(&self, text: &str) -> Result<ScenePlan, ParseError> {
        let compiled = compile(text)?;
        let warnings = run_diagnostics(&compiled.diagnostic_input(), &self.options.diagnostics);

        debug!(
            beats = compiled.beats.len(),
            ui_actions = compiled.ui_actions.len(),
            warnings = warnings.len(),
            "compiled scene plan"
        );

        Ok(assemble(compiled, warnings, &self.options, Utc::now()))
    }
}

/// Parse a script into the serializable result shape
///
/// Never panics and never returns `Err`: failures become
/// [`ParseResult::Failure`].
///
/// # Example
///
/// ```rust
/// use beat_core::{parse_script, ParseOptions};
///
/// let result = parse_script("", &ParseOptions::default());
/// assert!(!result.is_success());
/// assert_eq!(result.error(), Some("No script content provided"));
/// ```
#[must_use]
pub fn parse_script(text: &str, options: &ParseOptions) -> ParseResult {
    SceneParser::with_options(options.clone()).parse(text).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_and_crlf_are_normalized() {
        let compiled = compile("\u{FEFF}## BEAT: REVEAL\r\nPrime: \"Hi.\"\r\n").unwrap();
        assert_eq!(compiled.beats.len(), 1);
        assert_eq!(compiled.beats[0].dialogue_count, 1);
        assert_eq!(compiled.beats[0].source.end_line, 2);
    }

    #[test]
    fn failure_kinds() {
        assert_eq!(compile(" \n\t").unwrap_err(), ParseError::EmptyInput);
        assert_eq!(
            compile("[STAT_CHANGE: coins-5]").unwrap_err(),
            ParseError::NoBeats
        );
    }

    #[test]
    fn durations_are_synthesized() {
        let compiled = compile("## BEAT: TRANSITION\n[DURATION: 2]\n## BEAT: REVEAL\nx").unwrap();
        assert_eq!(compiled.beats[0].duration_seconds, 2);
        assert_eq!(compiled.beats[1].duration_seconds, 12);
    }

    #[test]
    fn options_builder() {
        let options = ParseOptions::default()
            .with_episode_id("ep-1")
            .with_episode_title("Gala Night");
        let parser = SceneParser::with_options(options);
        assert_eq!(parser.options().episode_title.as_deref(), Some("Gala Night"));
    }
}
