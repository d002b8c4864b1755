//! Legacy scene projection
//!
//! Older consumers read one flat `Scene` record per beat. The projection only
//! reshapes parsed data; it never looks at source text again.

use crate::{
    parser::ast::{Beat, UiAction},
    taxonomy::{BeatType, Density, SpeakerDisplay},
    utils::distinct_in_order,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Separator between note groups
pub const NOTES_SEPARATOR: &str = " \u{00B7} ";

/// One beat in the legacy scene shape
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// 1-based scene number
    pub scene_number: usize,
    /// Humanized title
    pub title: String,
    /// Canonical or fallback beat type
    pub beat_type: BeatType,
    /// Header text as written
    pub raw_beat_title: String,
    /// Final beat duration
    pub duration_seconds: u32,
    /// Visual density
    pub density: Density,
    /// Mood keyword
    pub mood: String,
    /// Explicit transition, else `cut` first and `dissolve` after
    pub transition: String,
    /// Location hint, if any
    pub location_hint: Option<String>,
    /// Display records for the beat's speakers
    pub characters_expected: Vec<SpeakerDisplay>,
    /// Distinct targets of open, display and notification actions
    pub ui_expected: Vec<String>,
    /// Number of dialogue lines
    pub dialogue_count: usize,
    /// First content lines of the beat
    pub script_excerpt: String,
    /// Human-readable summary
    pub notes: String,
}

impl Scene {
    /// Project a beat with its own UI actions
    #[must_use]
    pub fn project(beat: &Beat, ui_actions: &[&UiAction]) -> Self {
        let transition = beat.transition.clone().unwrap_or_else(|| {
            if beat.order_position == 1 {
                "cut".to_string()
            } else {
                "dissolve".to_string()
            }
        });

        let characters_expected: Vec<SpeakerDisplay> =
            beat.speakers.iter().map(|speaker| speaker.display()).collect();

        let ui_expected = distinct_in_order(
            ui_actions
                .iter()
                .filter(|action| action.action_type.is_visible_element())
                .filter(|action| !action.target.is_empty())
                .map(|action| action.target.clone()),
        );

        let notes = build_notes(beat, &characters_expected, &ui_expected);

        Self {
            scene_number: beat.order_position,
            title: beat.title.clone(),
            beat_type: beat.beat_type.clone(),
            raw_beat_title: beat.raw_title.clone(),
            duration_seconds: beat.duration_seconds,
            density: beat.density,
            mood: beat.mood.clone(),
            transition,
            location_hint: beat.tags.location_hint.clone(),
            characters_expected,
            ui_expected,
            dialogue_count: beat.dialogue_count,
            script_excerpt: beat.excerpt.clone(),
            notes,
        }
    }
}

/// Join the non-empty note groups
fn build_notes(beat: &Beat, characters: &[SpeakerDisplay], ui_expected: &[String]) -> String {
    let mut parts = Vec::new();

    if !characters.is_empty() {
        let names: Vec<String> = characters
            .iter()
            .map(|c| format!("{} {}", c.emoji, c.name))
            .collect();
        parts.push(format!("Characters: {}", names.join(", ")));
    }
    if !ui_expected.is_empty() {
        parts.push(format!("UI: {}", ui_expected.join(", ")));
    }
    if let Some(location) = &beat.tags.location_hint {
        parts.push(format!("Location: {location}"));
    }
    if !beat.tags.fx.is_empty() {
        let kinds = distinct_in_order(beat.tags.fx.iter().map(|fx| fx.kind.as_str()));
        parts.push(format!("FX: {}", kinds.join(", ")));
    }
    if !beat.tags.scenes.is_empty() {
        let scenes: Vec<String> = beat
            .tags
            .scenes
            .iter()
            .map(|scene| format!("{} {}", scene.action, scene.target).trim_end().to_string())
            .collect();
        parts.push(format!("Scenes: {}", scenes.join(", ")));
    }
    match beat.dialogue_count {
        0 => {}
        1 => parts.push("1 dialogue line".to_string()),
        n => parts.push(format!("{n} dialogue lines")),
    }

    parts.join(NOTES_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::compile;

    fn project_all(script: &str) -> Vec<Scene> {
        let compiled = compile(script).unwrap();
        compiled
            .beats
            .iter()
            .map(|beat| {
                let actions: Vec<&UiAction> = compiled
                    .ui_actions
                    .iter()
                    .filter(|a| a.beat_temp_id == beat.temp_id)
                    .collect();
                Scene::project(beat, &actions)
            })
            .collect()
    }

    #[test]
    fn transitions_default_by_position() {
        let scenes = project_all("## BEAT: REVEAL\nx\n## BEAT: CLIFFHANGER\ny\n## BEAT: TRANSITION\n[TRANSITION: fade]");
        let transitions: Vec<_> = scenes.iter().map(|s| s.transition.as_str()).collect();
        assert_eq!(transitions, vec!["cut", "dissolve", "fade"]);
    }

    #[test]
    fn ui_expected_keeps_visible_elements_once() {
        let scenes = project_all(
            "## BEAT: INTERRUPTION\n[UI:NOTIFICATION MailDing]\n[UI:CLICK MailIcon]\n[UI:OPEN MailPanel]\n[UI:OPEN MailPanel]\n[UI:CLOSE MailPanel]",
        );
        assert_eq!(scenes[0].ui_expected, vec!["MailDing", "MailPanel"]);
    }

    #[test]
    fn notes_join_groups() {
        let scenes = project_all(
            "## BEAT: REVEAL\n[UI:DISPLAY Invite]\n[LOCATION_HINT: \"rooftop\"]\n[FX:SPARKLE Small]\nPrime: \"Look.\"\nLala: \"Wow.\"",
        );
        assert_eq!(
            scenes[0].notes,
            "Characters: \u{1F48E} JustAWomanInHerPrime, \u{1F451} Lala \u{00B7} UI: Invite \u{00B7} Location: rooftop \u{00B7} FX: SPARKLE \u{00B7} 2 dialogue lines"
        );
        assert_eq!(scenes[0].characters_expected.len(), 2);
    }

    #[test]
    fn empty_beat_has_empty_notes() {
        let scenes = project_all("## BEAT: TRANSITION\n");
        assert_eq!(scenes[0].notes, "");
        assert_eq!(scenes[0].dialogue_count, 0);
    }
}
