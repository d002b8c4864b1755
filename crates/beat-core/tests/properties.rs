//! Structural properties that hold for any script
//!
//! Scripts are generated from a pool of realistic line shapes (headers,
//! dialogue, tags, narration) so every grammar branch gets exercised.

use beat_core::{parse_script, parser::compile, ParseOptions, ScenePlan};
use proptest::prelude::*;

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "OPENING RITUAL",
            "CREATOR_WELCOME",
            "INTERRUPTION #2",
            "REVEAL #1",
            "TRANSFORMATION",
            "EVENT TRAVEL",
            "CLIFFHANGER",
            "MONTAGE",
            "",
        ])
        .prop_map(|title| format!("## BEAT: {title}")),
        ("(lala|prime|me|guest|message|Narrator)", "[a-z ]{0,24}")
            .prop_map(|(speaker, text)| format!("{speaker}: \"{text}\"")),
        prop::sample::select(vec![
            "open", "click", "type", "display", "scroll", "pulse", "voice_activate", "hover",
            "select", "teleport",
        ])
        .prop_map(|verb| format!("[UI:{verb} Panel x2]")),
        Just("[UI:TYPE Username \"prime\"]".to_string()),
        Just("[FX:SPARKLE Small]".to_string()),
        Just("[SCENE:LOAD Location \"rooftop\"]".to_string()),
        Just("[MAIL: type=invite prestige=7]".to_string()),
        Just("[STAT: coins -20]".to_string()),
        Just("[DURATION: 3s]".to_string()),
        Just("[EVENT: name=\"Gala\" prestige=7]".to_string()),
        Just("[STAT_CHANGE: coins-150 reputation+1]".to_string()),
        Just("[OVERRIDE: tier=\"gold\"]".to_string()),
        Just("[MYSTERY: tag]".to_string()),
        "\\([a-z ]{1,20}\\)",
        "[A-Za-z ,.]{0,30}",
    ]
}

fn script_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 1..40).prop_map(|lines| lines.join("\n"))
}

fn parse(script: &str) -> Option<ScenePlan> {
    parse_script(script, &ParseOptions::default()).into_result().ok()
}

proptest! {
    #[test]
    fn parsing_is_idempotent(script in script_strategy()) {
        let first = compile(&script);
        let second = compile(&script);
        prop_assert_eq!(first, second);

        if let (Some(a), Some(b)) = (parse(&script), parse(&script)) {
            prop_assert_eq!(a.beats, b.beats);
            prop_assert_eq!(a.ui_actions, b.ui_actions);
            prop_assert_eq!(a.warnings, b.warnings);
        }
    }

    #[test]
    fn order_positions_are_dense(script in script_strategy()) {
        if let Some(plan) = parse(&script) {
            for (idx, beat) in plan.beats.iter().enumerate() {
                prop_assert_eq!(beat.order_position, idx + 1);
            }
            for beat in &plan.beats {
                for (idx, action) in plan.ui_actions_for(beat).enumerate() {
                    prop_assert_eq!(action.order_position, idx + 1);
                }
            }
            prop_assert_eq!(plan.scenes.len(), plan.beats.len());
        }
    }

    #[test]
    fn ui_actions_reference_existing_beats(script in script_strategy()) {
        if let Some(plan) = parse(&script) {
            for action in &plan.ui_actions {
                let owners = plan.beats.iter().filter(|b| b.temp_id == action.beat_temp_id).count();
                prop_assert_eq!(owners, 1);
            }
        }
    }

    #[test]
    fn timestamps_never_decrease_within_a_beat(script in script_strategy()) {
        if let Some(plan) = parse(&script) {
            for beat in &plan.beats {
                let stamps: Vec<f64> = plan.ui_actions_for(beat).map(|a| a.timestamp_seconds).collect();
                prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    #[test]
    fn durations_respect_type_floor(script in script_strategy()) {
        if let Some(plan) = parse(&script) {
            for beat in plan.beats.iter().filter(|b| b.duration_override.is_none()) {
                prop_assert!(beat.duration_seconds >= beat.beat_type.defaults().duration);
            }
        }
    }

    #[test]
    fn only_the_first_beat_may_lack_a_header(script in script_strategy()) {
        if let Some(plan) = parse(&script) {
            prop_assert!(plan.beats.iter().skip(1).all(|b| b.has_header()));
        }
    }

    #[test]
    fn text_before_first_header_is_kept(
        preamble in "[A-Za-z]{1,10}( [A-Za-z]{1,10}){0,5}",
        body in script_strategy(),
    ) {
        let script = format!("{preamble}\n## BEAT: REVEAL\n{body}");
        let plan = parse(&script).expect("preamble makes the script non-empty");
        let first = &plan.beats[0];
        prop_assert!(!first.has_header());
        prop_assert_eq!(first.source.start_line, 1);
        prop_assert_eq!(first.word_count, preamble.split_whitespace().count());
    }
}
