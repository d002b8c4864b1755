//! Episode script skeletons
//!
//! Writes a complete nine-beat script for a world event: every beat header,
//! UI cue, mail payload and the `[EVENT:]` tag, with placeholder dialogue that
//! varies by prestige, budget, deadline and whether the episode is a comeback.
//! Generated scripts parse without voice activation, login or event-tag
//! warnings.
//!
//! # Example
//!
//! ```rust
//! use beat_core::{generate_script_skeleton, parse_script, EventSpec, ParseOptions, SkeletonOptions};
//!
//! let event = EventSpec {
//!     name: "Rooftop Gala".to_string(),
//!     prestige: 8,
//!     ..EventSpec::default()
//! };
//! let script = generate_script_skeleton(&event, &SkeletonOptions::default());
//!
//! let plan = parse_script(&script, &ParseOptions::default()).into_result()?;
//! assert_eq!(plan.beats.len(), 9);
//! assert!(plan.warnings.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::debug;

use crate::{
    analysis::rules::{LOGIN_SEQUENCE, VOICE_ACTIVATION_SEQUENCE},
    utils::humanize_title,
};

pub mod checklist;

pub use checklist::{
    bias_adjectives, generate_checklist, generate_transformation_segments, TransformationSegment,
};

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Intent that marks an episode as a comeback
pub const COMEBACK_INTENT: &str = "failure_comeback_setup";

/// World event the episode is built around
///
/// Missing fields take the defaults of [`EventSpec::default`].
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpec {
    /// Event name
    pub name: String,
    /// Brand sending the invite
    pub host_brand: String,
    /// Prestige 1–10
    pub prestige: i64,
    /// Entry cost in coins
    pub cost_coins: i64,
    /// Dress code strictness 1–10
    pub strictness: i64,
    /// `low`, `medium`, `high`, `tonight` or `urgent`
    pub deadline_type: String,
    /// Free-text dress code
    pub dress_code: String,
    /// Where the event happens
    pub location_hint: String,
    /// Closet browse bias (`balanced`, `glam`, `cozy`, …)
    pub browse_pool_bias: String,
}

impl Default for EventSpec {
    fn default() -> Self {
        Self {
            name: "Event".to_string(),
            host_brand: "The Host".to_string(),
            prestige: 5,
            cost_coins: 100,
            strictness: 5,
            deadline_type: "medium".to_string(),
            dress_code: "elegant".to_string(),
            location_hint: "elegant venue".to_string(),
            browse_pool_bias: "balanced".to_string(),
        }
    }
}

impl EventSpec {
    /// Check if the event is urgent enough for a late-warning beat
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        matches!(
            self.deadline_type.to_lowercase().as_str(),
            "high" | "tonight" | "urgent"
        )
    }
}

/// Current character stats; unknown values print as `?`
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterState {
    /// Coins in the wallet
    pub coins: Option<i64>,
    /// Reputation 1–10
    pub reputation: Option<i64>,
    /// Stress 0–10
    pub stress: Option<i64>,
}

/// Skeleton generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonOptions {
    /// Current character stats
    pub character_state: CharacterState,
    /// Episode intent written as `[EPISODE_INTENT:]`
    pub intent: Option<String>,
    /// Include Prime narration placeholders
    pub include_narration: bool,
    /// Include animation stage directions
    pub include_animations: bool,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            character_state: CharacterState::default(),
            intent: None,
            include_narration: true,
            include_animations: true,
        }
    }
}

impl SkeletonOptions {
    /// Set character stats
    #[must_use]
    pub const fn with_character_state(mut self, state: CharacterState) -> Self {
        self.character_state = state;
        self
    }

    /// Set episode intent
    #[must_use]
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Toggle narration placeholders
    #[must_use]
    pub const fn with_narration(mut self, enabled: bool) -> Self {
        self.include_narration = enabled;
        self
    }

    /// Toggle animation stage directions
    #[must_use]
    pub const fn with_animations(mut self, enabled: bool) -> Self {
        self.include_animations = enabled;
        self
    }
}

/// Episode tone derived from stats and intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tone {
    comeback: bool,
    broke: bool,
    high_prestige: bool,
}

impl Tone {
    fn new(event: &EventSpec, options: &SkeletonOptions) -> Self {
        let state = options.character_state;
        let stressed = state.stress.unwrap_or(0) >= 4;
        let low_reputation = state.reputation.unwrap_or(1) <= 3;
        Self {
            comeback: low_reputation
                || stressed
                || options.intent.as_deref() == Some(COMEBACK_INTENT),
            broke: state.coins.unwrap_or(0) < event.cost_coins,
            high_prestige: event.prestige >= 7,
        }
    }
}

/// Line buffer for the generated script
#[derive(Debug, Default)]
struct ScriptWriter {
    lines: Vec<String>,
}

impl ScriptWriter {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn line_if(&mut self, condition: bool, text: impl Into<String>) {
        if condition {
            self.line(text);
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn beat(&mut self, header: &str) {
        self.line(format!("## BEAT: {header}"));
        self.blank();
    }

    fn lala(&mut self, text: &str) {
        self.line(format!("Lala: \"{text}\""));
    }

    fn prime(&mut self, text: &str) {
        self.line(format!("Prime: \"{text}\""));
    }

    fn voice_activation(&mut self) {
        for cue in VOICE_ACTIVATION_SEQUENCE {
            self.line(cue);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Format an optional stat for dialogue
fn stat_or_unknown(value: Option<i64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Write a complete episode script for `event`
#[must_use]
pub fn generate_script_skeleton(event: &EventSpec, options: &SkeletonOptions) -> String {
    let tone = Tone::new(event, options);
    let narration = options.include_narration;
    let animations = options.include_animations;
    let state = options.character_state;
    let checklist = generate_checklist(&event.dress_code, event.strictness);

    debug!(event = %event.name, ?tone, items = checklist.len(), "writing script skeleton");

    let mut w = ScriptWriter::default();

    if let Some(intent) = &options.intent {
        w.line(format!("[EPISODE_INTENT: \"{intent}\"]"));
        w.blank();
    }

    w.beat("OPENING_RITUAL");
    w.line_if(animations, "(Closet background loaded, neutral lighting)");
    w.line_if(animations, "(Lala in base lounge outfit, soft idle sway)");
    w.blank();
    w.voice_activation();
    w.blank();
    w.lala(if tone.comeback {
        "Bestie... I know last time was rough. But we're still here."
    } else if tone.high_prestige {
        "Bestie... tonight feels expensive."
    } else {
        "Bestie... come style me. I have a feeling about today."
    });
    w.blank();

    w.beat("CREATOR_WELCOME");
    for cue in LOGIN_SEQUENCE {
        w.line(cue);
    }
    w.blank();
    if narration {
        if tone.comeback {
            w.prime(&format!(
                "Welcome back, besties. Last time didn't go our way. Reputation is at {}. But today? We rebuild.",
                stat_or_unknown(state.reputation)
            ));
        } else {
            w.prime("Welcome back, besties, and a special hello to our new besties. We are logging in because something just arrived...");
        }
    }
    w.blank();

    w.beat("INTERRUPTION #1");
    w.line("[UI:NOTIFICATION MailDing]");
    w.line("[UI:PULSE MailIcon x3]");
    w.blank();
    if narration {
        w.prime("Oh. Lala's got mail.");
    }
    w.blank();
    w.line("[UI:CLICK MailIcon]");
    w.line("[UI:OPEN MailPanel]");
    w.blank();

    w.beat("REVEAL #1");
    w.line("[UI:DISPLAY InviteLetterOverlay]");
    w.line(format!(
        "[MAIL: type=invite from=\"{}\" prestige={} cost={}coins]",
        event.host_brand, event.prestige, event.cost_coins
    ));
    w.line(format!("[LOCATION_HINT: \"{}\"]", event.location_hint));
    w.blank();
    if narration {
        w.prime(&format!(
            "Dearest Lala, you are cordially invited to the {}. Dress code: {}. Entry contribution: {} Prime Coins.",
            event.name,
            humanize_title(&event.dress_code),
            event.cost_coins
        ));
    }
    w.blank();
    w.voice_activation();
    if tone.high_prestige {
        w.lala(&format!("Prestige {}?!", event.prestige));
    } else if tone.comeback {
        w.lala("This... this is our second chance.");
    } else {
        w.lala("Bestie, we have to go.");
    }
    w.blank();
    if tone.broke {
        if narration {
            w.prime(&format!(
                "Bestie... we only have {} coins. This costs {}. We might go into debt.",
                stat_or_unknown(state.coins),
                event.cost_coins
            ));
        }
        w.blank();
    }

    w.beat("STAKES_INTENTION");
    w.line(format!(
        "[EVENT: name=\"{}\" prestige={} cost={} strictness={} deadline=\"{}\" dress_code=\"{}\"]",
        event.name,
        event.prestige,
        event.cost_coins,
        event.strictness,
        event.deadline_type,
        event.dress_code
    ));
    w.blank();
    w.line("[UI:DISPLAY ToDoListOverlay]");
    w.blank();
    w.line("(Checklist auto-fills:)");
    for item in &checklist {
        w.line(format!("\u{2714} {item}"));
    }
    w.blank();
    if narration {
        if tone.high_prestige {
            w.prime(&format!(
                "We cannot embarrass ourselves at a prestige {}.",
                event.prestige
            ));
        } else if tone.comeback {
            w.prime("Small steps. We nail this, we start climbing back.");
        } else {
            w.prime("Let's get to work, besties.");
        }
    }
    w.blank();
    w.voice_activation();
    w.lala(if tone.comeback {
        "I'm not giving up."
    } else {
        "This is my moment."
    });
    w.blank();

    w.beat("TRANSFORMATION");
    let segments =
        generate_transformation_segments(&checklist, &event.dress_code, &event.browse_pool_bias);
    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        w.line(format!("(Segment {} \u{2014} {})", i + 1, segment.label));
        w.line(format!("[UI:OPEN ClosetCategory {}]", segment.category));
        w.line(format!("[UI:SCROLL ClosetItems x{}]", segment.scroll_count));
        w.blank();
        for hover in &segment.hover_items {
            w.line(format!("[UI:HOVER Item {hover}]"));
        }
        w.blank();
        if narration && i == 0 {
            w.prime(&format!("Oh... wait... {}", segment.reaction_line));
        }
        w.line(format!("[UI:SELECT Item {}]", segment.selected_item));
        w.line("[FX:SPARKLE Small]");
        w.line(format!("[UI:CHECK ToDoList \"{}\"]", segment.checklist_item));
        w.blank();
        if i == 0 && animations {
            w.voice_activation();
            w.lala("Bestie... I look like money.");
            w.blank();
        }
        if i == last && segment.category == "Fragrance" {
            w.voice_activation();
            w.line_if(animations, "(sniff animation)");
            w.lala("I smell like legacy.");
            w.blank();
        }
    }

    w.beat("INTERRUPTION #2");
    w.line("[MAIL: type=reminder urgency=high]");
    w.line("[UI:NOTIFICATION EventReminder]");
    w.blank();
    if event.is_urgent() {
        if narration {
            w.prime("Oh. It starts in one hour.");
        }
        w.blank();
        w.voice_activation();
        w.lala("We are NOT showing up late.");
    } else if narration {
        w.prime("The event is tonight. We still have time, but let's not waste it.");
    }
    w.blank();

    w.beat("EVENT_TRAVEL");
    w.line("[UI:CLICK DestinationIcon]");
    w.line(format!("[SCENE:LOAD Location \"{}\"]", event.location_hint));
    w.blank();
    w.line_if(animations, "(Background transitions to event location)");
    w.blank();
    w.voice_activation();
    w.line_if(animations, "(poses gracefully)");
    w.lala(if tone.comeback {
        "Bestie... I'm nervous. But I'm here."
    } else {
        "Bestie... they're staring."
    });
    w.blank();
    if narration {
        w.prime(if tone.comeback {
            "Head up, Lala. You belong here."
        } else {
            "They should be."
        });
    }
    w.blank();

    w.beat("CLIFFHANGER");
    if narration {
        w.prime("Besties... did she slay? Rate this look from one to ten.");
    }
    w.blank();
    w.voice_activation();
    w.lala("Wait... who is that watching me?");
    w.blank();
    w.line("[UI:NOTIFICATION MysteriousDM]");
    w.blank();
    w.line("(Screen fades)");
    w.blank();
    w.line("Text: \"To Be Continued...\"");
    w.blank();

    w.line("(System tags \u{2014} written after evaluation:)");
    w.line("(  [RESULT: score=? tier=\"?\"]  )");
    w.line("(  [STAT_CHANGE: coins-? reputation+? stress+?]  )");

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_rules() {
        let event = EventSpec::default();
        let calm = SkeletonOptions::default().with_character_state(CharacterState {
            coins: Some(500),
            reputation: Some(6),
            stress: Some(1),
        });
        let tone = Tone::new(&event, &calm);
        assert!(!tone.comeback);
        assert!(!tone.broke);

        let stressed = calm.clone().with_character_state(CharacterState {
            stress: Some(4),
            ..calm.character_state
        });
        assert!(Tone::new(&event, &stressed).comeback);

        let intent = calm.with_intent(COMEBACK_INTENT);
        assert!(Tone::new(&event, &intent).comeback);
    }

    #[test]
    fn default_state_is_a_broke_comeback() {
        let tone = Tone::new(&EventSpec::default(), &SkeletonOptions::default());
        assert!(tone.comeback);
        assert!(tone.broke);
    }

    #[test]
    fn intent_leads_the_script() {
        let script = generate_script_skeleton(
            &EventSpec::default(),
            &SkeletonOptions::default().with_intent("glow_up"),
        );
        assert!(script.starts_with("[EPISODE_INTENT: \"glow_up\"]\n\n## BEAT: OPENING_RITUAL"));
    }

    #[test]
    fn narration_can_be_left_out() {
        let script = generate_script_skeleton(
            &EventSpec::default(),
            &SkeletonOptions::default().with_narration(false).with_animations(false),
        );
        assert!(!script.contains("Prime: "));
        assert!(!script.contains("(sniff animation)"));
        assert!(script.contains("Lala: \"I smell like legacy.\""));
    }

    #[test]
    fn urgent_deadline_adds_lala_line() {
        let event = EventSpec {
            deadline_type: "Tonight".to_string(),
            ..EventSpec::default()
        };
        let script = generate_script_skeleton(&event, &SkeletonOptions::default());
        assert!(script.contains("We are NOT showing up late."));
    }

    #[test]
    fn unknown_stats_print_as_question_marks() {
        assert_eq!(stat_or_unknown(None), "?");
        assert_eq!(stat_or_unknown(Some(-3)), "-3");
    }
}
