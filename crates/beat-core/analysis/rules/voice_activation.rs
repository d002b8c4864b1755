//! Lala dialogue before the voice activation cue

use crate::analysis::{
    Autofix, DiagnosticChecks, DiagnosticInput, DiagnosticRule, Warning, WarningLocation,
    WarningSeverity,
};

/// Lines that activate Lala's voice, inserted before the offending line
pub const VOICE_ACTIVATION_SEQUENCE: [&str; 2] = ["[UI:CLICK VoiceIcon]", "[UI:VOICE_ACTIVATE Lala]"];

/// Rule for Lala lines spoken before any `voice_activate` action
///
/// The avatar is voiced only after the viewer activates it, so every `lala`
/// dialogue line preceding the first `[UI:VOICE_ACTIVATE …]` in the script
/// gets one warning. Findings are queued by the parser while it walks the
/// beats; this rule turns them into warnings.
pub struct VoiceActivationRule;

impl DiagnosticRule for VoiceActivationRule {
    fn code(&self) -> &'static str {
        "lala_without_voice_activate"
    }

    fn name(&self) -> &'static str {
        "Lala Without Voice Activation"
    }

    fn description(&self) -> &'static str {
        "Detects Lala dialogue before the first voice activation cue"
    }

    fn default_severity(&self) -> WarningSeverity {
        WarningSeverity::Warning
    }

    fn check(&self) -> DiagnosticChecks {
        DiagnosticChecks::VOICE_ACTIVATION
    }

    fn run(&self, input: &DiagnosticInput<'_>) -> Vec<Warning> {
        let preview = VOICE_ACTIVATION_SEQUENCE.join("\n");

        input
            .context
            .pending_voice_warnings
            .iter()
            .map(|pending| {
                Warning::new(
                    self.default_severity(),
                    self.code(),
                    format!(
                        "Lala speaks on line {} before her voice is activated",
                        pending.line
                    ),
                )
                .with_location(WarningLocation::line_in_beat(
                    &pending.beat_temp_id,
                    pending.line,
                ))
                .with_autofix(Autofix::insert("insert_before_line", preview.clone()))
            })
            .collect()
    }
}
