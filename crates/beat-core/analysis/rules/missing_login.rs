//! Episode opening without a login flow

use crate::{
    analysis::{
        Autofix, DiagnosticChecks, DiagnosticInput, DiagnosticRule, Warning, WarningLocation,
        WarningSeverity,
    },
    taxonomy::BeatType,
};

/// Canonical five-line login flow
pub const LOGIN_SEQUENCE: [&str; 5] = [
    "[UI:OPEN LoginWindow]",
    "[UI:TYPE Username \"JustAWomanInHerPrime\"]",
    "[UI:TYPE Password \"\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\"]",
    "[UI:CLICK LoginConfirm]",
    "[UI:CLOSE LoginWindow]",
];

/// Rule for episodes that open without logging in
///
/// Fires when no UI target anywhere mentions "login" and the first beat is
/// an `opening_ritual` or `creator_welcome`. Later beats are not inspected:
/// logging in matters once, at the top of an episode.
pub struct MissingLoginRule;

impl DiagnosticRule for MissingLoginRule {
    fn code(&self) -> &'static str {
        "missing_login"
    }

    fn name(&self) -> &'static str {
        "Missing Login"
    }

    fn description(&self) -> &'static str {
        "Detects episodes that open without the login sequence"
    }

    fn default_severity(&self) -> WarningSeverity {
        WarningSeverity::Warning
    }

    fn check(&self) -> DiagnosticChecks {
        DiagnosticChecks::LOGIN_SEQUENCE
    }

    fn run(&self, input: &DiagnosticInput<'_>) -> Vec<Warning> {
        if input.context.login_seen {
            return Vec::new();
        }

        let Some(first) = input.beats.first() else {
            return Vec::new();
        };
        if !matches!(
            first.beat_type,
            BeatType::OpeningRitual | BeatType::CreatorWelcome
        ) {
            return Vec::new();
        }

        vec![Warning::new(
            self.default_severity(),
            self.code(),
            format!(
                "Episode opens with {} but never logs in",
                first.beat_type.as_str()
            ),
        )
        .with_location(WarningLocation::line_in_beat(
            &first.temp_id,
            first.source.start_line,
        ))
        .with_autofix(Autofix::insert(
            "insert_login_sequence",
            LOGIN_SEQUENCE.join("\n"),
        ))]
    }
}
