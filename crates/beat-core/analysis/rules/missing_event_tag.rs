//! Scripts without an `[EVENT:]` tag

use crate::analysis::{
    Autofix, DiagnosticChecks, DiagnosticInput, DiagnosticRule, Warning, WarningLocation,
    WarningSeverity,
};

/// Template inserted at the top of the script
pub const EVENT_TAG_TEMPLATE: &str = "[EVENT: name=\"Event Name\" prestige=5 cost=100 strictness=5 deadline=\"medium\" dress_code=\"elegant\"]";

/// Rule for scripts that never declare their world event
pub struct MissingEventTagRule;

impl DiagnosticRule for MissingEventTagRule {
    fn code(&self) -> &'static str {
        "missing_event_tag"
    }

    fn name(&self) -> &'static str {
        "Missing Event Tag"
    }

    fn description(&self) -> &'static str {
        "Detects scripts without an [EVENT:] tag"
    }

    fn default_severity(&self) -> WarningSeverity {
        WarningSeverity::Info
    }

    fn check(&self) -> DiagnosticChecks {
        DiagnosticChecks::EVENT_TAG
    }

    fn run(&self, input: &DiagnosticInput<'_>) -> Vec<Warning> {
        if input.episode_tags.has_event() {
            return Vec::new();
        }

        vec![Warning::new(
            self.default_severity(),
            self.code(),
            "No [EVENT:] tag found; event stats will not be linked".to_string(),
        )
        .with_location(WarningLocation::episode())
        .with_autofix(Autofix::insert("insert_event_tag", EVENT_TAG_TEMPLATE))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::compile, tokenizer::parse_key_values};

    #[test]
    fn fires_without_event() {
        let compiled = compile("## BEAT: REVEAL\nx").unwrap();
        let warnings = MissingEventTagRule.run(&compiled.diagnostic_input());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity(), WarningSeverity::Info);
        assert_eq!(warnings[0].at(), &WarningLocation::episode());
    }

    #[test]
    fn silent_with_event() {
        let compiled = compile("[EVENT: name=\"Gala\"]\n## BEAT: REVEAL\nx").unwrap();
        assert!(MissingEventTagRule.run(&compiled.diagnostic_input()).is_empty());
    }

    #[test]
    fn template_parses_as_event_payload() {
        let body = EVENT_TAG_TEMPLATE
            .trim_start_matches("[EVENT:")
            .trim_end_matches(']');
        assert_eq!(parse_key_values(body).len(), 6);
    }
}
