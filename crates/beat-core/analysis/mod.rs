//! Diagnostics for parsed beat scripts
//!
//! Runs once over the complete beat sequence after parsing. Rules read the
//! parser output and the cross-beat [`ParseContext`] but never mutate them,
//! and every finding is an advisory [`Warning`]: diagnostics never change
//! whether a parse succeeded.
//!
//! # Built-in Rules
//!
//! In execution order:
//!
//! - `lala_without_voice_activate`: Lala speaks before any voice activation
//! - `missing_login`: the episode opens without a login flow
//! - `missing_event_tag`: no `[EVENT:]` tag anywhere in the script
//!
//! # Example
//!
//! ```rust
//! use beat_core::{parse_script, ParseOptions};
//!
//! let result = parse_script("## BEAT: REVEAL #2\nLala: \"Surprise.\"", &ParseOptions::default());
//! let plan = result.plan().expect("one beat");
//! assert_eq!(plan.warnings[0].code(), "lala_without_voice_activate");
//! ```

use tracing::debug;

use crate::parser::{
    ast::{Beat, EpisodeTags, UiAction},
    ParseContext,
};

pub mod config;
pub mod rules;
pub mod warning;

pub use config::{DiagnosticChecks, DiagnosticConfig};
pub use rules::BuiltinRules;
pub use warning::{Autofix, Warning, WarningLocation, WarningSeverity};

/// Read-only view of a finished parse handed to every rule
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticInput<'a> {
    /// Parsed beats in order
    pub beats: &'a [Beat],
    /// All UI actions in order
    pub ui_actions: &'a [UiAction],
    /// Episode-scoped directives
    pub episode_tags: &'a EpisodeTags,
    /// Cross-beat flags and queued findings
    pub context: &'a ParseContext,
}

/// Trait for diagnostic rules
pub trait DiagnosticRule: Send + Sync {
    /// Stable warning code
    fn code(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Rule description
    fn description(&self) -> &'static str;

    /// Severity of emitted warnings
    fn default_severity(&self) -> WarningSeverity;

    /// Flag that enables this rule
    fn check(&self) -> DiagnosticChecks;

    /// Inspect a finished parse
    fn run(&self, input: &DiagnosticInput<'_>) -> Vec<Warning>;
}

/// Run all enabled rules in order
///
/// Respects the configured severity filter and warning limit.
#[must_use]
pub fn run_diagnostics(input: &DiagnosticInput<'_>, config: &DiagnosticConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for rule in BuiltinRules::all_rules() {
        if !config.is_enabled(rule.check()) || !config.should_report(rule.default_severity()) {
            continue;
        }

        let mut found = rule.run(input);
        found.retain(|warning| config.should_report(warning.severity()));
        warnings.extend(found);

        if config.max_warnings > 0 && warnings.len() >= config.max_warnings {
            warnings.truncate(config.max_warnings);
            break;
        }
    }

    debug!(count = warnings.len(), "diagnostics complete");
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::compile;

    const NOISY: &str = "## BEAT: OPENING RITUAL\nLala: \"One.\"\nLala: \"Two.\"";

    fn codes(config: &DiagnosticConfig) -> Vec<&'static str> {
        let compiled = compile(NOISY).unwrap();
        run_diagnostics(&compiled.diagnostic_input(), config)
            .iter()
            .map(Warning::code)
            .collect()
    }

    #[test]
    fn all_rules_in_order() {
        assert_eq!(
            codes(&DiagnosticConfig::default()),
            vec![
                "lala_without_voice_activate",
                "lala_without_voice_activate",
                "missing_login",
                "missing_event_tag",
            ]
        );
    }

    #[test]
    fn severity_filter_drops_info() {
        let config = DiagnosticConfig::default().with_min_severity(WarningSeverity::Warning);
        assert!(!codes(&config).contains(&"missing_event_tag"));
    }

    #[test]
    fn disabled_checks_and_cap() {
        let config = DiagnosticConfig::default().without_check(DiagnosticChecks::VOICE_ACTIVATION);
        assert_eq!(codes(&config), vec!["missing_login", "missing_event_tag"]);

        let capped = DiagnosticConfig::default().with_max_warnings(1);
        assert_eq!(codes(&capped), vec!["lala_without_voice_activate"]);
    }
}
