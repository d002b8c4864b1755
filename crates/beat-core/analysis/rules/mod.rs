//! Built-in diagnostic rules
//!
//! Each rule lives in its own module. The canonical fix snippets are public so
//! tools that write scripts can emit the same lines the fixes insert.

use super::DiagnosticRule;

pub mod missing_event_tag;
pub mod missing_login;
pub mod voice_activation;

pub use missing_event_tag::{MissingEventTagRule, EVENT_TAG_TEMPLATE};
pub use missing_login::{MissingLoginRule, LOGIN_SEQUENCE};
pub use voice_activation::{VoiceActivationRule, VOICE_ACTIVATION_SEQUENCE};

/// Built-in rule registry
pub struct BuiltinRules;

impl BuiltinRules {
    /// All built-in rules in execution order
    ///
    /// # Example
    ///
    /// ```rust
    /// use beat_core::analysis::rules::BuiltinRules;
    ///
    /// let codes: Vec<_> = BuiltinRules::all_rules().iter().map(|r| r.code()).collect();
    /// assert_eq!(codes, ["lala_without_voice_activate", "missing_login", "missing_event_tag"]);
    /// ```
    #[must_use]
    pub fn all_rules() -> Vec<Box<dyn DiagnosticRule>> {
        vec![
            Box::new(VoiceActivationRule),
            Box::new(MissingLoginRule),
            Box::new(MissingEventTagRule),
        ]
    }

    /// Look up a rule by warning code
    #[must_use]
    pub fn by_code(code: &str) -> Option<Box<dyn DiagnosticRule>> {
        Self::all_rules().into_iter().find(|rule| rule.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code() {
        assert!(BuiltinRules::by_code("missing_login").is_some());
        assert!(BuiltinRules::by_code("missing_style").is_none());
    }

    #[test]
    fn every_rule_has_a_distinct_check() {
        let rules = BuiltinRules::all_rules();
        for (i, a) in rules.iter().enumerate() {
            for b in rules.iter().skip(i + 1) {
                assert_ne!(a.check(), b.check());
            }
        }
    }
}
