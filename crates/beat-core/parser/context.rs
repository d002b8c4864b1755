//! Cross-beat state threaded through one parse call

/// `lala` dialogue seen before any voice activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVoiceWarning {
    /// Owning beat
    pub beat_temp_id: String,
    /// 1-based line of the dialogue
    pub line: usize,
}

/// Mutable flags shared across beats of a single parse
///
/// Created per call and passed by reference through the content parser, then
/// read by the diagnostics rules. Never shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Set by the first `voice_activate` UI action
    pub voice_activate_seen: bool,
    /// Set by any UI target containing "login"
    pub login_seen: bool,
    /// Queued voice-activation diagnostics in document order
    pub pending_voice_warnings: Vec<PendingVoiceWarning>,
}

impl ParseContext {
    /// Create a fresh context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `lala` line spoken before activation
    pub fn queue_voice_warning(&mut self, beat_temp_id: &str, line: usize) {
        self.pending_voice_warnings.push(PendingVoiceWarning {
            beat_temp_id: beat_temp_id.to_string(),
            line,
        });
    }

    /// Update the login flag from a UI target
    pub fn observe_ui_target(&mut self, target: &str) {
        if !self.login_seen && target.to_ascii_lowercase().contains("login") {
            self.login_seen = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_detection_is_case_insensitive() {
        let mut ctx = ParseContext::new();
        ctx.observe_ui_target("MailPanel");
        assert!(!ctx.login_seen);
        ctx.observe_ui_target("LOGINWindow");
        assert!(ctx.login_seen);
    }

    #[test]
    fn voice_warnings_queue_in_order() {
        let mut ctx = ParseContext::new();
        ctx.queue_voice_warning("beat-1", 3);
        ctx.queue_voice_warning("beat-2", 9);
        let lines: Vec<_> = ctx.pending_voice_warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![3, 9]);
    }
}
