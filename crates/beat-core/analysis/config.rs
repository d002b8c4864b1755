//! Diagnostics configuration

use crate::utils::CoreError;

use super::WarningSeverity;

bitflags::bitflags! {
    /// Diagnostic checks to run
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DiagnosticChecks: u8 {
        /// `lala_without_voice_activate`
        const VOICE_ACTIVATION = 1 << 0;
        /// `missing_login`
        const LOGIN_SEQUENCE = 1 << 1;
        /// `missing_event_tag`
        const EVENT_TAG = 1 << 2;
    }
}

impl DiagnosticChecks {
    /// Map a rule code to its check flag
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for unknown codes.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code.trim() {
            "lala_without_voice_activate" => Ok(Self::VOICE_ACTIVATION),
            "missing_login" => Ok(Self::LOGIN_SEQUENCE),
            "missing_event_tag" => Ok(Self::EVENT_TAG),
            other => Err(CoreError::config(format!("unknown diagnostic '{other}'"))),
        }
    }
}

/// Configuration for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Minimum severity to report
    pub min_severity: WarningSeverity,
    /// Checks to run
    pub checks: DiagnosticChecks,
    /// Maximum number of warnings (0 = unlimited)
    pub max_warnings: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            min_severity: WarningSeverity::Info,
            checks: DiagnosticChecks::all(),
            max_warnings: 0,
        }
    }
}

impl DiagnosticConfig {
    /// Set minimum severity level
    #[must_use]
    pub const fn with_min_severity(mut self, severity: WarningSeverity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Disable a check
    #[must_use]
    pub fn without_check(mut self, check: DiagnosticChecks) -> Self {
        self.checks.remove(check);
        self
    }

    /// Set maximum number of warnings
    #[must_use]
    pub const fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings = max;
        self
    }

    /// Check if a check should run
    #[must_use]
    pub const fn is_enabled(&self, check: DiagnosticChecks) -> bool {
        self.checks.contains(check)
    }

    /// Check if a severity should be reported
    #[must_use]
    pub fn should_report(&self, severity: WarningSeverity) -> bool {
        severity >= self.min_severity
    }
}
