//! Advisory diagnostics attached to a Scene Plan

use core::{fmt, str::FromStr};

use crate::utils::CoreError;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Severity of a warning
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningSeverity {
    /// Informational; the script works as is
    Info,
    /// Authoring problem downstream tooling will notice
    Warning,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.pad("info"),
            Self::Warning => f.pad("warning"),
        }
    }
}

impl FromStr for WarningSeverity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(CoreError::config(format!("unknown severity '{other}'"))),
        }
    }
}

/// Where a warning points
///
/// Episode-level warnings carry neither a beat nor a line.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLocation {
    /// Beat the warning belongs to
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub beat_temp_id: Option<String>,
    /// 1-based line the fix applies to
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub line: Option<usize>,
}

impl WarningLocation {
    /// Point at a line inside a beat
    #[must_use]
    pub fn line_in_beat(beat_temp_id: &str, line: usize) -> Self {
        Self {
            beat_temp_id: Some(beat_temp_id.to_string()),
            line: Some(line),
        }
    }

    /// Point at the whole episode
    #[must_use]
    pub const fn episode() -> Self {
        Self {
            beat_temp_id: None,
            line: None,
        }
    }
}

/// Literal text that resolves a warning when inserted
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autofix {
    /// Whether the fix can be applied mechanically
    pub available: bool,
    /// Fix identifier understood by editors (`insert_before_line`, …)
    pub action: &'static str,
    /// Text to insert
    pub preview: String,
}

impl Autofix {
    /// Mechanically applicable fix
    #[must_use]
    pub fn insert(action: &'static str, preview: impl Into<String>) -> Self {
        Self {
            available: true,
            action,
            preview: preview.into(),
        }
    }
}

/// One diagnostic produced after parsing
///
/// Warnings never block output.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Stable rule code
    code: &'static str,
    /// Severity level
    severity: WarningSeverity,
    /// Human-readable message
    message: String,
    /// Location in the script
    at: WarningLocation,
    /// Suggested fix
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    autofix: Option<Autofix>,
}

impl Warning {
    /// Create a new warning with an episode-level location
    #[must_use]
    pub fn new(severity: WarningSeverity, code: &'static str, message: String) -> Self {
        Self {
            code,
            severity,
            message,
            at: WarningLocation::episode(),
            autofix: None,
        }
    }

    /// Add location information
    #[must_use]
    pub fn with_location(mut self, at: WarningLocation) -> Self {
        self.at = at;
        self
    }

    /// Add a fix
    #[must_use]
    pub fn with_autofix(mut self, autofix: Autofix) -> Self {
        self.autofix = Some(autofix);
        self
    }

    /// Get rule code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Get severity
    #[must_use]
    pub const fn severity(&self) -> WarningSeverity {
        self.severity
    }

    /// Get message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get location
    #[must_use]
    pub const fn at(&self) -> &WarningLocation {
        &self.at
    }

    /// Get suggested fix
    #[must_use]
    pub const fn autofix(&self) -> Option<&Autofix> {
        self.autofix.as_ref()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.code)?;
        if let Some(line) = self.at.line {
            write!(f, " line {line}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parsing() {
        assert_eq!("INFO".parse::<WarningSeverity>(), Ok(WarningSeverity::Info));
        assert_eq!("warn".parse::<WarningSeverity>(), Ok(WarningSeverity::Warning));
        assert!("loud".parse::<WarningSeverity>().is_err());
        assert!(WarningSeverity::Warning > WarningSeverity::Info);
    }

    #[test]
    fn display_includes_line() {
        let warning = Warning::new(WarningSeverity::Warning, "demo", "Something".to_string())
            .with_location(WarningLocation::line_in_beat("beat-1", 4));
        assert_eq!(warning.to_string(), "warning [demo] line 4: Something");
    }

    #[test]
    fn builder_sets_autofix() {
        let warning = Warning::new(WarningSeverity::Info, "demo", String::new())
            .with_autofix(Autofix::insert("insert_event_tag", "[EVENT: ]"));
        let fix = warning.autofix().map(|f| (f.available, f.action));
        assert_eq!(fix, Some((true, "insert_event_tag")));
        assert_eq!(warning.at(), &WarningLocation::episode());
    }
}
