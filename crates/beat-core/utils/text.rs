//! Text helpers shared by the parser and the output assembler
//!
//! Line-ending cleanup, word counting, title humanizing and duration
//! formatting.

/// Strip a leading UTF-8 byte order mark
///
/// Returns the remaining text and whether a BOM was present.
///
/// # Example
///
/// ```rust
/// use beat_core::utils::strip_bom;
///
/// let (text, had_bom) = strip_bom("\u{FEFF}## BEAT: REVEAL");
/// assert_eq!(text, "## BEAT: REVEAL");
/// assert!(had_bom);
/// ```
#[must_use]
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix('\u{FEFF}')
        .map_or((text, false), |stripped| (stripped, true))
}

/// Normalize line endings to Unix style (`\n`)
///
/// Converts Windows (`\r\n`) and classic Mac (`\r`) line endings so line
/// numbers stay consistent across sources.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Count whitespace-separated words
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Turn an authored beat title into display form
///
/// `"OPENING_RITUAL"` becomes `"Opening Ritual"`, em dashes become en dashes.
///
/// # Example
///
/// ```rust
/// use beat_core::utils::humanize_title;
///
/// assert_eq!(humanize_title("INTERRUPTION #1"), "Interruption #1");
/// assert_eq!(humanize_title("creator_welcome"), "Creator Welcome");
/// ```
#[must_use]
pub fn humanize_title(raw: &str) -> String {
    raw.replace('\u{2014}', "\u{2013}")
        .replace('_', " ")
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character and lower-case the rest
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Round seconds to hundredths so accumulated clocks stay stable
#[must_use]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format whole seconds as `"{m}m {s}s"`, `"{m}m"` or `"{s}s"`
///
/// # Example
///
/// ```rust
/// use beat_core::utils::format_duration;
///
/// assert_eq!(format_duration(95), "1m 35s");
/// assert_eq!(format_duration(120), "2m");
/// assert_eq!(format_duration(42), "42s");
/// ```
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    match (minutes, secs) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Truncate to at most `max_chars` characters on a char boundary
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_absent_is_untouched() {
        assert_eq!(strip_bom("plain"), ("plain", false));
    }

    #[test]
    fn line_endings_normalized() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(count_words("  Bestie...   we have\tto go. "), 5);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn humanize_handles_dashes_and_case() {
        assert_eq!(
            humanize_title("INTERRUPTION \u{2014} INVITE"),
            "Interruption \u{2013} Invite"
        );
        assert_eq!(humanize_title("OPENING RITUAL"), "Opening Ritual");
        assert_eq!(humanize_title(""), "");
    }

    #[test]
    fn rounding_removes_float_drift() {
        assert!((round_hundredths(0.1 + 0.2) - 0.3).abs() < f64::EPSILON);
        assert!((round_hundredths(0.8) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(61), "1m 1s");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
