//! Stage 3: screen-time estimate per beat
//!
//! `max(ceil(words / 2.2) + ceil(Σ ui), floor)` unless the author pinned the
//! duration with `[DURATION:]`.

use crate::{taxonomy::BeatType, utils::round_hundredths};

/// Spoken words per second
pub const WORDS_PER_SECOND: f64 = 2.2;

/// Seconds needed to speak `word_count` words
#[must_use]
pub fn dialogue_seconds(word_count: usize) -> u32 {
    (word_count as f64 / WORDS_PER_SECOND).ceil() as u32
}

/// Whole seconds covering the summed UI action durations
///
/// The sum is rounded to hundredths first so accumulated float error never
/// adds a second (`0.8 × 5` is 4, not 5).
#[must_use]
pub fn ui_seconds(total: f64) -> u32 {
    round_hundredths(total).ceil() as u32
}

/// Final duration for a beat
///
/// # Example
///
/// ```rust
/// use beat_core::parser::duration::synthesize;
/// use beat_core::BeatType;
///
/// // 10 words -> 5s, 0.8s of UI -> 1s, below the 8s floor
/// assert_eq!(synthesize(&BeatType::OpeningRitual, 10, 0.8, None), 8);
/// assert_eq!(synthesize(&BeatType::OpeningRitual, 30, 3.3, None), 18);
/// assert_eq!(synthesize(&BeatType::OpeningRitual, 30, 3.3, Some(4)), 4);
/// ```
#[must_use]
pub fn synthesize(
    beat_type: &BeatType,
    word_count: usize,
    ui_total: f64,
    duration_override: Option<u32>,
) -> u32 {
    duration_override.unwrap_or_else(|| {
        let estimate = dialogue_seconds(word_count).saturating_add(ui_seconds(ui_total));
        estimate.max(beat_type.defaults().duration)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::FALLBACK_DURATION_SECONDS;

    #[test]
    fn dialogue_pacing() {
        assert_eq!(dialogue_seconds(0), 0);
        assert_eq!(dialogue_seconds(1), 1);
        assert_eq!(dialogue_seconds(21), 10);
        assert_eq!(dialogue_seconds(23), 11);
    }

    #[test]
    fn ui_sum_is_not_inflated_by_float_error() {
        let total: f64 = std::iter::repeat(0.8).take(5).sum();
        assert_eq!(ui_seconds(total), 4);
        assert_eq!(ui_seconds(0.0), 0);
        assert_eq!(ui_seconds(0.5), 1);
    }

    #[test]
    fn unknown_type_uses_fallback_floor() {
        let montage = BeatType::Other("montage".to_string());
        assert_eq!(synthesize(&montage, 0, 0.0, None), FALLBACK_DURATION_SECONDS);
    }

    #[test]
    fn override_wins_even_below_floor() {
        assert_eq!(synthesize(&BeatType::Transformation, 500, 40.0, Some(3)), 3);
    }
}
