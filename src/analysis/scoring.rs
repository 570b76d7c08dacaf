use serde::{Deserialize, Serialize};

use crate::engine::config::{PaceConfig, ScoringConfig};
use crate::engine::MAX_SCORE;

/// Qualitative fluency band over the adjusted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluencyBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl FluencyBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FluencyBand::Excellent => "excellent",
            FluencyBand::Good => "good",
            FluencyBand::Fair => "fair",
            FluencyBand::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Base score, the capped penalty terms applied on top of it, and the
/// resulting adjusted score. The adjustment is only ever a deduction:
/// `adjusted_score <= base_score` holds for every input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub rate_penalty: f64,
    pub silence_penalty: f64,
    pub pause_penalty: f64,
    pub adjusted_score: f64,
}

/// Combines filler density with pace and pause signals into the base and
/// adjusted fluency scores, both clamped to [0, 100] and rounded to one
/// decimal place.
pub fn score_fluency(
    filler_ratio: f64,
    words_per_minute: f64,
    speech_ratio: f64,
    significant_pauses: usize,
    scoring: &ScoringConfig,
    pace: &PaceConfig,
) -> ScoreBreakdown {
    let base = (MAX_SCORE - filler_ratio * 100.0 * scoring.filler_weight).clamp(0.0, MAX_SCORE);

    let silence_penalty = ((1.0 - speech_ratio) * scoring.silence_penalty_weight)
        .min(scoring.silence_penalty_cap)
        .max(0.0);
    let pause_penalty = (significant_pauses as f64 * scoring.significant_pause_penalty)
        .min(scoring.pause_penalty_cap);
    let rate_penalty = rate_penalty(words_per_minute, pace);

    let adjusted = (base - silence_penalty - pause_penalty - rate_penalty).clamp(0.0, base);

    ScoreBreakdown {
        base_score: round_tenth(base),
        rate_penalty: round_tenth(rate_penalty),
        silence_penalty: round_tenth(silence_penalty),
        pause_penalty: round_tenth(pause_penalty),
        adjusted_score: round_tenth(adjusted),
    }
}

/// Bands an adjusted score against the configured thresholds.
pub fn fluency_band(adjusted_score: f64, scoring: &ScoringConfig) -> FluencyBand {
    if adjusted_score >= scoring.excellent_min_score {
        FluencyBand::Excellent
    } else if adjusted_score >= scoring.good_min_score {
        FluencyBand::Good
    } else if adjusted_score >= scoring.fair_min_score {
        FluencyBand::Fair
    } else {
        FluencyBand::NeedsImprovement
    }
}

fn rate_penalty(words_per_minute: f64, pace: &PaceConfig) -> f64 {
    // An unmeasured rate carries no penalty; the silence penalty already
    // covers responses without speech.
    if words_per_minute <= 0.0 {
        return 0.0;
    }

    let raw = if words_per_minute < pace.penalty_floor_wpm {
        (pace.penalty_floor_wpm - words_per_minute) / pace.slow_penalty_divisor
    } else if words_per_minute > pace.penalty_ceiling_wpm {
        (words_per_minute - pace.penalty_ceiling_wpm) / pace.fast_penalty_divisor
    } else {
        0.0
    };

    raw.min(pace.rate_penalty_cap)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(
        filler_ratio: f64,
        words_per_minute: f64,
        speech_ratio: f64,
        significant_pauses: usize,
    ) -> ScoreBreakdown {
        score_fluency(
            filler_ratio,
            words_per_minute,
            speech_ratio,
            significant_pauses,
            &ScoringConfig::default(),
            &PaceConfig::default(),
        )
    }

    #[test]
    fn base_score_follows_filler_density() {
        let breakdown = score(0.1, 150.0, 1.0, 0);
        assert!((breakdown.base_score - 85.0).abs() < 1e-9);
        assert_eq!(breakdown.adjusted_score, breakdown.base_score);
    }

    #[test]
    fn base_score_clamps_at_zero() {
        let breakdown = score(1.0, 150.0, 1.0, 0);
        assert_eq!(breakdown.base_score, 0.0);
        assert_eq!(breakdown.adjusted_score, 0.0);
    }

    #[test]
    fn adjusted_never_exceeds_base() {
        for significant_pauses in 0..8 {
            for ratio in [0.0, 0.05, 0.2, 0.5, 1.0] {
                for rate in [0.0, 60.0, 150.0, 320.0] {
                    let breakdown = score(ratio, rate, 0.7, significant_pauses);
                    assert!(
                        breakdown.adjusted_score <= breakdown.base_score,
                        "adjustment must never raise the score (ratio {ratio}, rate {rate})"
                    );
                    assert!(breakdown.adjusted_score >= 0.0);
                    assert!(breakdown.base_score <= 100.0);
                }
            }
        }
    }

    #[test]
    fn adjusted_is_monotone_in_filler_ratio() {
        let mut previous = f64::MAX;
        for ratio in [0.0, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0] {
            let breakdown = score(ratio, 150.0, 0.9, 1);
            assert!(
                breakdown.adjusted_score <= previous,
                "more fillers must never raise the adjusted score"
            );
            previous = breakdown.adjusted_score;
        }
    }

    #[test]
    fn adjusted_is_monotone_in_significant_pauses() {
        let mut previous = f64::MAX;
        for significant_pauses in 0..6 {
            let breakdown = score(0.1, 150.0, 0.9, significant_pauses);
            assert!(
                breakdown.adjusted_score <= previous,
                "more significant pauses must never raise the adjusted score"
            );
            previous = breakdown.adjusted_score;
        }
    }

    #[test]
    fn pause_penalty_is_capped() {
        let breakdown = score(0.0, 150.0, 1.0, 10);
        assert!((breakdown.pause_penalty - 15.0).abs() < 1e-9);
    }

    #[test]
    fn silence_penalty_is_capped() {
        let breakdown = score(0.0, 150.0, 0.0, 0);
        assert!((breakdown.silence_penalty - 20.0).abs() < 1e-9);
    }

    #[test]
    fn rate_penalty_scales_with_distance_from_band() {
        let slow = score(0.0, 40.0, 1.0, 0);
        assert!((slow.rate_penalty - 6.0).abs() < 1e-9);

        let fast = score(0.0, 300.0, 1.0, 0);
        assert!((fast.rate_penalty - 5.0).abs() < 1e-9);

        let extreme = score(0.0, 500.0, 1.0, 0);
        assert!(
            (extreme.rate_penalty - 10.0).abs() < 1e-9,
            "rate penalty must cap"
        );

        let in_band = score(0.0, 150.0, 1.0, 0);
        assert_eq!(in_band.rate_penalty, 0.0);

        let unmeasured = score(0.0, 0.0, 1.0, 0);
        assert_eq!(unmeasured.rate_penalty, 0.0);
    }

    #[test]
    fn fluency_bands_follow_thresholds() {
        let scoring = ScoringConfig::default();

        assert_eq!(fluency_band(80.0, &scoring), FluencyBand::Excellent);
        assert_eq!(fluency_band(79.9, &scoring), FluencyBand::Good);
        assert_eq!(fluency_band(60.0, &scoring), FluencyBand::Good);
        assert_eq!(fluency_band(40.0, &scoring), FluencyBand::Fair);
        assert_eq!(fluency_band(39.9, &scoring), FluencyBand::NeedsImprovement);
    }

    #[test]
    fn scores_are_rounded_to_one_decimal() {
        let breakdown = score(0.123, 150.0, 1.0, 0);
        assert!((breakdown.base_score * 10.0).fract().abs() < 1e-9);
        assert!((breakdown.adjusted_score * 10.0).fract().abs() < 1e-9);
    }
}
