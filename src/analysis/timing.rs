use serde::{Deserialize, Serialize};

use crate::engine::config::{ConfidenceConfig, DurationConfig, PaceConfig};
use crate::engine::error::EvaluationError;

/// Confidence bucket derived from how quickly the candidate started
/// answering, not from what was said.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// Qualitative speech-pace band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceBand {
    Slow,
    Optimal,
    Fast,
}

impl PaceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceBand::Slow => "slow",
            PaceBand::Optimal => "optimal",
            PaceBand::Fast => "fast",
        }
    }
}

/// Banding of the overall answer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBand {
    VeryBrief,
    Brief,
    Appropriate,
    Detailed,
    VeryDetailed,
}

impl DurationBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBand::VeryBrief => "very_brief",
            DurationBand::Brief => "brief",
            DurationBand::Appropriate => "appropriate",
            DurationBand::Detailed => "detailed",
            DurationBand::VeryDetailed => "very_detailed",
        }
    }
}

/// Division guard: a zero or degenerate denominator yields the neutral
/// default instead of surfacing a numeric-domain error to the caller.
pub(crate) fn div_or_default(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Words per minute over the time actually spent speaking; 0 when no
/// speech was detected.
pub fn words_per_minute(word_count: usize, speech_secs: f64) -> f64 {
    div_or_default(word_count as f64, speech_secs / 60.0)
}

/// Bands a measured speech rate; None when the rate is unmeasured.
pub fn pace_band(words_per_minute: f64, config: &PaceConfig) -> Option<PaceBand> {
    if words_per_minute <= 0.0 {
        return None;
    }
    Some(if words_per_minute < config.optimal_min_wpm {
        PaceBand::Slow
    } else if words_per_minute > config.optimal_max_wpm {
        PaceBand::Fast
    } else {
        PaceBand::Optimal
    })
}

/// Maps a response latency to its confidence tier.
pub fn classify_confidence(
    latency_secs: f64,
    config: &ConfidenceConfig,
) -> Result<ConfidenceTier, EvaluationError> {
    if !latency_secs.is_finite() || latency_secs < 0.0 {
        return Err(EvaluationError::InvalidLatency {
            seconds: latency_secs,
        });
    }
    Ok(if latency_secs <= config.high_max_latency_secs {
        ConfidenceTier::High
    } else if latency_secs <= config.medium_max_latency_secs {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    })
}

/// Bands the total response duration.
pub fn duration_band(response_secs: f64, config: &DurationConfig) -> DurationBand {
    if response_secs < config.very_brief_max_secs {
        DurationBand::VeryBrief
    } else if response_secs < config.brief_max_secs {
        DurationBand::Brief
    } else if response_secs < config.appropriate_max_secs {
        DurationBand::Appropriate
    } else if response_secs < config.detailed_max_secs {
        DurationBand::Detailed
    } else {
        DurationBand::VeryDetailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_per_minute_uses_speech_time() {
        assert!((words_per_minute(150, 60.0) - 150.0).abs() < 1e-9);
        assert!((words_per_minute(90, 30.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn zero_speech_time_defaults_to_zero_rate() {
        assert_eq!(words_per_minute(42, 0.0), 0.0);
        assert_eq!(words_per_minute(0, 0.0), 0.0);
    }

    #[test]
    fn pace_bands_are_inclusive_of_the_optimal_window() {
        let config = PaceConfig::default();

        assert_eq!(pace_band(119.9, &config), Some(PaceBand::Slow));
        assert_eq!(pace_band(120.0, &config), Some(PaceBand::Optimal));
        assert_eq!(pace_band(180.0, &config), Some(PaceBand::Optimal));
        assert_eq!(pace_band(180.1, &config), Some(PaceBand::Fast));
        assert_eq!(pace_band(0.0, &config), None, "unmeasured rate has no band");
    }

    #[test]
    fn confidence_thresholds_are_inclusive() {
        let config = ConfidenceConfig::default();

        assert_eq!(
            classify_confidence(10.0, &config),
            Ok(ConfidenceTier::High)
        );
        assert_eq!(
            classify_confidence(10.1, &config),
            Ok(ConfidenceTier::Medium)
        );
        assert_eq!(
            classify_confidence(20.0, &config),
            Ok(ConfidenceTier::Medium)
        );
        assert_eq!(classify_confidence(35.0, &config), Ok(ConfidenceTier::Low));
    }

    #[test]
    fn negative_latency_is_rejected() {
        let config = ConfidenceConfig::default();
        assert_eq!(
            classify_confidence(-0.5, &config),
            Err(EvaluationError::InvalidLatency { seconds: -0.5 })
        );
    }

    #[test]
    fn non_finite_latency_is_rejected() {
        let config = ConfidenceConfig::default();
        assert!(classify_confidence(f64::NAN, &config).is_err());
        assert!(classify_confidence(f64::INFINITY, &config).is_err());
    }

    #[test]
    fn duration_bands_cover_the_full_range() {
        let config = DurationConfig::default();

        assert_eq!(duration_band(10.0, &config), DurationBand::VeryBrief);
        assert_eq!(duration_band(15.0, &config), DurationBand::Brief);
        assert_eq!(duration_band(45.0, &config), DurationBand::Appropriate);
        assert_eq!(duration_band(90.0, &config), DurationBand::Detailed);
        assert_eq!(duration_band(200.0, &config), DurationBand::VeryDetailed);
    }
}
