use serde::{Deserialize, Serialize};

use crate::engine::error::ConfigError;

/// All policy thresholds of the scoring engine, injected at construction.
/// Defaults carry the calibrated production values; `validate` runs once
/// when the engine is built so a malformed config can never surface
/// mid-session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub pauses: PauseConfig,
    pub pace: PaceConfig,
    pub confidence: ConfidenceConfig,
    pub durations: DurationConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.pauses.validate()?;
        self.pace.validate()?;
        self.confidence.validate()?;
        self.durations.validate()
    }
}

/// Weights, caps, and band thresholds of the fluency scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Sensitivity of the base score to filler density.
    pub filler_weight: f64,
    pub silence_penalty_weight: f64,
    pub silence_penalty_cap: f64,
    /// Deduction per significant pause.
    pub significant_pause_penalty: f64,
    pub pause_penalty_cap: f64,
    pub excellent_min_score: f64,
    pub good_min_score: f64,
    pub fair_min_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            filler_weight: 1.5,
            silence_penalty_weight: 30.0,
            silence_penalty_cap: 20.0,
            significant_pause_penalty: 5.0,
            pause_penalty_cap: 15.0,
            excellent_min_score: 80.0,
            good_min_score: 60.0,
            fair_min_score: 40.0,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        finite_non_negative("filler_weight", self.filler_weight)?;
        finite_non_negative("silence_penalty_weight", self.silence_penalty_weight)?;
        finite_non_negative("silence_penalty_cap", self.silence_penalty_cap)?;
        finite_non_negative("significant_pause_penalty", self.significant_pause_penalty)?;
        finite_non_negative("pause_penalty_cap", self.pause_penalty_cap)?;
        ordered("fair_min_score", self.fair_min_score, "good_min_score", self.good_min_score)?;
        ordered(
            "good_min_score",
            self.good_min_score,
            "excellent_min_score",
            self.excellent_min_score,
        )
    }
}

/// Pause detection thresholds and pause-pattern bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseConfig {
    /// Inter-span gaps shorter than this are not recorded as pauses.
    pub min_pause_secs: f64,
    /// A pause is significant when strictly longer than this.
    pub significant_pause_secs: f64,
    /// Include the gaps before the first speech span and after the last.
    pub count_edge_pauses: bool,
    pub quick_avg_max_secs: f64,
    pub moderate_avg_max_secs: f64,
    pub extended_avg_min_secs: f64,
    pub smooth_max_per_question: f64,
    pub occasional_max_per_question: f64,
    pub frequent_max_per_question: f64,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            min_pause_secs: 0.5,
            significant_pause_secs: 2.0,
            count_edge_pauses: false,
            quick_avg_max_secs: 1.0,
            moderate_avg_max_secs: 2.0,
            extended_avg_min_secs: 3.0,
            smooth_max_per_question: 2.0,
            occasional_max_per_question: 4.0,
            frequent_max_per_question: 6.0,
        }
    }
}

impl PauseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        finite_non_negative("min_pause_secs", self.min_pause_secs)?;
        ordered(
            "min_pause_secs",
            self.min_pause_secs,
            "significant_pause_secs",
            self.significant_pause_secs,
        )?;
        ordered(
            "quick_avg_max_secs",
            self.quick_avg_max_secs,
            "moderate_avg_max_secs",
            self.moderate_avg_max_secs,
        )?;
        ordered(
            "moderate_avg_max_secs",
            self.moderate_avg_max_secs,
            "extended_avg_min_secs",
            self.extended_avg_min_secs,
        )?;
        ordered(
            "smooth_max_per_question",
            self.smooth_max_per_question,
            "occasional_max_per_question",
            self.occasional_max_per_question,
        )?;
        ordered(
            "occasional_max_per_question",
            self.occasional_max_per_question,
            "frequent_max_per_question",
            self.frequent_max_per_question,
        )
    }
}

/// Speech-pace bands and the rate penalty shape. The qualitative band and
/// the penalty use distinct ranges: a rate can sit outside the optimal
/// band without being penalized yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceConfig {
    pub optimal_min_wpm: f64,
    pub optimal_max_wpm: f64,
    /// Rates below this start accruing the slow-speech penalty.
    pub penalty_floor_wpm: f64,
    /// Rates above this start accruing the fast-speech penalty.
    pub penalty_ceiling_wpm: f64,
    pub slow_penalty_divisor: f64,
    pub fast_penalty_divisor: f64,
    pub rate_penalty_cap: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            optimal_min_wpm: 120.0,
            optimal_max_wpm: 180.0,
            penalty_floor_wpm: 100.0,
            penalty_ceiling_wpm: 200.0,
            slow_penalty_divisor: 10.0,
            fast_penalty_divisor: 20.0,
            rate_penalty_cap: 10.0,
        }
    }
}

impl PaceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ordered(
            "optimal_min_wpm",
            self.optimal_min_wpm,
            "optimal_max_wpm",
            self.optimal_max_wpm,
        )?;
        ordered(
            "penalty_floor_wpm",
            self.penalty_floor_wpm,
            "penalty_ceiling_wpm",
            self.penalty_ceiling_wpm,
        )?;
        positive("slow_penalty_divisor", self.slow_penalty_divisor)?;
        positive("fast_penalty_divisor", self.fast_penalty_divisor)?;
        finite_non_negative("rate_penalty_cap", self.rate_penalty_cap)
    }
}

/// Latency cut-offs for the confidence tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    pub high_max_latency_secs: f64,
    pub medium_max_latency_secs: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            high_max_latency_secs: 10.0,
            medium_max_latency_secs: 20.0,
        }
    }
}

impl ConfidenceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        finite_non_negative("high_max_latency_secs", self.high_max_latency_secs)?;
        ordered(
            "high_max_latency_secs",
            self.high_max_latency_secs,
            "medium_max_latency_secs",
            self.medium_max_latency_secs,
        )
    }
}

/// Answer-length bands over the total response duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationConfig {
    pub very_brief_max_secs: f64,
    pub brief_max_secs: f64,
    pub appropriate_max_secs: f64,
    pub detailed_max_secs: f64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            very_brief_max_secs: 15.0,
            brief_max_secs: 30.0,
            appropriate_max_secs: 60.0,
            detailed_max_secs: 120.0,
        }
    }
}

impl DurationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        finite_non_negative("very_brief_max_secs", self.very_brief_max_secs)?;
        ordered(
            "very_brief_max_secs",
            self.very_brief_max_secs,
            "brief_max_secs",
            self.brief_max_secs,
        )?;
        ordered(
            "brief_max_secs",
            self.brief_max_secs,
            "appropriate_max_secs",
            self.appropriate_max_secs,
        )?;
        ordered(
            "appropriate_max_secs",
            self.appropriate_max_secs,
            "detailed_max_secs",
            self.detailed_max_secs,
        )
    }
}

fn finite_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn ordered(
    lower: &'static str,
    lower_value: f64,
    upper: &'static str,
    upper_value: f64,
) -> Result<(), ConfigError> {
    finite_non_negative(lower, lower_value)?;
    finite_non_negative(upper, upper_value)?;
    if lower_value < upper_value {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            lower,
            lower_value,
            upper,
            upper_value,
        })
    }
}
