use serde::{Deserialize, Serialize};

use crate::analysis::timing::div_or_default;
use crate::engine::config::PauseConfig;
use crate::engine::error::EvaluationError;
use crate::engine::TIMING_EPSILON;

/// One contiguous interval of detected speech, in seconds relative to the
/// response start. Intervals are half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechSpan {
    pub start: f64,
    pub end: f64,
}

impl SpeechSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A silence interval derived from the gap between consecutive speech spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseSegment {
    pub start: f64,
    pub end: f64,
}

impl PauseSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Qualitative banding of a pause profile by average pause duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausePattern {
    QuickNatural,
    Moderate,
    LongHesitation,
    Extended,
}

impl PausePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            PausePattern::QuickNatural => "quick_natural",
            PausePattern::Moderate => "moderate",
            PausePattern::LongHesitation => "long_hesitation",
            PausePattern::Extended => "extended",
        }
    }
}

/// Pause and silence statistics for one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseAnalysis {
    /// Pause segments ordered by start time; segments never overlap.
    pub segments: Vec<PauseSegment>,
    pub pause_count: usize,
    /// Arithmetic mean over all pause segments; 0 when there are none.
    pub average_pause_secs: f64,
    pub max_pause_secs: f64,
    /// Pauses strictly longer than the significant-pause threshold.
    pub significant_pauses: usize,
    pub speech_secs: f64,
    pub silence_secs: f64,
    /// Speech share of the response, always within [0, 1].
    pub speech_ratio: f64,
    pub pattern: PausePattern,
}

/// Derives pause segments and silence statistics from the ordered speech
/// spans of one response.
///
/// Gaps shorter than the configured minimum are not recorded as pauses but
/// still count toward silence time. Gaps before the first span and after
/// the last are excluded unless `count_edge_pauses` is set.
pub fn analyze(
    spans: &[SpeechSpan],
    response_secs: f64,
    config: &PauseConfig,
) -> Result<PauseAnalysis, EvaluationError> {
    if !response_secs.is_finite() || response_secs < 0.0 {
        return Err(EvaluationError::InvalidDuration {
            seconds: response_secs,
        });
    }

    let mut speech_secs = 0.0;
    let mut previous_end = f64::NEG_INFINITY;
    for (index, span) in spans.iter().enumerate() {
        if !span.start.is_finite() || !span.end.is_finite() {
            return Err(EvaluationError::NonFiniteSpan {
                index,
                start: span.start,
                end: span.end,
            });
        }
        if span.end < span.start - TIMING_EPSILON {
            return Err(EvaluationError::NegativeSpan {
                index,
                start: span.start,
                end: span.end,
            });
        }
        if index > 0 && span.start < previous_end - TIMING_EPSILON {
            return Err(EvaluationError::OverlappingSpans {
                index,
                start: span.start,
                previous_end,
            });
        }
        previous_end = span.end;
        speech_secs += span.duration();
    }

    if speech_secs > response_secs + TIMING_EPSILON {
        return Err(EvaluationError::SpeechExceedsDuration {
            speech_secs,
            response_secs,
        });
    }

    let mut segments = Vec::new();
    let record_gap = |start: f64, end: f64, segments: &mut Vec<PauseSegment>| {
        if end - start >= config.min_pause_secs {
            segments.push(PauseSegment { start, end });
        }
    };

    if config.count_edge_pauses {
        if let Some(first) = spans.first() {
            record_gap(0.0, first.start, &mut segments);
        }
    }
    for window in spans.windows(2) {
        record_gap(window[0].end, window[1].start, &mut segments);
    }
    if config.count_edge_pauses {
        if let Some(last) = spans.last() {
            record_gap(last.end, response_secs, &mut segments);
        }
    }

    let pause_count = segments.len();
    let total_pause_secs: f64 = segments.iter().map(PauseSegment::duration).sum();
    let average_pause_secs = div_or_default(total_pause_secs, pause_count as f64);
    let max_pause_secs = segments
        .iter()
        .map(PauseSegment::duration)
        .fold(0.0, f64::max);
    let significant_pauses = segments
        .iter()
        .filter(|segment| segment.duration() > config.significant_pause_secs)
        .count();

    let silence_secs = (response_secs - speech_secs).max(0.0);
    let speech_ratio = div_or_default(speech_secs, response_secs).clamp(0.0, 1.0);

    Ok(PauseAnalysis {
        pattern: pattern_for(average_pause_secs, config),
        segments,
        pause_count,
        average_pause_secs,
        max_pause_secs,
        significant_pauses,
        speech_secs,
        silence_secs,
        speech_ratio,
    })
}

/// Bands an average pause duration against the configured thresholds.
pub fn pattern_for(average_pause_secs: f64, config: &PauseConfig) -> PausePattern {
    if average_pause_secs < config.quick_avg_max_secs {
        PausePattern::QuickNatural
    } else if average_pause_secs < config.moderate_avg_max_secs {
        PausePattern::Moderate
    } else if average_pause_secs < config.extended_avg_min_secs {
        PausePattern::LongHesitation
    } else {
        PausePattern::Extended
    }
}
