use thiserror::Error;

/// Failures that abort a single question's evaluation. The session keeps
/// going; the failed question's slot is marked invalid in the report and
/// excluded from every aggregate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("speech span {index} ends before it starts ({start}s..{end}s)")]
    NegativeSpan { index: usize, start: f64, end: f64 },
    #[error("speech span {index} contains a non-finite timestamp ({start}s..{end}s)")]
    NonFiniteSpan { index: usize, start: f64, end: f64 },
    #[error(
        "speech span {index} starts at {start}s before the previous span ended at {previous_end}s"
    )]
    OverlappingSpans {
        index: usize,
        start: f64,
        previous_end: f64,
    },
    #[error("speech time {speech_secs}s exceeds the response duration {response_secs}s")]
    SpeechExceedsDuration {
        speech_secs: f64,
        response_secs: f64,
    },
    #[error("response duration must be finite and non-negative (got {seconds}s)")]
    InvalidDuration { seconds: f64 },
    #[error("response latency must be finite and non-negative (got {seconds}s)")]
    InvalidLatency { seconds: f64 },
}

/// Rejected engine configuration. Detected once at construction time and
/// fatal to building the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{lower} ({lower_value}) must stay below {upper} ({upper_value})")]
    InvertedRange {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },
}
