use serde::{Deserialize, Serialize};

use crate::analysis::fillers::FillerAnalysis;
use crate::analysis::pauses::{PauseAnalysis, SpeechSpan};
use crate::analysis::scoring::{FluencyBand, ScoreBreakdown};
use crate::analysis::timing::{ConfidenceTier, DurationBand, PaceBand};

/// Finalized inputs for one answered question, produced by the capture and
/// transcription collaborators before the engine is invoked. Timestamps are
/// seconds relative to the response start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub question: String,
    pub transcript: String,
    /// Ordered, non-overlapping speech intervals within the response.
    pub speech_spans: Vec<SpeechSpan>,
    /// Total length of the recorded response.
    pub response_secs: f64,
    /// Seconds from the end of the question prompt to the first detected
    /// speech.
    pub response_latency_secs: f64,
}

/// Immutable fluency assessment for one answered question. Produced once by
/// the engine and owned by the session report afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEvaluation {
    pub question: String,
    pub transcript: String,
    pub fillers: FillerAnalysis,
    pub pauses: PauseAnalysis,
    pub words_per_minute: f64,
    /// None when the rate is unmeasured (no speech detected).
    pub pace_band: Option<PaceBand>,
    pub response_secs: f64,
    pub duration_band: DurationBand,
    pub response_latency_secs: f64,
    pub confidence: ConfidenceTier,
    pub scores: ScoreBreakdown,
    pub fluency_band: FluencyBand,
}
