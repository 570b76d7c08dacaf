//! Leaf speech-analysis computations: filler classification, pause and
//! silence statistics, rate/timing derivation, and fluency scoring.

pub mod fillers;
pub mod pauses;
pub mod scoring;
pub mod timing;

pub use fillers::{
    CategoryCounts, FillerAnalysis, FillerCategory, FillerLexicon, FillerOccurrence,
};
pub use pauses::{PauseAnalysis, PausePattern, PauseSegment, SpeechSpan};
pub use scoring::{FluencyBand, ScoreBreakdown};
pub use timing::{ConfidenceTier, DurationBand, PaceBand};
