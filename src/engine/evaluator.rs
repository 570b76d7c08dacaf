use tracing::debug;

use crate::analysis::fillers::FillerLexicon;
use crate::analysis::{pauses, scoring, timing};
use crate::engine::config::EngineConfig;
use crate::engine::error::{ConfigError, EvaluationError};
use crate::engine::types::{QuestionEvaluation, QuestionInput};

/// Per-question scoring pipeline: filler classification, pause analysis,
/// rate derivation, fluency scoring, confidence bucketing. Pure over its
/// inputs; re-evaluating the same input always yields an identical record.
pub struct FluencyEngine {
    config: EngineConfig,
    lexicon: FillerLexicon,
}

impl FluencyEngine {
    /// Builds an engine, rejecting a malformed configuration up front so no
    /// threshold error can surface mid-session.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_lexicon(config, FillerLexicon::default())
    }

    pub fn with_lexicon(
        config: EngineConfig,
        lexicon: FillerLexicon,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, lexicon })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates one answered question.
    pub fn evaluate_question(
        &self,
        input: &QuestionInput,
    ) -> Result<QuestionEvaluation, EvaluationError> {
        let fillers = self.lexicon.classify(&input.transcript);
        let pauses = pauses::analyze(
            &input.speech_spans,
            input.response_secs,
            &self.config.pauses,
        )?;

        let words_per_minute = timing::words_per_minute(fillers.word_count, pauses.speech_secs);
        let scores = scoring::score_fluency(
            fillers.filler_ratio,
            words_per_minute,
            pauses.speech_ratio,
            pauses.significant_pauses,
            &self.config.scoring,
            &self.config.pace,
        );
        let confidence =
            timing::classify_confidence(input.response_latency_secs, &self.config.confidence)?;

        debug!(
            target: "fluency_engine",
            word_count = fillers.word_count,
            total_fillers = fillers.total_fillers,
            base_score = scores.base_score,
            adjusted_score = scores.adjusted_score,
            confidence = confidence.as_str(),
            "question evaluated"
        );

        Ok(QuestionEvaluation {
            question: input.question.clone(),
            transcript: input.transcript.clone(),
            pace_band: timing::pace_band(words_per_minute, &self.config.pace),
            duration_band: timing::duration_band(input.response_secs, &self.config.durations),
            fluency_band: scoring::fluency_band(scores.adjusted_score, &self.config.scoring),
            fillers,
            pauses,
            words_per_minute,
            response_secs: input.response_secs,
            response_latency_secs: input.response_latency_secs,
            confidence,
            scores,
        })
    }
}
