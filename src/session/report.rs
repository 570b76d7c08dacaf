use serde::{Deserialize, Serialize};

use crate::analysis::fillers::{CategoryCounts, FillerCategory};
use crate::analysis::pauses::{self, PausePattern, PauseSegment};
use crate::analysis::scoring::{self, FluencyBand};
use crate::analysis::timing::{self, ConfidenceTier, PaceBand};
use crate::engine::config::{EngineConfig, PauseConfig};
use crate::engine::types::QuestionEvaluation;

/// Session identity supplied by the interviewing collaborator. The start
/// timestamp arrives as epoch milliseconds, keeping aggregation a pure
/// function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub candidate_id: String,
    pub started_at_ms: i64,
}

/// Outcome slot for one question: a finished evaluation, or the error that
/// aborted it. Invalid slots stay in the report but are excluded from every
/// aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionOutcome {
    Scored(QuestionEvaluation),
    Invalid { error: String },
}

/// One question's slot in the session, keyed by its position in the
/// interview script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub index: usize,
    pub question: String,
    pub outcome: QuestionOutcome,
}

impl QuestionRecord {
    pub fn evaluation(&self) -> Option<&QuestionEvaluation> {
        match &self.outcome {
            QuestionOutcome::Scored(evaluation) => Some(evaluation),
            QuestionOutcome::Invalid { .. } => None,
        }
    }
}

/// One category's slice of the session filler breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: FillerCategory,
    pub count: usize,
    /// Share of all detected fillers; shares sum to 100.
    pub share_percent: f64,
}

/// Questions per confidence tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceTally {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ConfidenceTally {
    pub fn add(&mut self, tier: ConfidenceTier) {
        match tier {
            ConfidenceTier::High => self.high += 1,
            ConfidenceTier::Medium => self.medium += 1,
            ConfidenceTier::Low => self.low += 1,
        }
    }
}

/// Sum-based session totals over all validly scored questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub total_words: usize,
    pub total_fillers: usize,
    /// Fillers per hundred words; 0 when no words were spoken.
    pub filler_percentage: f64,
    pub total_pauses: usize,
    pub significant_pauses: usize,
    pub total_pause_secs: f64,
    pub speech_secs: f64,
    pub silence_secs: f64,
    /// Speech share of the total recorded time, as a percentage.
    pub speech_percentage: f64,
}

/// Banding of how often the candidate paused, per answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseFrequency {
    Smooth,
    Occasional,
    Frequent,
    VeryHesitant,
}

impl PauseFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PauseFrequency::Smooth => "smooth",
            PauseFrequency::Occasional => "occasional",
            PauseFrequency::Frequent => "frequent",
            PauseFrequency::VeryHesitant => "very_hesitant",
        }
    }
}

/// Terminal artifact of a scored session, handed to the presentation
/// layer. Plain structured data: counts, scores, and bands only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub candidate_id: String,
    pub started_at_ms: i64,
    /// Per-question slots ordered by question index.
    pub questions: Vec<QuestionRecord>,
    pub answered_questions: usize,
    pub invalid_questions: usize,
    pub totals: SessionTotals,
    /// Empty when no fillers were detected across the session.
    pub category_breakdown: Vec<CategoryShare>,
    /// Mean over questions with a measured rate; 0 when there are none.
    pub average_words_per_minute: f64,
    pub pace_band: Option<PaceBand>,
    pub pause_pattern: Option<PausePattern>,
    pub pause_frequency: Option<PauseFrequency>,
    pub confidence_tally: ConfidenceTally,
    /// Mean of the per-question scores, so every question weighs equally
    /// regardless of answer length.
    pub base_score: f64,
    pub adjusted_score: f64,
    pub fluency_band: Option<FluencyBand>,
}

/// Stateless fold of per-question records into the session report.
pub struct SessionAggregator<'a> {
    config: &'a EngineConfig,
}

impl<'a> SessionAggregator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        context: &SessionContext,
        mut records: Vec<QuestionRecord>,
    ) -> SessionReport {
        // Stitch strictly by question index; completion order must never
        // leak into the report.
        records.sort_by_key(|record| record.index);

        let mut answered = 0_usize;
        let mut total_words = 0_usize;
        let mut category_counts = CategoryCounts::default();
        let mut total_pauses = 0_usize;
        let mut significant_pauses = 0_usize;
        let mut total_pause_secs = 0.0;
        let mut speech_secs = 0.0;
        let mut silence_secs = 0.0;
        let mut base_sum = 0.0;
        let mut adjusted_sum = 0.0;
        let mut rates: Vec<f64> = Vec::new();
        let mut confidence_tally = ConfidenceTally::default();

        for record in &records {
            let Some(evaluation) = record.evaluation() else {
                continue;
            };
            answered += 1;
            total_words += evaluation.fillers.word_count;
            category_counts.merge(&evaluation.fillers.counts);
            total_pauses += evaluation.pauses.pause_count;
            significant_pauses += evaluation.pauses.significant_pauses;
            total_pause_secs += evaluation
                .pauses
                .segments
                .iter()
                .map(PauseSegment::duration)
                .sum::<f64>();
            speech_secs += evaluation.pauses.speech_secs;
            silence_secs += evaluation.pauses.silence_secs;
            base_sum += evaluation.scores.base_score;
            adjusted_sum += evaluation.scores.adjusted_score;
            if evaluation.words_per_minute > 0.0 {
                rates.push(evaluation.words_per_minute);
            }
            confidence_tally.add(evaluation.confidence);
        }

        let invalid_questions = records.len() - answered;
        let total_fillers = category_counts.total();

        let category_breakdown = if total_fillers > 0 {
            category_counts
                .entries()
                .iter()
                .filter(|(_, count)| *count > 0)
                .map(|(category, count)| CategoryShare {
                    category: *category,
                    count: *count,
                    share_percent: *count as f64 * 100.0 / total_fillers as f64,
                })
                .collect()
        } else {
            Vec::new()
        };

        let average_words_per_minute =
            timing::div_or_default(rates.iter().sum::<f64>(), rates.len() as f64);

        let (base_score, adjusted_score, fluency_band) = if answered > 0 {
            let base = scoring::round_tenth(base_sum / answered as f64);
            let adjusted = scoring::round_tenth(adjusted_sum / answered as f64);
            let band = scoring::fluency_band(adjusted, &self.config.scoring);
            (base, adjusted, Some(band))
        } else {
            (0.0, 0.0, None)
        };

        let pause_pattern = (total_pauses > 0).then(|| {
            pauses::pattern_for(total_pause_secs / total_pauses as f64, &self.config.pauses)
        });
        let pause_frequency = (answered > 0).then(|| {
            frequency_for(total_pauses as f64 / answered as f64, &self.config.pauses)
        });

        SessionReport {
            candidate_id: context.candidate_id.clone(),
            started_at_ms: context.started_at_ms,
            answered_questions: answered,
            invalid_questions,
            totals: SessionTotals {
                total_words,
                total_fillers,
                filler_percentage: timing::div_or_default(
                    total_fillers as f64 * 100.0,
                    total_words as f64,
                ),
                total_pauses,
                significant_pauses,
                total_pause_secs,
                speech_secs,
                silence_secs,
                speech_percentage: timing::div_or_default(
                    speech_secs * 100.0,
                    speech_secs + silence_secs,
                ),
            },
            category_breakdown,
            average_words_per_minute,
            pace_band: timing::pace_band(average_words_per_minute, &self.config.pace),
            pause_pattern,
            pause_frequency,
            confidence_tally,
            base_score,
            adjusted_score,
            fluency_band,
            questions: records,
        }
    }
}

fn frequency_for(pauses_per_question: f64, config: &PauseConfig) -> PauseFrequency {
    if pauses_per_question < config.smooth_max_per_question {
        PauseFrequency::Smooth
    } else if pauses_per_question < config.occasional_max_per_question {
        PauseFrequency::Occasional
    } else if pauses_per_question < config.frequent_max_per_question {
        PauseFrequency::Frequent
    } else {
        PauseFrequency::VeryHesitant
    }
}
