use serde::Serialize;
use tracing::{info, warn};

use crate::engine::types::QuestionEvaluation;
use crate::session::report::SessionReport;

pub(crate) const TARGET: &str = "telemetry::scoring";
pub(crate) const EVENT_QUESTION_SCORED: &str = "question_scored";
pub(crate) const EVENT_QUESTION_INVALID: &str = "question_invalid";
pub(crate) const EVENT_SESSION_REPORT: &str = "session_report";

#[derive(Debug, Serialize)]
pub struct QuestionScoredEvent {
    pub index: usize,
    pub word_count: usize,
    pub total_fillers: usize,
    pub base_score: f64,
    pub adjusted_score: f64,
    pub confidence: &'static str,
}

pub fn record_question_scored(index: usize, evaluation: &QuestionEvaluation) {
    let event = QuestionScoredEvent {
        index,
        word_count: evaluation.fillers.word_count,
        total_fillers: evaluation.fillers.total_fillers,
        base_score: evaluation.scores.base_score,
        adjusted_score: evaluation.scores.adjusted_score,
        confidence: evaluation.confidence.as_str(),
    };

    match serde_json::to_string(&event) {
        Ok(payload) => info!(
            target: TARGET,
            event = EVENT_QUESTION_SCORED,
            index = event.index,
            word_count = event.word_count,
            total_fillers = event.total_fillers,
            base_score = event.base_score,
            adjusted_score = event.adjusted_score,
            confidence = event.confidence,
            payload = %payload
        ),
        Err(err) => warn!(
            target: TARGET,
            event = EVENT_QUESTION_SCORED,
            %err,
            "failed to encode question scored event"
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionInvalidEvent {
    pub index: usize,
    pub error: String,
}

pub fn record_question_invalid(index: usize, error: &str) {
    let event = QuestionInvalidEvent {
        index,
        error: error.to_string(),
    };

    match serde_json::to_string(&event) {
        Ok(payload) => info!(
            target: TARGET,
            event = EVENT_QUESTION_INVALID,
            index = event.index,
            error = %event.error,
            payload = %payload
        ),
        Err(err) => warn!(
            target: TARGET,
            event = EVENT_QUESTION_INVALID,
            %err,
            "failed to encode question invalid event"
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct SessionReportEvent {
    pub candidate_id: String,
    pub questions: usize,
    pub invalid_questions: usize,
    pub base_score: f64,
    pub adjusted_score: f64,
    pub fluency_band: Option<&'static str>,
}

pub fn record_session_report(report: &SessionReport) {
    let event = SessionReportEvent {
        candidate_id: report.candidate_id.clone(),
        questions: report.questions.len(),
        invalid_questions: report.invalid_questions,
        base_score: report.base_score,
        adjusted_score: report.adjusted_score,
        fluency_band: report.fluency_band.map(|band| band.as_str()),
    };

    match serde_json::to_string(&event) {
        Ok(payload) => info!(
            target: TARGET,
            event = EVENT_SESSION_REPORT,
            candidate_id = %event.candidate_id,
            questions = event.questions,
            invalid_questions = event.invalid_questions,
            base_score = event.base_score,
            adjusted_score = event.adjusted_score,
            payload = %payload
        ),
        Err(err) => warn!(
            target: TARGET,
            event = EVENT_SESSION_REPORT,
            %err,
            "failed to encode session report event"
        ),
    }
}
