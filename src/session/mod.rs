//! Session-level scoring: concurrent question evaluation, aggregation, and
//! the handoff to the presentation layer.

pub mod publisher;
pub mod report;

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::engine::{
    ConfigError, EngineConfig, EvaluationError, FluencyEngine, QuestionEvaluation, QuestionInput,
};
use crate::session::publisher::{ReportPublisher, TracingReportPublisher};
use crate::session::report::{
    QuestionOutcome, QuestionRecord, SessionAggregator, SessionContext, SessionReport,
};
use crate::telemetry::events::{
    record_question_invalid, record_question_scored, record_session_report,
};

/// Scores a full interview session. Each question is an independent pure
/// computation, so evaluations run on their own tasks; records are stitched
/// strictly by question index before the aggregation fold, so arrival order
/// never affects the report.
pub struct SessionScorer {
    engine: Arc<FluencyEngine>,
    publisher: Arc<dyn ReportPublisher>,
}

impl SessionScorer {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let engine = FluencyEngine::new(config)?;
        Ok(Self::with_publisher(
            engine,
            Arc::new(TracingReportPublisher),
        ))
    }

    pub fn with_publisher(engine: FluencyEngine, publisher: Arc<dyn ReportPublisher>) -> Self {
        Self {
            engine: Arc::new(engine),
            publisher,
        }
    }

    pub fn engine(&self) -> &FluencyEngine {
        &self.engine
    }

    /// Evaluates every question and folds the outcomes into one report. A
    /// malformed question does not abort the session: its slot is marked
    /// invalid and excluded from the aggregates.
    pub async fn score_session(
        &self,
        context: SessionContext,
        questions: Vec<QuestionInput>,
    ) -> SessionReport {
        type EvaluationHandle = JoinHandle<Result<QuestionEvaluation, EvaluationError>>;

        let mut handles: Vec<(usize, String, EvaluationHandle)> = Vec::new();
        for (index, input) in questions.into_iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let question = input.question.clone();
            let handle = tokio::spawn(async move { engine.evaluate_question(&input) });
            handles.push((index, question, handle));
        }

        let mut records = Vec::with_capacity(handles.len());
        for (index, question, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(evaluation)) => {
                    record_question_scored(index, &evaluation);
                    QuestionOutcome::Scored(evaluation)
                }
                Ok(Err(err)) => {
                    warn!(
                        target: "session_scorer",
                        index,
                        %err,
                        "question evaluation failed"
                    );
                    record_question_invalid(index, &err.to_string());
                    QuestionOutcome::Invalid {
                        error: err.to_string(),
                    }
                }
                Err(err) => {
                    warn!(
                        target: "session_scorer",
                        index,
                        %err,
                        "question evaluation task aborted"
                    );
                    let error = format!("evaluation task aborted: {err}");
                    record_question_invalid(index, &error);
                    QuestionOutcome::Invalid { error }
                }
            };
            records.push(QuestionRecord {
                index,
                question,
                outcome,
            });
        }

        let report = SessionAggregator::new(self.engine.config()).aggregate(&context, records);
        record_session_report(&report);
        report
    }

    /// Hands a finished report to the presentation layer.
    pub async fn publish_report(&self, report: &SessionReport) -> Result<()> {
        self.publisher
            .publish(report)
            .await
            .map_err(|err| anyhow::anyhow!("failed to publish session report: {err}"))
    }
}

#[cfg(test)]
mod tests;
