use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::session::report::SessionReport;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to encode session report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("presentation layer rejected the report: {reason}")]
    Rejected { reason: String },
}

/// Seam between the scoring engine and the presentation layer. The engine
/// hands over the finished report; rendering and persistence happen on the
/// other side of this trait.
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    async fn publish(&self, report: &SessionReport) -> Result<(), PublishError>;
}

/// Default publisher: emits the serialized report as a structured tracing
/// event and leaves rendering to whichever subscriber is attached.
#[derive(Debug, Default)]
pub struct TracingReportPublisher;

#[async_trait]
impl ReportPublisher for TracingReportPublisher {
    async fn publish(&self, report: &SessionReport) -> Result<(), PublishError> {
        let payload = serde_json::to_string(report)?;
        info!(
            target: "session_scorer",
            candidate_id = %report.candidate_id,
            questions = report.questions.len(),
            invalid_questions = report.invalid_questions,
            adjusted_score = report.adjusted_score,
            payload = %payload,
            "session report ready"
        );
        Ok(())
    }
}
