use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;

use crate::analysis::pauses::SpeechSpan;
use crate::engine::{EngineConfig, FluencyEngine, QuestionInput};
use crate::session::publisher::{PublishError, ReportPublisher};
use crate::session::report::{
    QuestionOutcome, QuestionRecord, SessionAggregator, SessionContext, SessionReport,
};
use crate::session::SessionScorer;

fn context() -> SessionContext {
    SessionContext {
        candidate_id: "candidate-7".to_string(),
        started_at_ms: 1_700_000_000_000,
    }
}

fn engine() -> FluencyEngine {
    FluencyEngine::new(EngineConfig::default()).expect("default config is valid")
}

fn input(
    question: &str,
    transcript: &str,
    spans: &[(f64, f64)],
    response_secs: f64,
    latency_secs: f64,
) -> QuestionInput {
    QuestionInput {
        question: question.to_string(),
        transcript: transcript.to_string(),
        speech_spans: spans
            .iter()
            .map(|(start, end)| SpeechSpan::new(*start, *end))
            .collect(),
        response_secs,
        response_latency_secs: latency_secs,
    }
}

fn scored_record(index: usize, input: &QuestionInput, engine: &FluencyEngine) -> QuestionRecord {
    QuestionRecord {
        index,
        question: input.question.clone(),
        outcome: QuestionOutcome::Scored(
            engine.evaluate_question(input).expect("evaluation succeeds"),
        ),
    }
}

const CLEAN_FORTY_WORDS: &str = "we shipped the feature on time and the tests passed \
                                 we shipped the feature on time and the tests passed \
                                 we shipped the feature on time and the tests passed \
                                 we shipped the feature on time and the tests passed";

#[test]
fn aggregates_totals_and_category_shares() {
    let engine = engine();
    let records = vec![
        scored_record(
            0,
            &input("Q1", "um the rollout went fine you know", &[(0.0, 3.0)], 3.0, 1.0),
            &engine,
        ),
        scored_record(
            1,
            &input("Q2", "we shipped it basically on schedule", &[(0.0, 2.5)], 3.0, 12.0),
            &engine,
        ),
    ];

    let report = SessionAggregator::new(engine.config()).aggregate(&context(), records);

    assert_eq!(report.answered_questions, 2);
    assert_eq!(report.totals.total_words, 13);
    assert_eq!(report.totals.total_fillers, 3);
    assert!((report.totals.filler_percentage - 3.0 / 13.0 * 100.0).abs() < 1e-9);

    assert_eq!(report.category_breakdown.len(), 3);
    let share_sum: f64 = report
        .category_breakdown
        .iter()
        .map(|share| share.share_percent)
        .sum();
    assert!(
        (share_sum - 100.0).abs() < 1e-9,
        "category shares must sum to 100, got {share_sum}"
    );

    assert_eq!(report.confidence_tally.high, 1);
    assert_eq!(report.confidence_tally.medium, 1);
    assert_eq!(report.confidence_tally.low, 0);
}

#[tokio::test]
async fn invalid_question_keeps_its_slot_but_not_its_weight() {
    let scorer = SessionScorer::new(EngineConfig::default()).expect("valid config");
    let questions = vec![
        input("Q1", "the demo went fine", &[(0.0, 2.0)], 2.0, 1.0),
        input("Q2", "irrelevant", &[(0.0, 1.0)], 1.0, -1.0),
    ];

    let report = scorer.score_session(context(), questions).await;

    assert_eq!(report.questions.len(), 2, "the invalid slot must be present");
    assert_eq!(report.answered_questions, 1);
    assert_eq!(report.invalid_questions, 1);

    match &report.questions[1].outcome {
        QuestionOutcome::Invalid { error } => {
            assert!(error.contains("latency"), "unexpected error text: {error}")
        }
        QuestionOutcome::Scored(_) => panic!("invalid question must not score"),
    }

    // The invalid question contributes to neither numerator nor denominator.
    assert_eq!(report.totals.total_words, 4);
    assert_eq!(report.base_score, 100.0);
    assert_eq!(report.confidence_tally.high, 1);
    assert_eq!(
        report.confidence_tally.high
            + report.confidence_tally.medium
            + report.confidence_tally.low,
        1
    );
}

#[test]
fn records_are_stitched_by_index_not_arrival_order() {
    let engine = engine();
    let first = scored_record(
        0,
        &input("Q1", "the demo went fine", &[(0.0, 2.0)], 2.0, 1.0),
        &engine,
    );
    let second = scored_record(
        1,
        &input("Q2", CLEAN_FORTY_WORDS, &[(0.0, 16.0)], 16.0, 2.0),
        &engine,
    );
    let third = scored_record(
        2,
        &input("Q3", "um right okay", &[(0.0, 1.5)], 1.5, 3.0),
        &engine,
    );

    let aggregator = SessionAggregator::new(engine.config());
    let in_order = aggregator.aggregate(
        &context(),
        vec![first.clone(), second.clone(), third.clone()],
    );
    let shuffled = aggregator.aggregate(&context(), vec![third, first, second]);

    assert_eq!(in_order, shuffled, "arrival order must not leak into the report");
    let indices: Vec<usize> = in_order.questions.iter().map(|record| record.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn session_scores_average_per_question_not_per_word() {
    let engine = engine();
    let records = vec![
        scored_record(0, &input("Q1", "um um um um", &[(0.0, 2.0)], 2.0, 1.0), &engine),
        scored_record(
            1,
            &input("Q2", CLEAN_FORTY_WORDS, &[(0.0, 16.0)], 16.0, 1.0),
            &engine,
        ),
    ];

    let report = SessionAggregator::new(engine.config()).aggregate(&context(), records);

    // Question scores are 0 and 100; a word-weighted recomputation over the
    // session totals (4 fillers in 44 words) would land far from 50.
    assert_eq!(report.base_score, 50.0);
    assert_eq!(report.adjusted_score, 50.0);
}

#[test]
fn average_rate_covers_only_measured_questions() {
    let engine = engine();
    let records = vec![
        scored_record(
            0,
            &input("Q1", CLEAN_FORTY_WORDS, &[(0.0, 16.0)], 16.0, 1.0),
            &engine,
        ),
        scored_record(1, &input("Q2", "hello there", &[], 5.0, 1.0), &engine),
    ];

    let report = SessionAggregator::new(engine.config()).aggregate(&context(), records);

    assert!(
        (report.average_words_per_minute - 150.0).abs() < 1e-9,
        "unmeasured rates must not drag the average down"
    );
}

#[test]
fn empty_session_produces_an_empty_report() {
    let engine = engine();
    let report = SessionAggregator::new(engine.config()).aggregate(&context(), Vec::new());

    assert_eq!(report.answered_questions, 0);
    assert_eq!(report.invalid_questions, 0);
    assert!(report.questions.is_empty());
    assert!(report.category_breakdown.is_empty());
    assert_eq!(report.base_score, 0.0);
    assert_eq!(report.fluency_band, None);
    assert_eq!(report.pace_band, None);
    assert_eq!(report.pause_pattern, None);
    assert_eq!(report.pause_frequency, None);
    assert_eq!(report.totals.total_words, 0);
}

#[derive(Clone, Default)]
struct RecordingPublisher {
    reports: Arc<AsyncMutex<Vec<SessionReport>>>,
}

#[async_trait]
impl ReportPublisher for RecordingPublisher {
    async fn publish(&self, report: &SessionReport) -> Result<(), PublishError> {
        self.reports.lock().await.push(report.clone());
        Ok(())
    }
}

struct RejectingPublisher;

#[async_trait]
impl ReportPublisher for RejectingPublisher {
    async fn publish(&self, _report: &SessionReport) -> Result<(), PublishError> {
        Err(PublishError::Rejected {
            reason: "renderer offline".to_string(),
        })
    }
}

#[tokio::test]
async fn publishes_the_finished_report() {
    let publisher = RecordingPublisher::default();
    let scorer = SessionScorer::with_publisher(engine(), Arc::new(publisher.clone()));

    let report = scorer
        .score_session(
            context(),
            vec![input("Q1", "the demo went fine", &[(0.0, 2.0)], 2.0, 1.0)],
        )
        .await;
    scorer
        .publish_report(&report)
        .await
        .expect("publish succeeds");

    let published = publisher.reports.lock().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0], report);
}

#[tokio::test]
async fn publisher_rejection_surfaces_as_an_error() {
    let scorer = SessionScorer::with_publisher(engine(), Arc::new(RejectingPublisher));
    let report = scorer.score_session(context(), Vec::new()).await;

    let err = scorer
        .publish_report(&report)
        .await
        .expect_err("rejection must surface");
    assert!(err.to_string().contains("renderer offline"));
}

#[tokio::test]
async fn scoring_the_same_session_twice_is_deterministic() {
    let scorer = SessionScorer::new(EngineConfig::default()).expect("valid config");
    let questions = vec![
        input("Q1", "um the rollout went fine you know", &[(0.0, 3.0)], 3.0, 1.0),
        input("Q2", CLEAN_FORTY_WORDS, &[(0.0, 16.0), (18.0, 20.0)], 20.0, 15.0),
        input("Q3", "well it sort of worked", &[(0.0, 2.0)], 2.5, 25.0),
    ];

    let first = scorer.score_session(context(), questions.clone()).await;
    let second = scorer.score_session(context(), questions).await;

    assert_eq!(first, second);
    assert_eq!(first.confidence_tally.high, 1);
    assert_eq!(first.confidence_tally.medium, 1);
    assert_eq!(first.confidence_tally.low, 1);
}
