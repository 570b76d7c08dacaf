//! Viva Core Library
//!
//! This crate provides the fluency and confidence scoring engine for the
//! Viva interview practice system: filler classification, pause analysis,
//! speech-rate calculation, fluency scoring, and session-level aggregation.
//!
//! Audio capture, speech recognition, and report rendering live in
//! collaborating components; this crate consumes finalized transcripts and
//! timing data and produces typed evaluation records.

pub mod analysis;
pub mod engine;
pub mod session;
pub mod telemetry;
