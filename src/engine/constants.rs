pub(crate) const MAX_SCORE: f64 = 100.0;

/// Tolerance applied when validating collaborator-supplied timestamps, so
/// float noise at span boundaries is not reported as malformed timing.
pub(crate) const TIMING_EPSILON: f64 = 1e-6;
