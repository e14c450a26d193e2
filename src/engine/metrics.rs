//! Classification run metrics.
//!
//! Collected by `Classifier::classify_verbose` only; the plain `classify`
//! path does not keep them.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    /// Wall time of the whole call.
    pub total: Duration,
    /// Normalization plus lexical scanning.
    pub scan: Duration,
    /// Time spent waiting on the oracle.
    pub oracle: Duration,
    /// Cascade evaluation.
    pub decide: Duration,
}
