//! Metric extraction
//!
//! Turns a mono buffer into the scalar descriptors the advisory rules read:
//! duration, RMS, peak, crest factor, loudness proxy, spectral centroid and
//! dominant frequency.

pub mod metrics;
pub mod spectrum;

pub use metrics::{extract, MetricSet};
pub use spectrum::Spectrum;

/// Guard added to every denominator and log argument
pub const EPSILON: f64 = 1e-12;
