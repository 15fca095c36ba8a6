//! Threshold rules
//!
//! Each dimension is classified against a low/high band. A value exactly on
//! a threshold is healthy.

use serde::{Deserialize, Serialize};

use crate::analysis::MetricSet;

/// The five measured aspects the advice covers, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Loudness,
    Peak,
    CrestFactor,
    DominantFrequency,
    SpectralCentroid,
}

impl Dimension {
    /// Report order; also the main-tip priority order
    pub const ALL: [Dimension; 5] = [
        Dimension::Loudness,
        Dimension::Peak,
        Dimension::CrestFactor,
        Dimension::DominantFrequency,
        Dimension::SpectralCentroid,
    ];

    /// The metric this dimension reads
    pub fn value(self, metrics: &MetricSet) -> f64 {
        match self {
            Dimension::Loudness => metrics.lufs_proxy,
            Dimension::Peak => metrics.peak,
            Dimension::CrestFactor => metrics.crest_factor,
            Dimension::DominantFrequency => metrics.dominant_frequency,
            Dimension::SpectralCentroid => metrics.spectral_centroid,
        }
    }

    /// Loudness and peak check the high side first, the others the low side
    fn high_first(self) -> bool {
        matches!(self, Dimension::Loudness | Dimension::Peak)
    }
}

/// Where a value falls relative to its band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Low,
    Healthy,
    High,
}

/// Healthy range for one dimension; values strictly outside trigger advice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Band { low, high }
    }

    fn classify(&self, value: f64, high_first: bool) -> Verdict {
        let high = value > self.high;
        let low = value < self.low;

        match (high_first, high, low) {
            (true, true, _) | (false, true, false) => Verdict::High,
            (_, _, true) => Verdict::Low,
            _ => Verdict::Healthy,
        }
    }
}

/// Healthy bands for every dimension
///
/// The defaults were tuned against the RMS loudness proxy, not calibrated
/// LUFS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryThresholds {
    /// Loudness proxy in dB
    pub loudness: Band,
    /// Absolute sample peak
    pub peak: Band,
    /// Peak/RMS ratio
    pub crest_factor: Band,
    /// Hz
    pub dominant_frequency: Band,
    /// Hz
    pub spectral_centroid: Band,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        AdvisoryThresholds {
            loudness: Band::new(-15.5, -11.5),
            peak: Band::new(0.70, 0.98),
            crest_factor: Band::new(3.0, 6.0),
            dominant_frequency: Band::new(80.0, 3000.0),
            spectral_centroid: Band::new(1400.0, 4800.0),
        }
    }
}

impl AdvisoryThresholds {
    /// Band for one dimension
    pub fn band(&self, dimension: Dimension) -> Band {
        match dimension {
            Dimension::Loudness => self.loudness,
            Dimension::Peak => self.peak,
            Dimension::CrestFactor => self.crest_factor,
            Dimension::DominantFrequency => self.dominant_frequency,
            Dimension::SpectralCentroid => self.spectral_centroid,
        }
    }

    /// Classify one dimension of a metric set
    pub fn classify(&self, dimension: Dimension, metrics: &MetricSet) -> Verdict {
        self.band(dimension)
            .classify(dimension.value(metrics), dimension.high_first())
    }
}
