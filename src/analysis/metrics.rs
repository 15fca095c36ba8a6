//! Scalar mix descriptors
//!
//! Loudness and spectral measurements the advisory rules work from. The
//! loudness figure is `20 * log10(rms)`, an uncalibrated proxy rather than
//! ITU-R BS.1770 LUFS; the advice thresholds are tuned against this proxy.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::spectrum::Spectrum;
use crate::analysis::EPSILON;
use crate::audio::AudioBuffer;
use crate::error::{MixError, Result};

/// Measurements of one clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Length in seconds
    pub duration: f64,
    /// Root-mean-square amplitude
    pub rms: f64,
    /// Maximum absolute sample value
    pub peak: f64,
    /// Peak over RMS (linear ratio)
    pub crest_factor: f64,
    /// RMS in dB, labelled LUFS in the advice text
    pub lufs_proxy: f64,
    /// Magnitude-weighted mean frequency (Hz)
    pub spectral_centroid: f64,
    /// Frequency of the strongest FFT bin (Hz)
    pub dominant_frequency: f64,
}

impl MetricSet {
    /// Name/value pairs, in field order
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("duration", self.duration),
            ("rms", self.rms),
            ("peak", self.peak),
            ("crest_factor", self.crest_factor),
            ("lufs_proxy", self.lufs_proxy),
            ("spectral_centroid", self.spectral_centroid),
            ("dominant_frequency", self.dominant_frequency),
        ]
    }

    /// Fail on the first NaN/Inf field
    fn ensure_finite(self) -> Result<Self> {
        match self.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((metric, value)) => Err(MixError::NonFiniteMetric { metric, value }),
            None => Ok(self),
        }
    }
}

/// Compute all descriptors for a mono buffer
///
/// # Errors
/// * `NonFiniteMetric` - A value came out NaN/Inf. The buffer invariants rule
///   this out, so hitting it means a defect rather than bad input.
pub fn extract(buffer: &AudioBuffer) -> Result<MetricSet> {
    let samples = buffer.samples();

    let rms = calculate_rms(samples);
    let peak = calculate_peak(samples);
    let spectrum = Spectrum::of(buffer);

    let metrics = MetricSet {
        duration: buffer.duration(),
        rms,
        peak,
        crest_factor: peak / (rms + EPSILON),
        lufs_proxy: 20.0 * (rms + EPSILON).log10(),
        spectral_centroid: spectrum.centroid(),
        dominant_frequency: spectrum.dominant_frequency(),
    };

    debug!(
        "Metrics: duration={:.2}s rms={:.4} peak={:.4} crest={:.2} lufs={:.2} centroid={:.1}Hz dominant={:.1}Hz",
        metrics.duration,
        metrics.rms,
        metrics.peak,
        metrics.crest_factor,
        metrics.lufs_proxy,
        metrics.spectral_centroid,
        metrics.dominant_frequency
    );

    metrics.ensure_finite()
}

/// Calculate RMS (Root Mean Square) of samples
pub fn calculate_rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// Calculate peak (maximum absolute value) of samples
pub fn calculate_peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}
