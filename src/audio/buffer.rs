//! Mono Audio Buffer
//!
//! The decoded, downmixed signal that metric extraction runs on. A buffer is
//! built once per upload and never mutated afterwards.

use crate::error::{MixError, Result};

/// Mono time-domain samples paired with their sample rate
///
/// Invariants: at least one sample, sample rate > 0, every sample finite.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from mono samples
    ///
    /// # Errors
    /// * `EmptyAudio` - If `samples` is empty
    /// * `Decode` - If the sample rate is zero or a sample is NaN/Inf
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(MixError::EmptyAudio);
        }

        if sample_rate == 0 {
            return Err(MixError::Decode {
                reason: "sample rate is zero".to_string(),
                source: None,
            });
        }

        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(MixError::Decode {
                reason: format!("non-finite sample at index {}", index),
                source: None,
            });
        }

        Ok(AudioBuffer {
            samples,
            sample_rate,
        })
    }

    /// Create a mono buffer from interleaved frames `[L,R,L,R,...]`
    ///
    /// Each output sample is the arithmetic mean of the channels in its frame.
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(interleaved: &[f64], channels: usize, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(MixError::Decode {
                reason: "audio has zero channels".to_string(),
                source: None,
            });
        }

        Self::new(downmix_interleaved(interleaved, channels), sample_rate)
    }

    /// Mono samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Average interleaved frames down to one channel
pub(crate) fn downmix_interleaved(interleaved: &[f64], channels: usize) -> Vec<f64> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Generate a test tone (sine wave)
///
/// Creates a mono buffer containing a sine wave at the given frequency and
/// peak amplitude. Useful for exercising the analysis pipeline.
///
/// # Errors
/// * `EmptyAudio` - If the duration or sample rate gives zero samples
pub fn generate_test_tone(
    frequency: f64,
    amplitude: f64,
    duration_secs: f64,
    sample_rate: u32,
) -> Result<AudioBuffer> {
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    let angular_freq = 2.0 * std::f64::consts::PI * frequency / sample_rate as f64;

    let samples = (0..num_samples)
        .map(|i| amplitude * (angular_freq * i as f64).sin())
        .collect();

    AudioBuffer::new(samples, sample_rate)
}
