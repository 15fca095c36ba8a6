//! Full-buffer magnitude spectrum
//!
//! A single FFT over the whole clip with no window and no detrending. Only
//! the non-negative half of the spectrum is kept, so bin `k` sits at
//! `k * sample_rate / n` for `k` in `0..=n/2`.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::analysis::EPSILON;
use crate::audio::AudioBuffer;

/// One-sided magnitude spectrum of a mono buffer
#[derive(Debug, Clone)]
pub struct Spectrum {
    magnitudes: Vec<f64>,
    bin_width: f64,
}

impl Spectrum {
    /// Transform the whole buffer
    pub fn of(buffer: &AudioBuffer) -> Self {
        let n = buffer.len();

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);

        let mut bins: Vec<Complex<f64>> = buffer
            .samples()
            .iter()
            .map(|&s| Complex::new(s, 0.0))
            .collect();
        fft.process(&mut bins);

        let magnitudes = bins.iter().take(n / 2 + 1).map(|c| c.norm()).collect();

        Spectrum {
            magnitudes,
            bin_width: buffer.sample_rate() as f64 / n as f64,
        }
    }

    /// Magnitude per bin
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Spacing between bins in Hz
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Centre frequency of bin `k` in Hz
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.bin_width
    }

    /// Magnitude-weighted mean frequency
    pub fn centroid(&self) -> f64 {
        let weighted: f64 = self
            .magnitudes
            .iter()
            .enumerate()
            .map(|(k, m)| self.frequency(k) * m)
            .sum();
        let total: f64 = self.magnitudes.iter().sum();

        weighted / (total + EPSILON)
    }

    /// Frequency of the strongest bin
    ///
    /// On equal magnitudes the lowest bin wins.
    pub fn dominant_frequency(&self) -> f64 {
        let mut best = 0;
        for (k, &m) in self.magnitudes.iter().enumerate().skip(1) {
            if m > self.magnitudes[best] {
                best = k;
            }
        }
        self.frequency(best)
    }
}
