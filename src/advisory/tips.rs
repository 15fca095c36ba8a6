//! Advice wording
//!
//! Ratios and dB values are printed with two decimals, frequencies with one.

use super::rules::{Dimension, Verdict};

/// Main tip when no rule raises a priority issue
pub const SUCCESS_TIP: &str = "Your mix is balanced and excellent! Keep it up.";

/// Headline for a triggered rule, if that rule is allowed to set one
///
/// Peak-low, crest-high and both frequency dimensions are informational.
pub fn main_tip(dimension: Dimension, verdict: Verdict) -> Option<&'static str> {
    match (dimension, verdict) {
        (Dimension::Loudness, Verdict::High) => {
            Some("Loudness is too high – possible distortion/volume reduction.")
        }
        (Dimension::Loudness, Verdict::Low) => {
            Some("Loudness is low – mix won't stand out compared to others.")
        }
        (Dimension::Peak, Verdict::High) => Some("High peak – risk of clipping/distortion."),
        (Dimension::CrestFactor, Verdict::Low) => Some("Mix is over-compressed – loss of dynamics."),
        _ => None,
    }
}

/// Recommendation line with the measured value
pub fn tip(dimension: Dimension, verdict: Verdict, value: f64) -> String {
    match (dimension, verdict) {
        (Dimension::Loudness, Verdict::High) => format!(
            "High loudness ({:.2} LUFS). It's recommended to reduce master volume/limiter to about \
             -13~-14 LUFS to avoid distortion and automatic volume reduction on streaming platforms.",
            value
        ),
        (Dimension::Loudness, Verdict::Low) => format!(
            "Low loudness ({:.2} LUFS). Consider raising volume or remastering to make the mix stand out.",
            value
        ),
        (Dimension::Loudness, Verdict::Healthy) => {
            format!("Average loudness is normal ({:.2} LUFS) – great!", value)
        }

        (Dimension::Peak, Verdict::High) => format!(
            "High peak value ({:.2}). Recommended to lower to -0.5dBFS to avoid clipping or distortion.",
            value
        ),
        (Dimension::Peak, Verdict::Low) => format!(
            "Low peak value ({:.2}). Consider increasing gain to utilize dynamic range.",
            value
        ),
        (Dimension::Peak, Verdict::Healthy) => {
            format!("Peak level is within a healthy range ({:.2}).", value)
        }

        (Dimension::CrestFactor, Verdict::Low) => format!(
            "Low Crest Factor ({:.2}). Mix is too compressed – try reducing compression/limiter.",
            value
        ),
        (Dimension::CrestFactor, Verdict::High) => format!(
            "High Crest Factor ({:.2}). Mix is very dynamic – might need compression.",
            value
        ),
        (Dimension::CrestFactor, Verdict::Healthy) => {
            format!("Crest Factor is within normal range ({:.2}).", value)
        }

        (Dimension::DominantFrequency, Verdict::Low) => format!(
            "Bass dominant frequency ({:.1}Hz). Check for muddy build-up in 20–80Hz range.",
            value
        ),
        (Dimension::DominantFrequency, Verdict::High) => format!(
            "High frequency dominant ({:.1}Hz). Possibly too much high-end boost.",
            value
        ),
        (Dimension::DominantFrequency, Verdict::Healthy) => {
            format!("Dominant frequency is within a healthy range ({:.1}Hz).", value)
        }

        (Dimension::SpectralCentroid, Verdict::Low) => format!(
            "Low spectral centroid ({:.1}Hz). Consider adding brightness (EQ around 2kHz-7kHz).",
            value
        ),
        (Dimension::SpectralCentroid, Verdict::High) => format!(
            "High spectral centroid ({:.1}Hz). High-end is dominant – consider EQ adjustments.",
            value
        ),
        (Dimension::SpectralCentroid, Verdict::Healthy) => {
            format!("Spectral centroid is balanced ({:.1}Hz).", value)
        }
    }
}

/// Why the measurement matters
pub fn explanation(dimension: Dimension, verdict: Verdict) -> &'static str {
    match (dimension, verdict) {
        (Dimension::Loudness, Verdict::High) => {
            "LUFS represents perceived loudness. Too high values will cause platforms like Spotify \
             to reduce volume automatically, possibly causing distortion."
        }
        (Dimension::Loudness, Verdict::Low) => {
            "Low LUFS means the track sounds weak compared to others, especially in playlists."
        }
        (Dimension::Loudness, Verdict::Healthy) => {
            "Loudness is within normal range, but make sure other parameters are good too."
        }

        (Dimension::Peak, Verdict::High) => {
            "High peak values mean audio signal touches upper limit, risking digital distortion."
        }
        (Dimension::Peak, Verdict::Low) => {
            "Low peak means mix isn't utilizing full dynamic range – master gain can be raised."
        }
        (Dimension::Peak, Verdict::Healthy) => {
            "Peak level leaves headroom below full scale while still using most of the available range."
        }

        (Dimension::CrestFactor, Verdict::Low) => {
            "Low Crest Factor indicates small difference between peaks and noise floor, meaning heavy compression."
        }
        (Dimension::CrestFactor, Verdict::High) => {
            "High Crest Factor is typical for classical or soundtrack music; if not, mix might be too soft."
        }
        (Dimension::CrestFactor, Verdict::Healthy) => {
            "Crest Factor shows a good balance between transient punch and compression."
        }

        (Dimension::DominantFrequency, Verdict::Low) => {
            "Very low dominant frequency suggests bass is overpowering. Use headphones and EQ to check."
        }
        (Dimension::DominantFrequency, Verdict::High) => {
            "High dominant frequency can cause harshness and listener fatigue. Balance highs and lows."
        }
        (Dimension::DominantFrequency, Verdict::Healthy) => {
            "The strongest frequency sits in the body of the mix, neither boomy nor harsh."
        }

        (Dimension::SpectralCentroid, Verdict::Low) => {
            "Low centroid results in a 'dark' mix; sometimes a bit of brightness is desired for modern sound."
        }
        (Dimension::SpectralCentroid, Verdict::High) => {
            "Too high centroid makes mix sound 'sharp' or 'thin', which can be unpleasant for long listening."
        }
        (Dimension::SpectralCentroid, Verdict::Healthy) => {
            "Spectral centroid shows an even tonal spread between lows and highs."
        }
    }
}
