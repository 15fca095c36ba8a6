//! Mixing advice
//!
//! Maps a [`MetricSet`] to a headline tip, five recommendation lines and five
//! matching explanations. Rules are evaluated in [`Dimension::ALL`] order and
//! the first rule that carries a headline sets the main tip; later
//! candidates are ignored even if they look worse.

mod rules;
mod tips;

pub use rules::{AdvisoryThresholds, Band, Dimension, Verdict};
pub use tips::SUCCESS_TIP;

use serde::{Deserialize, Serialize};

use crate::analysis::MetricSet;

/// Outcome of one rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub dimension: Dimension,
    pub verdict: Verdict,
    pub value: f64,
}

impl Finding {
    /// Recommendation line for this finding
    pub fn tip(&self) -> String {
        tips::tip(self.dimension, self.verdict, self.value)
    }

    /// Explanation matching [`Finding::tip`]
    pub fn explanation(&self) -> &'static str {
        tips::explanation(self.dimension, self.verdict)
    }

    /// Headline candidate, if this finding is allowed to set one
    pub fn main_tip(&self) -> Option<&'static str> {
        tips::main_tip(self.dimension, self.verdict)
    }
}

/// Advice for one clip
///
/// `tips`, `explanations` and `findings` always hold one entry per
/// dimension, in [`Dimension::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub main_tip: String,
    pub tips: Vec<String>,
    pub explanations: Vec<String>,
    pub findings: Vec<Finding>,
}

impl AdvisoryResult {
    /// Whether any rule raised a headline issue
    pub fn has_priority_issue(&self) -> bool {
        self.main_tip != SUCCESS_TIP
    }
}

/// Rule evaluator
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    thresholds: AdvisoryThresholds,
}

impl Advisor {
    /// Advisor with the default bands
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisor with custom bands
    pub fn with_thresholds(thresholds: AdvisoryThresholds) -> Self {
        Advisor { thresholds }
    }

    pub fn thresholds(&self) -> &AdvisoryThresholds {
        &self.thresholds
    }

    /// Evaluate every rule against `metrics`
    pub fn advise(&self, metrics: &MetricSet) -> AdvisoryResult {
        let findings: Vec<Finding> = Dimension::ALL
            .iter()
            .map(|&dimension| Finding {
                dimension,
                verdict: self.thresholds.classify(dimension, metrics),
                value: dimension.value(metrics),
            })
            .collect();

        let main_tip = findings
            .iter()
            .find_map(Finding::main_tip)
            .unwrap_or(SUCCESS_TIP)
            .to_string();

        AdvisoryResult {
            main_tip,
            tips: findings.iter().map(Finding::tip).collect(),
            explanations: findings
                .iter()
                .map(|f| f.explanation().to_string())
                .collect(),
            findings,
        }
    }
}

/// Evaluate the default rules
pub fn advise(metrics: &MetricSet) -> AdvisoryResult {
    Advisor::new().advise(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics(lufs: f64, peak: f64, crest: f64, centroid: f64, dominant: f64) -> MetricSet {
        MetricSet {
            duration: 30.0,
            rms: 10f64.powf(lufs / 20.0),
            peak,
            crest_factor: crest,
            lufs_proxy: lufs,
            spectral_centroid: centroid,
            dominant_frequency: dominant,
        }
    }

    #[test]
    fn test_loudness_has_priority_over_peak_and_crest() {
        let result = advise(&metrics(-8.0, 0.99, 2.0, 2000.0, 200.0));
        assert_eq!(
            result.main_tip,
            "Loudness is too high – possible distortion/volume reduction."
        );
        assert_eq!(result.findings[1].verdict, Verdict::High);
        assert_eq!(result.findings[2].verdict, Verdict::Low);
    }

    #[test]
    fn test_all_healthy_gives_success() {
        let result = advise(&metrics(-13.0, 0.85, 4.5, 2000.0, 200.0));

        assert_eq!(result.main_tip, SUCCESS_TIP);
        assert!(!result.has_priority_issue());
        assert!(result
            .findings
            .iter()
            .all(|f| f.verdict == Verdict::Healthy));
        assert_eq!(
            result.tips,
            vec![
                "Average loudness is normal (-13.00 LUFS) – great!".to_string(),
                "Peak level is within a healthy range (0.85).".to_string(),
                "Crest Factor is within normal range (4.50).".to_string(),
                "Dominant frequency is within a healthy range (200.0Hz).".to_string(),
                "Spectral centroid is balanced (2000.0Hz).".to_string(),
            ]
        );
    }

    #[test]
    fn test_low_peak_does_not_block_crest_headline() {
        let result = advise(&metrics(-13.0, 0.5, 2.0, 2000.0, 200.0));
        assert_eq!(result.main_tip, "Mix is over-compressed – loss of dynamics.");
        assert!(result.tips[1].starts_with("Low peak value (0.50)"));
    }

    #[test]
    fn test_peak_headline_when_loudness_healthy() {
        let result = advise(&metrics(-12.0, 0.995, 2.0, 2000.0, 200.0));
        assert_eq!(result.main_tip, "High peak – risk of clipping/distortion.");
    }

    #[test]
    fn test_low_loudness_headline() {
        let result = advise(&metrics(-22.0, 0.5, 8.0, 900.0, 50.0));
        assert_eq!(
            result.main_tip,
            "Loudness is low – mix won't stand out compared to others."
        );
    }

    #[test]
    fn test_frequency_rules_are_informational() {
        let result = advise(&metrics(-13.0, 0.85, 4.5, 6000.0, 40.0));

        assert_eq!(result.main_tip, SUCCESS_TIP);
        assert!(result.tips[3].starts_with("Bass dominant frequency (40.0Hz)"));
        assert!(result.tips[4].starts_with("High spectral centroid (6000.0Hz)"));
    }

    #[test]
    fn test_always_five_entries() {
        let cases = [
            metrics(-13.0, 0.85, 4.5, 2000.0, 200.0),
            metrics(-8.0, 0.99, 2.0, 6000.0, 40.0),
            metrics(-30.0, 0.1, 9.0, 500.0, 5000.0),
        ];

        for m in &cases {
            let result = advise(m);
            assert_eq!(result.tips.len(), 5);
            assert_eq!(result.explanations.len(), 5);
            assert_eq!(result.findings.len(), 5);
        }
    }

    #[test]
    fn test_advise_is_deterministic() {
        let m = metrics(-9.0, 0.6, 7.0, 1200.0, 3500.0);
        let first = serde_json::to_string(&advise(&m)).unwrap();
        let second = serde_json::to_string(&advise(&m)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AdvisoryThresholds {
            loudness: Band::new(-30.0, -5.0),
            ..AdvisoryThresholds::default()
        };
        let advisor = Advisor::with_thresholds(thresholds);

        let result = advisor.advise(&metrics(-8.0, 0.85, 4.5, 2000.0, 200.0));
        assert_eq!(result.main_tip, SUCCESS_TIP);
    }
}
