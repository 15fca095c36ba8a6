//! Persisted submission records
//!
//! One record per `(email, file_hash)` pair, holding the analysis of the
//! upload and, later, the uploader's answers to the feedback questions.

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::MetricSet;
use crate::error::{MixError, Result};

/// Where the uploader is in their production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStage {
    Demo,
    Mix,
    Master,
    ReferenceCheck,
    Final,
    Other,
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectStage::Demo => "Demo",
            ProjectStage::Mix => "Mix",
            ProjectStage::Master => "Master",
            ProjectStage::ReferenceCheck => "Reference Check",
            ProjectStage::Final => "Final",
            ProjectStage::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Why the file was uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    JustChecking,
    SubmitToClient,
    StreamingUpload,
    DemoPhase,
    ProfessionalConsultation,
    Contest,
    Other,
}

/// What the uploader feels is weakest in the mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PainPoint {
    Bass,
    Highs,
    Dynamics,
    OverallLoudness,
    UnclearSound,
    NoDepth,
    NoLiveFeeling,
    Distortion,
    Other,
}

/// Were the recommendations relevant?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Yes,
    No,
    Partially,
}

/// Answers to the post-analysis questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub purpose: Purpose,
    /// Free text, kept only when `purpose` is `Other`
    #[serde(default)]
    pub purpose_detail: String,
    #[serde(default)]
    pub pain_points: Vec<PainPoint>,
    /// Free text, kept only when `pain_points` contains `Other`
    #[serde(default)]
    pub pain_point_detail: String,
    /// 1 = not satisfied at all, 10 = completely satisfied
    pub self_rating: u8,
    /// Reference track the mix is aiming for
    #[serde(default)]
    pub reference: String,
    pub relevance: Relevance,
    #[serde(default)]
    pub improvement_request: String,
    #[serde(default)]
    pub comments: String,
}

impl Feedback {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 10;

    /// Check the rating and drop free text that no `Other` choice asked for
    pub fn validated(mut self) -> Result<Self> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&self.self_rating) {
            return Err(MixError::InvalidRating {
                rating: self.self_rating,
            });
        }

        if self.purpose != Purpose::Other {
            self.purpose_detail.clear();
        }
        if !self.pain_points.contains(&PainPoint::Other) {
            self.pain_point_detail.clear();
        }

        Ok(self)
    }
}

/// Stored row for one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub email: String,
    /// Empty for the email-only registration record
    pub file_hash: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub metrics: Option<MetricSet>,
    #[serde(default)]
    pub main_tip: String,
    /// Tips joined with `"; "`
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub project_stage: Option<ProjectStage>,
    #[serde(default)]
    pub feedback: Option<Feedback>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Fresh record with nothing but its key
    pub fn new(email: &str, file_hash: &str, now: DateTime<Utc>) -> Self {
        FeedbackRecord {
            email: email.to_string(),
            file_hash: file_hash.to_string(),
            filename: String::new(),
            metrics: None,
            main_tip: String::new(),
            tips: String::new(),
            genre: String::new(),
            project_stage: None,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this record is keyed by `(email, file_hash)`
    pub fn is_for(&self, email: &str, file_hash: &str) -> bool {
        self.email == email && self.file_hash == file_hash
    }

    /// Overwrite every field the patch sets
    pub fn apply(&mut self, patch: RecordPatch, now: DateTime<Utc>) {
        if let Some(filename) = patch.filename {
            self.filename = filename;
        }
        if let Some(metrics) = patch.metrics {
            self.metrics = Some(metrics);
        }
        if let Some(main_tip) = patch.main_tip {
            self.main_tip = main_tip;
        }
        if let Some(tips) = patch.tips {
            self.tips = tips;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(stage) = patch.project_stage {
            self.project_stage = Some(stage);
        }
        if let Some(feedback) = patch.feedback {
            self.feedback = Some(feedback);
        }
        self.updated_at = now;
    }
}

/// Partial update for [`FeedbackRecord::apply`]; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub filename: Option<String>,
    pub metrics: Option<MetricSet>,
    pub main_tip: Option<String>,
    pub tips: Option<String>,
    pub genre: Option<String>,
    pub project_stage: Option<ProjectStage>,
    pub feedback: Option<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn feedback(rating: u8) -> Feedback {
        Feedback {
            purpose: Purpose::JustChecking,
            purpose_detail: "ignored".to_string(),
            pain_points: vec![PainPoint::Bass, PainPoint::Other],
            pain_point_detail: "kick and bass fight".to_string(),
            self_rating: rating,
            reference: String::new(),
            relevance: Relevance::Partially,
            improvement_request: String::new(),
            comments: String::new(),
        }
    }

    #[test]
    fn test_feedback_rating_bounds() {
        assert!(feedback(1).validated().is_ok());
        assert!(feedback(10).validated().is_ok());
        assert!(matches!(
            feedback(0).validated(),
            Err(MixError::InvalidRating { rating: 0 })
        ));
        assert!(matches!(
            feedback(11).validated(),
            Err(MixError::InvalidRating { rating: 11 })
        ));
    }

    #[test]
    fn test_feedback_drops_unrequested_detail() {
        let validated = feedback(7).validated().unwrap();
        assert!(validated.purpose_detail.is_empty());
        assert_eq!(validated.pain_point_detail, "kick and bass fight");
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let created = Utc::now();
        let mut record = FeedbackRecord::new("a@b.io", "abc", created);
        record.genre = "Techno".to_string();

        let later = created + Duration::seconds(5);
        record.apply(
            RecordPatch {
                main_tip: Some("tip".to_string()),
                ..RecordPatch::default()
            },
            later,
        );

        assert_eq!(record.genre, "Techno");
        assert_eq!(record.main_tip, "tip");
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(ProjectStage::ReferenceCheck.to_string(), "Reference Check");
        assert_eq!(
            serde_json::to_string(&ProjectStage::ReferenceCheck).unwrap(),
            "\"reference_check\""
        );
    }
}
