//! Analysis pipeline
//!
//! load → extract → advise, with either a complete [`Analysis`] or an error
//! at the end. [`UploadPipeline`] adds the submission flow on top: identify
//! the upload, analyze it and persist the outcome through an injected
//! [`RecordStore`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::advisory::{AdvisoryResult, Advisor};
use crate::analysis::{extract, MetricSet};
use crate::audio::{self, AudioBuffer};
use crate::error::{MixError, Result};
use crate::identity::{file_hash, is_valid_email, project_filename};
use crate::store::{Feedback, FeedbackRecord, ProjectStage, RecordPatch, RecordStore};

/// File extensions picked up by directory scans
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["wav", "mp3"];

/// Metrics and advice for one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub metrics: MetricSet,
    pub advice: AdvisoryResult,
}

impl Analysis {
    /// Run extraction and advice on a decoded buffer
    pub fn of(buffer: &AudioBuffer, advisor: &Advisor) -> Result<Self> {
        let metrics = extract(buffer)?;
        let advice = advisor.advise(&metrics);

        debug!("Main tip: {}", advice.main_tip);

        Ok(Analysis { metrics, advice })
    }

    /// Plain-text summary for copy/share
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        format!(
            "Loudness (LUFS): {:.2}\n\
             Peak: {:.2}\n\
             Crest Factor: {:.2}\n\
             Dominant Frequency: {:.0}Hz\n\
             Centroid: {:.0}Hz",
            m.lufs_proxy, m.peak, m.crest_factor, m.dominant_frequency, m.spectral_centroid
        )
    }
}

/// Analyze an audio file on disk
pub fn analyze_path(path: &Path, advisor: &Advisor) -> Result<Analysis> {
    info!("Analyzing {}", path.display());
    let buffer = audio::load(path)?;
    Analysis::of(&buffer, advisor)
}

/// Analyze an in-memory audio file
pub fn analyze_bytes(bytes: &[u8], extension: Option<&str>, advisor: &Advisor) -> Result<Analysis> {
    let buffer = audio::load_bytes(bytes, extension)?;
    Analysis::of(&buffer, advisor)
}

/// Outcome for one file of a directory scan
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: Result<Analysis>,
}

/// Analyze every WAV/MP3 file under `dir`, in file-name order
///
/// A file that fails to decode is reported in its entry and does not stop
/// the scan.
pub fn analyze_directory(dir: &Path, advisor: &Advisor) -> Result<Vec<BatchEntry>> {
    if !dir.is_dir() {
        return Err(MixError::FileNotFound {
            path: dir.display().to_string(),
            source: None,
        });
    }

    let entries = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_supported_extension(entry.path()))
        .map(|entry| {
            let path = entry.into_path();
            let outcome = analyze_path(&path, advisor);
            if let Err(e) = &outcome {
                warn!("Skipping {}: {}", path.display(), e);
            }
            BatchEntry { path, outcome }
        })
        .collect();

    Ok(entries)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

// ============================================================================
// Submissions
// ============================================================================

/// An uploaded file plus the form fields sent with it
#[derive(Debug, Clone)]
pub struct Upload {
    pub email: String,
    /// Name of the file as uploaded
    pub original_name: String,
    pub bytes: Vec<u8>,
    pub genre: String,
    pub stage: Option<ProjectStage>,
}

impl Upload {
    pub fn new(email: &str, original_name: &str, bytes: Vec<u8>) -> Self {
        Upload {
            email: email.to_string(),
            original_name: original_name.to_string(),
            bytes,
            genre: String::new(),
            stage: None,
        }
    }

    /// Read an upload from disk
    pub fn from_path(email: &str, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MixError::FileNotFound {
                path: path.display().to_string(),
                source: Some(e),
            },
            _ => MixError::Io(e),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(email, &name, bytes))
    }

    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = genre.to_string();
        self
    }

    pub fn with_stage(mut self, stage: ProjectStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Extension of the uploaded file name, if any
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub file_hash: String,
    pub analysis: Analysis,
    pub record: FeedbackRecord,
}

impl Submission {
    /// [`Analysis::summary`] plus the submission details
    pub fn summary(&self) -> String {
        let stage = self
            .record
            .project_stage
            .map(|s| s.to_string())
            .unwrap_or_default();

        format!(
            "{}\nGenre: {}\nProject Stage: {}\nAudio File: {}",
            self.analysis.summary(),
            self.record.genre,
            stage,
            self.record.filename
        )
    }
}

/// Submission flow over an injected record store
pub struct UploadPipeline<S: RecordStore> {
    store: S,
    advisor: Advisor,
}

impl<S: RecordStore> UploadPipeline<S> {
    pub fn new(store: S, advisor: Advisor) -> Self {
        UploadPipeline { store, advisor }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record an email address before any upload
    ///
    /// Registering the same address twice keeps a single record.
    pub fn register(&mut self, email: &str) -> Result<FeedbackRecord> {
        let email = checked_email(email)?;
        info!("Registering {}", email);
        self.store.upsert(email, "", RecordPatch::default())
    }

    /// Analyze an upload and store the outcome
    ///
    /// Nothing is stored if the audio cannot be analyzed. Re-uploading the
    /// same bytes updates the earlier record and keeps its project name.
    pub fn submit(&mut self, upload: &Upload) -> Result<Submission> {
        let email = checked_email(&upload.email)?;
        let hash = file_hash(&upload.bytes);

        info!(
            "Analyzing upload '{}' ({} bytes, hash {})",
            upload.original_name,
            upload.bytes.len(),
            hash
        );

        let analysis = analyze_bytes(&upload.bytes, upload.extension(), &self.advisor)?;

        let filename = match self.store.find(email, &hash)? {
            Some(existing) if !existing.filename.is_empty() => existing.filename,
            _ => {
                let number = self.store.next_project_number(email)?;
                project_filename(Some(email), number, upload.extension().unwrap_or_default())
            }
        };

        let patch = RecordPatch {
            filename: Some(filename),
            metrics: Some(analysis.metrics),
            main_tip: Some(analysis.advice.main_tip.clone()),
            tips: Some(analysis.advice.tips.join("; ")),
            genre: Some(upload.genre.clone()),
            project_stage: upload.stage,
            feedback: None,
        };
        let record = self.store.upsert(email, &hash, patch)?;

        info!("Stored analysis as {}", record.filename);

        Ok(Submission {
            file_hash: hash,
            analysis,
            record,
        })
    }

    /// Attach questionnaire answers to an analyzed upload
    pub fn record_feedback(
        &mut self,
        email: &str,
        file_hash: &str,
        feedback: Feedback,
    ) -> Result<FeedbackRecord> {
        let email = checked_email(email)?;
        let feedback = feedback.validated()?;

        // The empty hash belongs to the registration row, not an upload
        if file_hash.is_empty() || self.store.find(email, file_hash)?.is_none() {
            return Err(MixError::RecordNotFound {
                email: email.to_string(),
                file_hash: file_hash.to_string(),
            });
        }

        let patch = RecordPatch {
            feedback: Some(feedback),
            ..RecordPatch::default()
        };
        self.store.upsert(email, file_hash, patch)
    }

    /// Every record for an email, newest first
    pub fn history(&self, email: &str) -> Result<Vec<FeedbackRecord>> {
        self.store.records_for(email.trim())
    }
}

fn checked_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if is_valid_email(email) {
        Ok(email)
    } else {
        Err(MixError::InvalidEmail {
            email: email.to_string(),
        })
    }
}
