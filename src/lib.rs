//! Mixtips - Automatic Mix Feedback
//!
//! Measures loudness and spectral features of an audio clip and turns them
//! into prioritized mixing advice.
//!
//! # Architecture
//!
//! The core is a three-stage pipeline:
//! - Audio loading: WAV/MP3 decode and mono downmix
//! - Metric extraction: RMS, peak, crest factor, loudness proxy, spectral
//!   centroid and dominant frequency
//! - Advice: fixed threshold rules producing a main tip plus one tip and one
//!   explanation per metric
//!
//! Submissions are persisted through the [`store::RecordStore`] port, which
//! is injected into [`pipeline::UploadPipeline`].

pub mod advisory;
pub mod analysis;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod store;

pub use advisory::{advise, AdvisoryResult, Advisor};
pub use analysis::{extract, MetricSet};
pub use audio::{load, load_bytes, AudioBuffer};
pub use error::{MixError, Result};
pub use pipeline::{analyze_bytes, analyze_path, Analysis};
