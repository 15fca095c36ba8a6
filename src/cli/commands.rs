//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;
use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{
    analyze_directory, analyze_path, Analysis, BatchEntry, Upload, UploadPipeline,
};
use crate::store::{Feedback, JsonFileStore, ProjectStage};

/// Analyze a single file.
pub fn analyze(path: &Path, config: &Config, json: bool) -> Result<()> {
    let analysis = analyze_path(path, &config.advisor())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
        println!();
        println!("--- Auto Summary ---");
        println!("{}", analysis.summary());
    }

    Ok(())
}

/// Analyze every supported file under a directory.
pub fn batch(dir: &Path, config: &Config, json: bool) -> Result<()> {
    info!("Scanning {}", dir.display());

    let entries = analyze_directory(dir, &config.advisor())?;

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| match &entry.outcome {
                Ok(analysis) => json!({
                    "path": entry.path.display().to_string(),
                    "analysis": analysis,
                }),
                Err(e) => json!({
                    "path": entry.path.display().to_string(),
                    "error": e.to_string(),
                    "code": e.error_code(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No WAV or MP3 files found in {}", dir.display());
        return Ok(());
    }

    let (summary, lines) = batch_report(&entries);
    for line in lines {
        println!("{}", line);
    }

    println!("{:-<60}", "");
    println!(
        "Analyzed: {} | Needs attention: {} | Failed: {}",
        summary.analyzed, summary.needs_attention, summary.failed
    );

    Ok(())
}

/// Register an email address.
pub fn register(email: &str, config: &Config) -> Result<()> {
    let mut pipeline = open_pipeline(config);
    pipeline.register(email)?;

    println!("Email received – you may continue!");
    Ok(())
}

/// Analyze a file and store the result.
pub fn submit(
    path: &Path,
    email: &str,
    genre: &str,
    stage: Option<ProjectStage>,
    config: &Config,
) -> Result<()> {
    let mut upload = Upload::from_path(email, path)?.with_genre(genre);
    if let Some(stage) = stage {
        upload = upload.with_stage(stage);
    }

    let mut pipeline = open_pipeline(config);
    let submission = pipeline.submit(&upload)?;

    print_analysis(&submission.analysis);
    println!();
    println!("--- Auto Summary ---");
    println!("{}", submission.summary());
    println!();
    println!("File hash: {}", submission.file_hash);
    println!("Your feedback will improve the system! Use 'mixtips feedback --hash {}'", submission.file_hash);

    Ok(())
}

/// Attach feedback to a stored submission.
pub fn feedback(email: &str, file_hash: &str, feedback: Feedback, config: &Config) -> Result<()> {
    let mut pipeline = open_pipeline(config);
    pipeline.record_feedback(email, file_hash, feedback)?;

    println!("Thank you for your feedback!");
    Ok(())
}

/// Show stored submissions for an email.
pub fn history(email: &str, config: &Config, json: bool) -> Result<()> {
    let pipeline = open_pipeline(config);
    let records = pipeline.history(email)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let uploads: Vec<_> = records.iter().filter(|r| !r.file_hash.is_empty()).collect();
    if uploads.is_empty() {
        println!("No submissions for {}.", email);
        return Ok(());
    }

    println!("Submissions for {}:", email);
    println!("{:-<60}", "");

    for record in uploads {
        let rating = record
            .feedback
            .as_ref()
            .map(|f| format!(" | rated {}/10", f.self_rating))
            .unwrap_or_default();
        println!(
            "{} {} [{}]{}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.filename,
            record.file_hash,
            rating
        );
        println!("    {}", record.main_tip);
    }

    Ok(())
}

/// Counts for the batch footer
#[derive(Debug, Default, PartialEq)]
struct BatchSummary {
    analyzed: usize,
    needs_attention: usize,
    failed: usize,
}

/// One line per scanned file; clips with a headline issue are flagged
fn batch_report(entries: &[BatchEntry]) -> (BatchSummary, Vec<String>) {
    let mut summary = BatchSummary::default();
    let mut lines = Vec::with_capacity(entries.len());

    for entry in entries {
        let line = match &entry.outcome {
            Ok(analysis) => {
                summary.analyzed += 1;
                let marker = if analysis.advice.has_priority_issue() {
                    summary.needs_attention += 1;
                    "!"
                } else {
                    " "
                };
                format!("{} {}: {}", marker, entry.path.display(), analysis.advice.main_tip)
            }
            Err(e) => {
                summary.failed += 1;
                format!("x {}: ERROR {}", entry.path.display(), e.friendly_message())
            }
        };
        lines.push(line);
    }

    (summary, lines)
}

fn open_pipeline(config: &Config) -> UploadPipeline<JsonFileStore> {
    info!("Using record store {}", config.store_path.display());
    UploadPipeline::new(JsonFileStore::new(&config.store_path), config.advisor())
}

fn print_analysis(analysis: &Analysis) {
    let advice = &analysis.advice;

    println!("{}", advice.main_tip);
    println!();
    println!("Professional Recommendations for this Mix:");
    for (tip, explanation) in advice.tips.iter().zip(&advice.explanations) {
        println!("  • {}", tip);
        println!("      {}", explanation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Advisor;
    use crate::analysis::MetricSet;
    use crate::error::MixError;
    use std::path::PathBuf;

    fn entry(name: &str, lufs: f64) -> BatchEntry {
        let metrics = MetricSet {
            duration: 10.0,
            rms: 10f64.powf(lufs / 20.0),
            peak: 0.85,
            crest_factor: 4.5,
            lufs_proxy: lufs,
            spectral_centroid: 2000.0,
            dominant_frequency: 200.0,
        };
        BatchEntry {
            path: PathBuf::from(name),
            outcome: Ok(Analysis {
                metrics,
                advice: Advisor::new().advise(&metrics),
            }),
        }
    }

    #[test]
    fn test_batch_report_flags_priority_issues() {
        let entries = vec![
            entry("balanced.wav", -13.0),
            entry("loud.wav", -8.0),
            BatchEntry {
                path: PathBuf::from("broken.mp3"),
                outcome: Err(MixError::EmptyAudio),
            },
        ];

        let (summary, lines) = batch_report(&entries);

        assert_eq!(
            summary,
            BatchSummary {
                analyzed: 2,
                needs_attention: 1,
                failed: 1,
            }
        );
        assert!(lines[0].starts_with("  balanced.wav"));
        assert!(lines[1].starts_with("! loud.wav: Loudness is too high"));
        assert!(lines[2].starts_with("x broken.mp3: ERROR"));
    }
}
