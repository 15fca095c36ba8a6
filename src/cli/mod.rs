//! CLI Module
//!
//! Command-line interface for the mixtips analyzer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::store::{PainPoint, ProjectStage, Purpose, Relevance};

/// Mixtips - automatic feedback on a mix from its loudness and spectrum
#[derive(Parser, Debug)]
#[command(name = "mixtips")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Record file (overrides config and MIXTIPS_STORE)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one WAV/MP3 file and print mixing tips
    Analyze {
        /// Audio file to analyze
        file: PathBuf,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze every WAV/MP3 file in a directory
    Batch {
        /// Directory to scan (recursively)
        dir: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register an email address
    Register {
        #[arg(short, long)]
        email: String,
    },

    /// Analyze a file and store the result for an email
    Submit {
        /// Audio file to submit
        file: PathBuf,

        #[arg(short, long)]
        email: String,

        /// Genre, e.g. Pop, Rock, Trap, Techno
        #[arg(short, long, default_value = "")]
        genre: String,

        /// Project stage
        #[arg(short, long, value_enum)]
        stage: Option<ProjectStage>,
    },

    /// Leave feedback on a submitted file
    Feedback {
        #[arg(short, long)]
        email: String,

        /// File hash printed by `submit`
        #[arg(long)]
        hash: String,

        /// Why the file was uploaded
        #[arg(long, value_enum)]
        purpose: Purpose,

        /// Details when purpose is `other`
        #[arg(long, default_value = "")]
        purpose_detail: String,

        /// What bothers you most about the mix (repeatable)
        #[arg(long = "pain", value_enum)]
        pain_points: Vec<PainPoint>,

        /// Details when a pain point is `other`
        #[arg(long, default_value = "")]
        pain_detail: String,

        /// Satisfaction with the mix, 1-10
        #[arg(long)]
        rating: u8,

        /// Reference sound you want to achieve
        #[arg(long, default_value = "")]
        reference: String,

        /// Were the recommendations relevant?
        #[arg(long, value_enum)]
        relevance: Relevance,

        /// What would you like to improve in this analysis?
        #[arg(long, default_value = "")]
        improve: String,

        /// Any other comments
        #[arg(long, default_value = "")]
        comments: String,
    },

    /// List stored submissions for an email
    History {
        #[arg(short, long)]
        email: String,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Subcommand name, for error context
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Analyze { .. } => "analyze",
            Commands::Batch { .. } => "batch",
            Commands::Register { .. } => "register",
            Commands::Submit { .. } => "submit",
            Commands::Feedback { .. } => "feedback",
            Commands::History { .. } => "history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::parse_from([
            "mixtips",
            "--store",
            "records.json",
            "submit",
            "mix.wav",
            "--email",
            "dj@studio.com",
            "--stage",
            "reference-check",
        ]);

        assert_eq!(cli.store, Some(PathBuf::from("records.json")));
        match cli.command {
            Some(Commands::Submit { email, stage, genre, .. }) => {
                assert_eq!(email, "dj@studio.com");
                assert_eq!(stage, Some(ProjectStage::ReferenceCheck));
                assert!(genre.is_empty());
            }
            other => panic!("Expected submit, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_repeated_pain_points() {
        let cli = Cli::parse_from([
            "mixtips",
            "feedback",
            "-e",
            "dj@studio.com",
            "--hash",
            "abcdef0123",
            "--purpose",
            "just-checking",
            "--pain",
            "bass",
            "--pain",
            "no-depth",
            "--rating",
            "6",
            "--relevance",
            "partially",
        ]);

        match cli.command {
            Some(Commands::Feedback { pain_points, rating, .. }) => {
                assert_eq!(pain_points, vec![PainPoint::Bass, PainPoint::NoDepth]);
                assert_eq!(rating, 6);
            }
            other => panic!("Expected feedback, got: {:?}", other),
        }
    }
}
