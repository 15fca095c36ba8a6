//! Mixtips CLI
//!
//! Command-line interface for the mixtips analyzer.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use mixtips::cli::{commands, Cli, Commands};
use mixtips::config::Config;
use mixtips::store::Feedback;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Mixtips v{}", env!("CARGO_PKG_VERSION"));

    let Some(command) = cli.command else {
        println!("Mixtips v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for available commands");
        return Ok(());
    };

    let mut config =
        Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let name = command.name();
    if let Err(e) = handle_command(command, &config) {
        for hint in e.recovery_suggestions() {
            eprintln!("hint: {}", hint);
        }
        return Err(anyhow::Error::new(e).context(format!("'{}' failed", name)));
    }

    Ok(())
}

fn handle_command(cmd: Commands, config: &Config) -> mixtips::Result<()> {
    match cmd {
        Commands::Analyze { file, json } => commands::analyze(&file, config, json),
        Commands::Batch { dir, json } => commands::batch(&dir, config, json),
        Commands::Register { email } => commands::register(&email, config),
        Commands::Submit {
            file,
            email,
            genre,
            stage,
        } => commands::submit(&file, &email, &genre, stage, config),
        Commands::Feedback {
            email,
            hash,
            purpose,
            purpose_detail,
            pain_points,
            pain_detail,
            rating,
            reference,
            relevance,
            improve,
            comments,
        } => {
            let feedback = Feedback {
                purpose,
                purpose_detail,
                pain_points,
                pain_point_detail: pain_detail,
                self_rating: rating,
                reference,
                relevance,
                improvement_request: improve,
                comments,
            };
            commands::feedback(&email, &hash, feedback, config)
        }
        Commands::History { email, json } => commands::history(&email, config, json),
    }
}
