//! Moodwave CLI
//!
//! Command-line interface for the Moodwave engine.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use moodwave::cli::commands::{self, GenerateArgs, RemixArgs};
use moodwave::cli::{Cli, Commands};
use moodwave::EngineConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Moodwave v{}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load_or_default(cli.config.as_deref())
        .context("failed to load engine configuration")?;

    match cli.command {
        Some(cmd) => handle_command(&config, cmd),
        None => {
            println!("Moodwave v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(config: &EngineConfig, cmd: Commands) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::Generate {
            mood,
            genre,
            duration,
            tempo,
            seed,
            output,
        } => commands::generate_clip(
            config,
            GenerateArgs {
                mood,
                genre,
                duration,
                tempo,
                seed,
                output,
            },
        ),
        Commands::Remix {
            input,
            mood,
            genre,
            tempo_change,
            pitch_shift,
            stretch,
            harmony,
            source_mood,
            suggestion,
            output,
        } => commands::remix_clip(
            config,
            RemixArgs {
                input,
                mood,
                genre,
                tempo_change,
                pitch_shift,
                stretch,
                harmony,
                source_mood,
                suggestion,
                output,
            },
        ),
        Commands::Analyze { input } => commands::analyze_clip(&input),
        Commands::Layer {
            input,
            layers,
            output,
        } => commands::layer_clip(&input, &layers, output.as_deref()),
        Commands::Moods => commands::list_moods(),
        Commands::Genres => commands::list_genres(),
    };

    result.map_err(|e| {
        if e.is_validation() {
            warn!("Hint: {}", e.recovery_hint());
        }
        let code = e.error_code();
        anyhow::Error::new(e).context(code)
    })
}
