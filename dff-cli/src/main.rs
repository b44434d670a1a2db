use clap::{Parser, Subcommand};
use dff_core::cache_logic::is_expired;
use dff_core::{
    CacheConfig, CachedData, ChampionCache, ChampionEntry, ChampionId, DffError, restore,
};
use itertools::Itertools;
use std::path::PathBuf;
use time::{Duration, OffsetDateTime};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "dff-cli")]
#[command(about = "Inspect and manage the persisted champion data cache")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print cached champions, most recently used first
    Inspect {
        /// Cache file (defaults to the user cache directory)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Game version the cache must have been written for
        #[arg(short, long)]
        game_version: String,
    },
    /// Delete the persisted cache file
    Clear {
        /// Cache file (defaults to the user cache directory)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the default cache file path
    Path,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Example: RUST_LOG=dff_core::cache=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dff_core=info,dff_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file, game_version } => {
            let path = file.unwrap_or_else(dff_core::get_champion_cache_path);
            let config = CacheConfig::default();
            debug!(path = %path.display(), game_version = %game_version, "Inspecting champion cache");

            let cache: ChampionCache = match restore(&path, config.clone(), &game_version) {
                Ok(cache) => cache,
                Err(e) if e.is_not_found() => {
                    println!("No cache file at {}", path.display());
                    return Ok(());
                }
                Err(DffError::IncompatibleCache { reason }) => {
                    println!("Cache at {} is not usable: {}", path.display(), reason);
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("Failed to read cache: {}", e);
                    std::process::exit(1);
                }
            };

            let stats = cache.stats();
            println!(
                "{} of {} champions cached for game version {} ({} populated slots)",
                stats.entry_count,
                stats.capacity,
                cache.game_version(),
                stats.populated_slots
            );

            let now = OffsetDateTime::now_utc();
            for (rank, entry) in cache.iter().enumerate() {
                println!("  {}. {}", rank + 1, describe_entry(entry, now, &config));
            }
        }
        Commands::Clear { file } => {
            let path = file.unwrap_or_else(dff_core::get_champion_cache_path);
            if path.exists() {
                std::fs::remove_file(&path)?;
                info!(path = %path.display(), "Champion cache file removed");
                println!("Removed {}", path.display());
            } else {
                println!("Nothing to remove at {}", path.display());
            }
        }
        Commands::Path => {
            println!("{}", dff_core::get_champion_cache_path().display());
        }
    }

    Ok(())
}

/// Matches what `get_or_put` would report for the slot
fn slot_state(data: &CachedData, now: OffsetDateTime, expiration: Duration) -> &'static str {
    if data.is_complete() && !is_expired(data.creation_time, now, expiration) {
        "fresh"
    } else {
        "stale"
    }
}

fn describe_entry(entry: &ChampionEntry<ChampionId>, now: OffsetDateTime, config: &CacheConfig) -> String {
    let slots = entry
        .slots()
        .filter(|(_, _, data)| data.creation_time.is_some())
        .map(|(mode, position, data)| {
            let state = slot_state(data, now, config.expiration);
            let stamped = data
                .creation_time
                .and_then(|t| t.format(&Rfc3339).ok())
                .unwrap_or_default();
            if position.is_concrete() {
                format!("{}/{} {} @ {}", mode, position, state, stamped)
            } else {
                format!("{} {} @ {}", mode, state, stamped)
            }
        })
        .join(", ");

    let positions = entry.available_positions.iter().join("/");
    format!(
        "champion {} [default: {}, positions: {}] {}",
        entry.key,
        if entry.default_position.is_concrete() {
            entry.default_position.to_string()
        } else {
            "-".to_string()
        },
        if positions.is_empty() { "-" } else { positions.as_str() },
        if slots.is_empty() { "(no data)".to_string() } else { slots }
    )
}
