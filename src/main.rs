use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use configuration::settings::{Overrides, Settings};
use database::ClimateRepository;
use std::path::PathBuf;

/// The main entry point for the SurfsUp climate API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; settings have defaults.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let shared = cli.command.shared();

    let settings = configuration::load_settings(shared.config.as_deref(), &shared.overrides)
        .context("failed to load settings")?;
    let _guard = configuration::init_tracing(&settings.logging, settings.debug)?;
    tracing::debug!(?settings, "Loaded settings.");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(_) => web_server::run_server(&settings).await,
        Commands::Inspect(_) => handle_inspect(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Read-only HTTP API over the Hawaii climate observations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the climate API over HTTP.
    Serve(SharedArgs),
    /// Print the dataset's date span and per-station activity.
    Inspect(SharedArgs),
}

impl Commands {
    fn shared(&self) -> &SharedArgs {
        match self {
            Commands::Serve(args) | Commands::Inspect(args) => args,
        }
    }
}

#[derive(Args)]
struct SharedArgs {
    /// Path to a TOML settings file (defaults to ./surfsup.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

// ==============================================================================
// Inspect Command Logic
// ==============================================================================

/// Summarizes the database the server would expose.
async fn handle_inspect(settings: &Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    database::verify_schema(&pool).await?;
    let repo = ClimateRepository::new(pool.clone());

    let span = repo.dataset_span().await?;
    println!(
        "{} measurements from {} to {}",
        span.measurements,
        span.first_date.as_deref().unwrap_or("-"),
        span.last_date.as_deref().unwrap_or("-"),
    );

    if let Some(active) = repo.most_active_station().await? {
        println!(
            "Most active station: {} ({} observations, last on {})",
            active.station, active.observations, active.last_date
        );
    }

    let stations = repo.stations().await?;
    let activity = repo.station_activity().await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Station", "Name", "Observations", "Latitude", "Longitude", "Elevation"]);
    for row in &activity {
        let details = stations.iter().find(|s| s.station == row.station);
        table.add_row(vec![
            Cell::new(&row.station),
            Cell::new(row.name.as_deref().unwrap_or("-")),
            Cell::new(row.observations),
            Cell::new(details.map_or("-".to_string(), |s| format!("{:.4}", s.latitude))),
            Cell::new(details.map_or("-".to_string(), |s| format!("{:.4}", s.longitude))),
            Cell::new(details.map_or("-".to_string(), |s| format!("{:.1}", s.elevation))),
        ]);
    }
    println!("{table}");

    pool.close().await;
    Ok(())
}
