use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use llt_server::net::start_websocket_server;
use llt_server::render::{render_comparison, render_report};
use llt_server::state::SharedSessionState;
use llt_server::{Vehicle, VehicleConfig};

/// Lateral load transfer calculator and WebSocket report server.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve reports over WebSocket.
    Serve {
        #[arg(long, env = "LLT_BIND", default_value = "0.0.0.0:9001")]
        bind: SocketAddr,
    },
    /// Print the load transfer report for one vehicle.
    Report {
        /// Vehicle JSON (omitted fields take reference values).
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Named preset instead of a file: "reference" or "stiffer-arb".
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,
        /// Print the structured report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Compare dynamic corner weights of two vehicles.
    Compare {
        baseline: PathBuf,
        candidate: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<PathBuf>, preset: Option<String>) -> Result<VehicleConfig, Box<dyn std::error::Error>> {
    match (path, preset) {
        (Some(path), _) => Ok(VehicleConfig::load(path)?),
        (None, Some(name)) => Ok(VehicleConfig::preset(&name).ok_or_else(|| format!("unknown preset '{name}'"))?),
        (None, None) => Ok(VehicleConfig::reference()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            info!("Starting LLT server...");
            let state = Arc::new(Mutex::new(SharedSessionState::new()));
            start_websocket_server(state, bind).await?;
        }
        Commands::Report { config, preset, json } => {
            let mut car = Vehicle::new(load_config(config, preset)?)?;
            let report = car.report()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Commands::Compare { baseline, candidate, json } => {
            let mut a = Vehicle::new(VehicleConfig::load(baseline)?)?;
            let mut b = Vehicle::new(VehicleConfig::load(candidate)?)?;
            let cmp = a.compare_to(&mut b)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print!("{}", render_comparison(&cmp));
            }
        }
    }

    Ok(())
}
