use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_planner::directions::{DirectionsClient, DirectionsConfig};
use trip_planner::domain::TravelMode;
use trip_planner::store::{FileStore, KeyValueStore, favorite_stops, recent_searches};
use trip_planner::trip::TripPlanner;

/// Where persisted collections live unless overridden.
const DEFAULT_DATA_DIR: &str = "trip_data";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = std::env::var("DIRECTIONS_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: DIRECTIONS_API_KEY not set. Requests will be denied.");
        String::new()
    });
    let data_dir = std::env::var("TRIP_PLANNER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
    let mode = match std::env::var("TRIP_PLANNER_MODE") {
        Ok(value) => match value.parse::<TravelMode>() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => TravelMode::default(),
    };

    let client = match DirectionsClient::new(DirectionsConfig::new(api_key)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create directions client");
            return ExitCode::FAILURE;
        }
    };

    let backend: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&data_dir));
    let planner = TripPlanner::new(client, recent_searches(backend.clone()));
    info!(data_dir = %data_dir.display(), mode = %mode, "Trip planner ready");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [origin, destination] = args.as_slice() else {
        println!("Usage: trip-planner <origin> <destination>");
        println!();
        println!("Recent searches:");
        for pair in planner.recent_searches().await {
            println!("  {pair}");
        }
        println!("Favorite stops:");
        for stop in favorite_stops(backend).load() {
            println!("  {} {}", stop.id, stop.name.as_deref().unwrap_or(""));
        }
        return ExitCode::SUCCESS;
    };

    let outcome = planner.search(origin, destination, mode).await;
    if outcome.routes.is_empty() {
        println!("No routes found from {origin} to {destination}.");
    }
    for (index, route) in outcome.routes.iter().enumerate() {
        println!("Route {} - {}", index + 1, route.total_duration);
        for step in &route.steps {
            match &step.transit_label {
                Some(line) => println!("  [{line}] {} ({})", step.instruction, step.distance),
                None => println!("  {} ({})", step.instruction, step.distance),
            }
        }
        if let Some(summary) = route.steps.first().map(|s| &s.transfer_summary) {
            println!("  {summary}");
        }
        println!();
    }

    ExitCode::SUCCESS
}
