mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use routeplan_client::{BackendClient, DirectProvider, Orchestrator, Providers, RouteInput};
use routeplan_core::{AnalyticsSeries, AppConfig, TravelMode, UnitSystem};
use routeplan_graphhopper::GraphHopperClient;
use tracing_subscriber::EnvFilter;

use crate::render::TerminalRenderer;

type Terminal = Orchestrator<TerminalRenderer<std::io::Stdout>>;

#[derive(Debug, Parser)]
#[command(name = "routeplan")]
#[command(about = "Plan routes between named places")]
struct Cli {
    /// Call GraphHopper directly instead of going through the backend.
    /// Favorites and analytics always use the backend.
    #[arg(long, global = true)]
    direct: bool,

    /// Overrides `ROUTEPLAN_BACKEND_URL`.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find and display a route.
    Route {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// car, bike or foot
        #[arg(long, default_value = "car")]
        vehicle: TravelMode,
        /// km or mi
        #[arg(long, default_value = "km")]
        unit: UnitSystem,
        /// Highlight instruction N (1-based) after displaying the route.
        #[arg(long)]
        highlight: Option<usize>,
        /// Save the displayed route as a favorite under this name.
        #[arg(long)]
        save: Option<String>,
    },
    /// Resolve a place name to coordinates.
    Geocode { place: String },
    /// Place-name suggestions for a partial query.
    Suggest { prefix: String },
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Most requested routes and vehicle usage.
    Analytics,
}

#[derive(Debug, Subcommand)]
enum FavoritesCommands {
    List,
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = routeplan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("routeplan: try `routeplan route --from <PLACE> --to <PLACE>`");
        return Ok(ExitCode::SUCCESS);
    };

    let orchestrator = build_orchestrator(&config, cli.direct, cli.backend_url.as_deref())?;

    match command {
        Commands::Route {
            from,
            to,
            vehicle,
            unit,
            highlight,
            save,
        } => {
            let input = RouteInput::new(from, to).with_mode(vehicle).with_unit(unit);
            return run_route(&orchestrator, &input, highlight, save.as_deref()).await;
        }
        Commands::Geocode { place } => {
            let point = orchestrator.resolve_place(&place).await?;
            println!(
                "{} ({:.5}, {:.5})",
                point.display_name, point.latitude, point.longitude
            );
        }
        Commands::Suggest { prefix } => {
            let suggestions = orchestrator.suggest_places(&prefix).await?;
            if suggestions.is_empty() {
                println!("no suggestions");
            }
            for suggestion in suggestions {
                println!("{suggestion}");
            }
        }
        Commands::Favorites { command } => match command {
            FavoritesCommands::List => list_favorites(&orchestrator).await?,
            FavoritesCommands::Delete { id } => {
                orchestrator.delete_favorite(id).await?;
                println!("deleted favorite #{id}");
            }
        },
        Commands::Analytics => {
            orchestrator.load_analytics().await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn build_orchestrator(
    config: &AppConfig,
    direct: bool,
    backend_url: Option<&str>,
) -> anyhow::Result<Terminal> {
    let backend_url = backend_url.unwrap_or(&config.backend_url);
    let backend = Arc::new(BackendClient::new(
        backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?);

    let providers = if direct {
        let api_key = config
            .graphhopper_api_key
            .as_deref()
            .context("GRAPHHOPPER_API_KEY must be set to use --direct")?;
        let graphhopper = GraphHopperClient::with_base_url(
            api_key,
            config.upstream_timeout_secs,
            &config.graphhopper_base_url,
        )?
        .with_country(config.geocode_country.clone());
        Providers::direct(Arc::new(DirectProvider::new(graphhopper)), backend)
    } else {
        Providers::backend(backend)
    };
    tracing::debug!(direct, backend_url, "orchestrator ready");

    Ok(
        Orchestrator::new(providers, TerminalRenderer::new(std::io::stdout()))
            .with_timeout(Duration::from_secs(config.request_timeout_secs)),
    )
}

/// Submits one route request. Failures have already been printed by the
/// renderer, so they only set the exit code.
async fn run_route(
    orchestrator: &Terminal,
    input: &RouteInput,
    highlight: Option<usize>,
    save: Option<&str>,
) -> anyhow::Result<ExitCode> {
    if orchestrator.submit(input).await.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(step) = highlight {
        let index = step
            .checked_sub(1)
            .context("step numbers start at 1")?;
        orchestrator.highlight_instruction(index)?;
    }

    if let Some(name) = save {
        let id = orchestrator.save_favorite(name).await?;
        println!("saved favorite #{id} \"{}\"", name.trim());
    }

    Ok(ExitCode::SUCCESS)
}

async fn list_favorites(orchestrator: &Terminal) -> anyhow::Result<()> {
    let favorites = orchestrator.list_favorites().await?;
    if favorites.is_empty() {
        println!("no favorites saved yet; use `route --save <NAME>`");
        return Ok(());
    }

    println!(
        "{:<6}{:<20}{:<38}{:<8}{:<12}{:<14}SAVED",
        "ID", "NAME", "ROUTE", "VEHICLE", "DISTANCE", "TIME"
    );
    for favorite in &favorites {
        let route = AnalyticsSeries::route_label(&favorite.origin, &favorite.destination);
        let saved = favorite
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{:<6}{:<20}{:<38}{:<8}{:<12}{:<14}{}",
            favorite.id,
            favorite.name,
            route,
            favorite.vehicle.as_deref().unwrap_or("-"),
            favorite.distance,
            favorite.time,
            saved
        );
    }
    Ok(())
}
