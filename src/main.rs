//! Stagebook CLI - artist catalog data layer

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stagebook::filter::{CategoryFilter, FilterPatch};
use stagebook::http::{ApiState, HttpServer};
use stagebook::model::fixtures;
use stagebook::query::{documents, Classification};
use stagebook::source::{HttpSource, LocalSource};
use stagebook::{Catalog, Config, LoadOutcome, QueryRequest, Resolver};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagebook")]
#[command(about = "In-memory data layer for an artist booking site", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /api/artists
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a query document against the resolver
    Query {
        /// Query document text
        #[arg(required_unless_present = "preset")]
        document: Option<String>,

        /// Predefined document: artists, artist, by-category, by-location
        #[arg(long, conflicts_with = "document")]
        preset: Option<String>,

        /// Query variable as name=value
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Parse the document instead of matching on substrings
        #[arg(long)]
        parsed: bool,
    },

    /// Load the catalog and print the artists matching the filters
    Filter {
        /// Category, or "all"
        #[arg(long)]
        category: Option<CategoryFilter>,

        /// Location substring (case-insensitive)
        #[arg(long)]
        location: Option<String>,

        /// Lower end of the price span
        #[arg(long)]
        min: Option<u32>,

        /// Upper end of the price span
        #[arg(long)]
        max: Option<u32>,
    },

    /// Load the catalog and print the location and price facets
    Facets,

    /// Run the load sequence and report where the artists came from
    Load {
        /// Base URL of a running Stagebook server to fall back to
        #[arg(long)]
        fallback_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Query {
            document,
            preset,
            vars,
            parsed,
        } => run_query(&config, document, preset, vars, parsed).await,
        Commands::Filter {
            category,
            location,
            min,
            max,
        } => run_filter(&config, category, location, min, max).await,
        Commands::Facets => show_facets(&config).await,
        Commands::Load { fallback_url } => {
            let mut config = config;
            if fallback_url.is_some() {
                config.fallback_url = fallback_url;
            }
            run_load(&config).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

async fn serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    HttpServer::new(&config).start().await?;
    Ok(())
}

async fn run_query(
    config: &Config,
    document: Option<String>,
    preset: Option<String>,
    vars: Vec<(String, String)>,
    parsed: bool,
) -> anyhow::Result<()> {
    let document = match (document, preset) {
        (Some(document), _) => document,
        (None, Some(name)) => documents::preset(&name)
            .with_context(|| format!("unknown preset '{}'", name))?
            .to_string(),
        (None, None) => anyhow::bail!("either a document or --preset is required"),
    };

    let classification = if parsed {
        Classification::Parsed
    } else {
        Classification::Heuristic
    };
    let resolver = Resolver::new(fixtures::artists())
        .with_latency(config.latency.resolver())
        .with_classification(classification);

    let request = vars
        .into_iter()
        .fold(QueryRequest::new(document), |request, (name, value)| {
            request.variable(name, value)
        });

    let response = resolver.execute(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_filter(
    config: &Config,
    category: Option<CategoryFilter>,
    location: Option<String>,
    min: Option<u32>,
    max: Option<u32>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config).await?;

    let mut patch = FilterPatch::new();
    if let Some(category) = category {
        patch = patch.category(category);
    }
    if let Some(location) = location {
        patch = patch.location(location);
    }
    if min.is_some() || max.is_some() {
        let bounds = catalog.store().filters().price;
        patch = patch.price(min.unwrap_or(bounds.lo), max.unwrap_or(bounds.hi));
    }
    catalog.set_filters(patch)?;

    let view = catalog.settled().await;
    if view.artists.is_empty() {
        println!("No artists match.");
        return Ok(());
    }

    for artist in view.artists.iter() {
        let categories: Vec<_> = artist.categories.iter().map(|c| c.as_str()).collect();
        println!(
            "{:>4}  {:<20} {:<16} {:>5}-{:<5} {}",
            artist.id,
            artist.name,
            artist.location,
            artist.price_range.min,
            artist.price_range.max,
            categories.join(", ")
        );
    }
    println!();
    println!("{} of {} artist(s)", view.artists.len(), catalog.store().artists().len());
    Ok(())
}

async fn show_facets(config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(config).await?;
    let facets = catalog.store().facets();

    println!("Locations:");
    for location in &facets.locations {
        println!("  {}", location);
    }
    println!(
        "Price bounds: {} - {}",
        facets.price_bounds.lo, facets.price_bounds.hi
    );
    Ok(())
}

async fn run_load(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::new(config);
    let outcome = load(&catalog, config).await;

    match &outcome {
        LoadOutcome::Loaded { origin, count } => {
            println!("Loaded {} artist(s) from the {}.", count, origin);
        }
        LoadOutcome::Failed { reason } => {
            println!("Load failed: {}", reason);
        }
    }

    for note in catalog.store().notifications() {
        println!("[{}] {}", note.level, note.message);
    }
    Ok(())
}

async fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = Catalog::new(config);
    match load(&catalog, config).await {
        LoadOutcome::Loaded { .. } => Ok(catalog),
        LoadOutcome::Failed { reason } => anyhow::bail!("could not load artists: {}", reason),
    }
}

async fn load(catalog: &Catalog, config: &Config) -> LoadOutcome {
    match config.fallback_url() {
        Some(url) => catalog.load(&HttpSource::new(url)).await,
        None => {
            let state = ApiState::new(fixtures::artists(), config.latency.rest());
            catalog.load(&LocalSource::new(state)).await
        }
    }
}
