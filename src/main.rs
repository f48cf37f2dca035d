//! Bibchecker - library availability checker
//!
//! `check` runs one extraction batch and prints a plain-text report,
//! `serve` publishes the JSON API and refreshes the report daily.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibchecker::{
    api,
    cli::{CheckArgs, Cli, Command},
    config::{AppConfig, LoggingConfig},
    models::BatchOutcome,
    services::{cache, filters, input, output, scheduler, Services},
    sources, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    let services = Services::new(&config)?;

    match cli.command {
        Command::Check(args) => check(&config, &services, args).await,
        Command::Serve => serve(config, services).await,
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bibchecker={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn check(config: &AppConfig, services: &Services, args: CheckArgs) -> anyhow::Result<()> {
    let input_file = args
        .input
        .clone()
        .unwrap_or_else(|| config.catalog.input_file.clone());

    let ids: Vec<String> = if args.ids.is_empty() {
        input::load_input(&input_file)
            .await?
            .into_iter()
            .map(|line| line.id)
            .collect()
    } else {
        args.ids.iter().map(|id| sources::normalize(id)).collect()
    };

    let outcome: BatchOutcome = services.extraction.run_batch(&ids).await.into_iter().collect();
    for failure in &outcome.failures {
        eprintln!("cannot check {}: {}", failure.id, failure.reason);
    }

    if args.save_cache {
        cache::save(&config.catalog.cache_file, &outcome.entries).await?;
    }
    if args.update_input {
        input::update_input_file(&input_file, &outcome.entries).await?;
    }

    let entries = filters::filter_entries(outcome.entries, &args.filter_options());
    let stdout = std::io::stdout();
    output::write_plain(&mut stdout.lock(), &entries, args.sort)?;

    Ok(())
}

async fn serve(config: AppConfig, services: Services) -> anyhow::Result<()> {
    tracing::info!("Starting Bibchecker v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = services.refresh.seed_from_cache().await {
        tracing::warn!("Ignoring unreadable cache: {}", e);
    }

    scheduler::spawn_daily_refresh(services.refresh.clone(), config.catalog.refresh_time());

    // Save server address before moving config
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
