use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};

use tracking::api::rest::routes::build_router;
use tracking::config::TrackingConfig;
use tracking::domain::ports::{PeopleDirectory, TaskRepository, UserRepository};
use tracking::domain::{TaskService, UserService, UserServiceConfig};
use tracking::infra::people::{FixedPeopleDirectory, HttpPeopleDirectory};
use tracking::infra::storage::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use tracking::infra::storage::postgres::{self, PgTaskRepository, PgUserRepository};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Time Tracker Server - user work-session tracking
#[derive(Parser)]
#[command(name = "timetrack-server")]
#[command(about = "Time Tracker Server - user work-session tracking")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run with in-memory storage and a canned people directory
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new("."));
    tracing::info!("Time Tracker Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(&config),
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let tracking_config: TrackingConfig = config.module_config("tracking")?;

    let (user_repo, task_repo, people): (
        Arc<dyn UserRepository>,
        Arc<dyn TaskRepository>,
        Arc<dyn PeopleDirectory>,
    ) = if args.mock {
        tracing::warn!("Running with in-memory storage (--mock)");
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(FixedPeopleDirectory::default()),
        )
    } else {
        let db_config = config
            .database
            .clone()
            .ok_or_else(|| anyhow!("Database URL not configured"))?;

        tracing::info!("Connecting to database");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(db_config.max_conns.unwrap_or(10))
            .acquire_timeout(Duration::from_secs(db_config.acquire_timeout_sec.unwrap_or(5)))
            .connect(&db_config.url)
            .await?;

        tracing::info!("Running migrations");
        postgres::run_migrations(&pool).await?;

        if tracking_config.people_api.base_url.trim().is_empty() {
            return Err(anyhow!("People API base URL not configured (modules.tracking.people_api.base_url)"));
        }
        let people = HttpPeopleDirectory::from_config(&tracking_config.people_api)?;

        (
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            Arc::new(people),
        )
    };

    let users = Arc::new(UserService::new(
        user_repo,
        people,
        UserServiceConfig {
            default_page_size: tracking_config.default_page_size,
            max_page_size: tracking_config.max_page_size,
        },
    ));
    let tasks = Arc::new(TaskService::new(task_repo, users.clone()));

    let router = build_router(users, tasks, &config.app.name);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                return;
            }
        };
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
            _ = tokio::signal::ctrl_c() => tracing::info!("Received Ctrl+C"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    }
}
