use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use user_profiles::{UserProfiles, UserProfilesConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// User Profiles Server - CRUD over user profiles keyed by msisdn
#[derive(Parser)]
#[command(name = "profiles-server")]
#[command(about = "User Profiles Server - CRUD over user profiles keyed by msisdn")]
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

    /// Keep profiles in memory instead of MongoDB
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

    // home_dir is normalized and created while loading
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("User Profiles Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

fn bind_addr(config: &AppConfig) -> Result<SocketAddr> {
    let raw = format!("{}:{}", config.server.host, config.server.port);
    raw.parse()
        .with_context(|| format!("invalid bind address '{raw}'"))
}

fn ingress_config(config: &AppConfig) -> Result<ApiIngressConfig> {
    let mut cfg: ApiIngressConfig = config.module_config(api_ingress::MODULE_NAME)?;
    if config.server.timeout_sec > 0 {
        cfg.request_timeout_sec = config.server.timeout_sec;
    }
    Ok(cfg)
}

async fn build_module(config: &AppConfig, args: &CliArgs) -> Result<UserProfiles> {
    let cfg: UserProfilesConfig = config.module_config(user_profiles::MODULE_NAME)?;

    if args.mock {
        tracing::warn!("--mock set, profiles are kept in memory and lost on exit");
        return UserProfiles::in_memory(&cfg).await;
    }

    let db = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("database section missing (use --mock to run without MongoDB)"))?;
    tracing::info!("Connecting to MongoDB database '{}'", db.name);
    UserProfiles::connect(db, &cfg)
        .await
        .context("failed to initialize user_profiles")
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let addr = bind_addr(&config)?;
    let ingress = ApiIngress::new(ingress_config(&config)?);

    tracing::info!("Initializing modules...");
    let module = build_module(&config, &args).await?;

    let router = ingress.build_router(
        module.register_rest(axum::Router::new()),
        Some(module.openapi()),
    )?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = runtime::wait_for_shutdown().await {
            tracing::error!(error = %e, "shutdown signal handler failed");
        }
        signal_cancel.cancel();
    });

    let served = ingress.serve(router, addr, cancel).await;
    module.shutdown().await;
    tracing::info!("User Profiles Server stopped");
    served
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    if args.mock {
        tracing::info!("--mock set, skipping database checks");
    } else {
        config
            .database
            .as_ref()
            .ok_or_else(|| anyhow!("database section missing (use --mock to run without MongoDB)"))?
            .validate()?;
    }

    config.module_config::<UserProfilesConfig>(user_profiles::MODULE_NAME)?;
    ingress_config(&config)?;
    bind_addr(&config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
