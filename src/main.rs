//! Greeting API server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hello_api::api::{create_router, AppState};
use hello_api::config::{Config, VERBOSE_LOG_DIRECTIVES};
use hello_api::metrics;
use hello_api::utils::shutdown_signal;

/// Greeting API server.
#[derive(Parser, Debug)]
#[command(name = "hello-api")]
#[command(about = "HTTP API serving sanitized, localized greetings and usage statistics")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so the format can follow APP_ENV
    let config = Config::load();
    let (directives, json) = match &config {
        Ok(c) => (c.log_directives(args.verbose), c.app_env.is_production()),
        Err(_) if args.verbose => (VERBOSE_LOG_DIRECTIVES, false),
        Err(_) => ("info", false),
    };
    init_tracing(directives, json);

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

fn init_tracing(directives: &str, json: bool) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("Invalid RUST_LOG directives {directives:?}: {e}; using info");
        EnvFilter::new("info")
    });

    let (json_layer, plain_layer) = if json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .init();
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HELLO API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.app_env.as_str());
    println!("  Port: {}", config.port);
    println!("  Version: {}", config.version());
    println!("  Greeting Delay: {}ms", config.greeting_delay_ms);
    println!("  Body Limit: {} bytes", config.body_limit_bytes);
    println!("  CORS Origins: {}", config.cors_origins().join(", "));
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Environment: {}", config.app_env.as_str());
    info!("Version: {}", config.version());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let mut app_state = AppState::new(config);

    // Initialize metrics
    match metrics::install_prometheus() {
        Ok(handle) => app_state = app_state.with_prometheus(handle),
        Err(e) => warn!("Prometheus recorder unavailable, /metrics disabled: {}", e),
    }

    let router = create_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("API: http://localhost:{}/api", addr.port());
    info!("Health: http://localhost:{}/health", addr.port());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server closed.");
    Ok(())
}
