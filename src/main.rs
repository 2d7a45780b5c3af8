//! Aadhar appointment booking entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aadhar_booking::api::{create_router, metrics_router, AppState};
use aadhar_booking::client::{ui, BookingClient};
use aadhar_booking::config::Config;
use aadhar_booking::metrics;
use aadhar_booking::store;
use aadhar_booking::utils::shutdown_signal;

/// Aadhar appointment booking service and console client.
#[derive(Parser, Debug)]
#[command(name = "aadhar-booking")]
#[command(about = "Book Aadhar appointments and check their status")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP port the service listens on (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database path (overrides DATABASE_PATH).
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the booking API service (default).
    Serve {
        /// HTTP port the service listens on (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path (overrides DATABASE_PATH).
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Run the interactive console client.
    Ui,

    /// Look up the appointment booked under a mobile number.
    Status {
        /// Mobile number the appointment was booked under.
        mobile_number: String,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("aadhar_booking=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port, database }) => cmd_serve(port, database).await,
        Some(Command::Ui) => cmd_ui().await,
        Some(Command::Status { mobile_number }) => cmd_status(&mobile_number).await,
        Some(Command::CheckConfig) => cmd_check_config().await,
        None => cmd_serve(args.port, args.database).await,
    }
}

/// Run the booking API service.
async fn cmd_serve(
    port_override: Option<u16>,
    database_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(database) = database_override {
        config.database_path = database;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");

    // Install the Prometheus recorder backing /metrics
    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    // Create the appointment table up front so the first request cannot
    // race schema setup.
    store::open_database(&config.database_path)?;
    info!("Database ready at {}", config.database_path.display());

    // Create app state and router
    let app_state = AppState::new(config.database_path.clone());
    let router = create_router(app_state).merge(metrics_router(prometheus));

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run the interactive console client.
async fn cmd_ui() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = BookingClient::new(&config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    ui::run(&client, &mut input, &mut output).await?;
    Ok(())
}

/// Look up the appointment booked under a mobile number.
async fn cmd_status(mobile_number: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = BookingClient::new(&config);

    println!("======================================================================");
    println!("APPOINTMENT STATUS");
    println!("======================================================================");

    match client.appointment_status(mobile_number).await {
        Ok(report) => {
            println!("  Name: {}", report.name);
            println!("  Appointment date: {}", report.appointment_date);
        }
        Err(e) => {
            println!("  {}", e);
        }
    }

    println!("======================================================================");
    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AADHAR BOOKING - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Database: {}", config.database_path.display());
    println!("  API base URL: {}", config.api_base_url);
    println!("  Centers base URL: {}", config.centers_base_url);
    println!("  HTTP timeout: {}ms", config.http_timeout_ms);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
