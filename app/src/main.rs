// In app/src/main.rs

use std::sync::Arc;

use anyhow::Result;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::Notification;
use engine::{CycleReport, IntervalTicker, MarketScanner, ScanScheduler};
use indicators::MACrossover;
use notifier::{InMemorySink, NotificationSink, PostgresSink, SignalNotifier};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Scans a fixed set of Binance spot markets for moving-average crossovers and records buy/sell signals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the periodic scanner together with the web server until Ctrl-C.
    Run,

    /// Runs a single scan cycle over the configured assets and exits.
    Scan {
        /// Keep signals in memory instead of writing them to the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Prints the most recent stored notifications.
    Notifications {
        /// How many notifications to show.
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    // Settings come first: the log level lives in them.
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting market scanner application");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Run => run_app(settings).await?,
        Commands::Scan { dry_run } => handle_scan(settings, dry_run).await?,
        Commands::Notifications { limit } => handle_notifications(settings, limit).await?,
    }

    tracing::info!("Market scanner application has finished successfully.");

    Ok(())
}

fn init_tracing(log_level: &str) {
    let default_level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN) // Disable sqlx query debug logs
            .with_default(default_level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    if log_level.parse::<tracing::Level>().is_err() {
        tracing::warn!(log_level, "Unknown log level in settings; falling back to INFO.");
    }
}

/// Wires the data source, strategy and notifier into a scanner.
fn build_scanner(settings: &Settings, sink: Arc<dyn NotificationSink>) -> Result<MarketScanner> {
    let api_client = api_client::new(&settings.binance)?;
    let strategy = MACrossover::new(settings.strategies.ma_crossover)?;

    Ok(MarketScanner::new(
        &settings.scanner,
        Arc::new(api_client),
        Arc::new(strategy),
        SignalNotifier::new(sink),
    ))
}

// --- "Run" Subcommand Logic ---

/// Starts the scan scheduler and the web server.
/// Runs until Ctrl-C or until the web server terminates.
async fn run_app(settings: Settings) -> Result<()> {
    // --- 1. Initialization ---
    let db = database::connect(&settings.database).await?;
    tracing::info!("Database connection established and migrations are up-to-date.");

    // --- 2. Component Instantiation ---
    let sink = Arc::new(PostgresSink::new(db.clone()));
    let scanner = Arc::new(build_scanner(&settings, sink)?);

    tracing::info!(
        assets = scanner.assets().len(),
        scan_interval_secs = settings.scanner.scan_interval_secs,
        interval = %settings.scanner.interval,
        "Scanner configured."
    );

    // --- 3. Launch Concurrent Tasks ---
    let scheduler =
        ScanScheduler::new(scanner, IntervalTicker::new(settings.scanner.scan_interval())).start();

    let server_handle = tokio::spawn(web_server::run(settings.server.clone(), db));

    // Wait for either a shutdown request or the web server to die.
    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutdown requested; waiting for the running scan cycle to finish.");
            Ok(())
        }
        server_result = server_handle => {
            tracing::error!(?server_result, "Web server task has terminated unexpectedly.");
            Err(anyhow::anyhow!("The web server terminated. Shutting down."))
        }
    };

    scheduler.stop().await;
    outcome
}

// --- "Scan" Subcommand Logic ---

/// Runs one cycle and prints what it found.
async fn handle_scan(settings: Settings, dry_run: bool) -> Result<()> {
    let sink: Arc<dyn NotificationSink> = if dry_run {
        tracing::info!("Dry run: signals are kept in memory only.");
        Arc::new(InMemorySink::new())
    } else {
        let db = database::connect(&settings.database).await?;
        Arc::new(PostgresSink::new(db))
    };

    let scanner = build_scanner(&settings, sink)?;
    let report = scanner.run_cycle().await;
    print_report(&report);

    Ok(())
}

fn print_report(report: &CycleReport) {
    println!("\n--- Scan Cycle Complete ---");
    println!(
        "Scanned: {} | Signals: {} | Skipped: {} | Took: {:.1?}",
        report.scanned,
        report.notifications.len(),
        report.failures.len(),
        report.duration
    );

    if !report.notifications.is_empty() {
        println!("\nSignals:");
        for notification in &report.notifications {
            print_notification(notification);
        }
    }

    if !report.failures.is_empty() {
        println!("\nSkipped assets:");
        for failure in &report.failures {
            println!("  - {} [{}]: {}", failure.asset, failure.stage, failure.error);
        }
    }
}

fn print_notification(notification: &Notification) {
    println!(
        "  #{} {} {} {} @ {} ({})",
        notification.id,
        notification.created_at.format("%Y-%m-%d %H:%M:%S"),
        notification.asset,
        notification.signal.as_str().to_uppercase(),
        notification.price_at_signal,
        notification.indicator
    );
    println!("      {}", notification.reason);
}

// --- "Notifications" Subcommand Logic ---

async fn handle_notifications(settings: Settings, limit: u32) -> Result<()> {
    let db = database::connect(&settings.database).await?;
    let notifications = db.get_recent_notifications(limit).await?;

    if notifications.is_empty() {
        println!("No notifications recorded yet.");
        return Ok(());
    }

    println!("--- Latest {} Notifications ---", notifications.len());
    for notification in &notifications {
        print_notification(notification);
    }

    Ok(())
}
