//! fxpulse Simulator
//!
//! Headless driver for the simulated FX rate feed.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fxpulse_common::DurationExt;
use fxpulse_feed::{FeedConfig, RateFeed};

mod driver;
mod metrics;
mod scenario;

use driver::ScenarioDriver;
use scenario::Scenario;

/// fxpulse Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "fxpulse feed driving environment")]
struct Args {
    /// Scenario to run (continuous mode when omitted)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Simulation speed multiplier
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Run duration in seconds (0 = infinite)
    #[arg(long, default_value = "0")]
    duration: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.speed > 0.0, "speed must be positive");

    info!("Starting fxpulse Simulator");
    info!("Speed: {}x", args.speed);

    let mut config = FeedConfig {
        seed: args.seed,
        ..Default::default()
    };
    if args.speed != 1.0 {
        let scaled = config.tick_interval.as_std().div_f64(args.speed);
        config.tick_interval = chrono::Duration::from_std(scaled)?;
    }

    let feed = RateFeed::spawn(config)?;
    let mut driver = ScenarioDriver::new(feed, args.speed, args.seed);

    if let Some(name) = &args.scenario {
        let scenario = Scenario::load(name)?;
        info!("Running scenario: {} - {}", scenario.name, scenario.description);
        driver.run(scenario).await?;
    } else {
        info!("Running in continuous mode");
        info!("Press Ctrl+C to stop");

        let duration = (args.duration > 0).then(|| std::time::Duration::from_secs(args.duration));
        driver.continuous(duration).await?;
    }

    let metrics = driver.finish().await?;
    metrics.summarize();

    Ok(())
}
