use std::path::PathBuf;

use anyhow::{Context, Result};

use regime_rotation::config::Config;
use regime_rotation::replay::{self, Dataset};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let dataset_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/replay.json"));

    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(dataset = %dataset_path.display(), "Starting replay");
    let dataset = Dataset::load(&dataset_path)?;
    let summary = replay::run(&config, dataset).context("replay failed")?;

    println!(
        "days={} regime_signals={} rotation_cycles={} aborted_cycles={} fills={} final_equity={:.2}",
        summary.days,
        summary.regime_signals,
        summary.rotation_cycles,
        summary.aborted_cycles,
        summary.fills,
        summary.final_equity
    );
    Ok(())
}
