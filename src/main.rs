//! Example host binary: wires a sine→gain demo graph into the scheduler and
//! plays it through the default output device via [`aurora_engine::audio::cpal_device`].
//! Everything here is collaborator glue (§1 Non-goals) — card selection,
//! CLI flags, config loading — not part of the CORE the crate exists to
//! validate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aurora_engine::audio::cpal_device::CpalOutput;
use aurora_engine::config::EngineConfig;
use aurora_engine::scheduler::{build_sine_gain_demo, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "aurora-engine", about = "Sine -> gain demo host for the Aurora audio engine")]
struct Cli {
    /// Path to a TOML config file (sample_rate, block_size, channels, format).
    #[arg(long)]
    config: Option<String>,

    /// Oscillator frequency in Hz.
    #[arg(long, default_value_t = 440.0)]
    freq: f32,

    /// Linear output gain.
    #[arg(long, default_value_t = 0.2)]
    gain: f32,

    /// How long to play before exiting.
    #[arg(long, default_value_t = 5)]
    seconds: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let scheduler = Arc::new(Mutex::new(Scheduler::new()));
    {
        let mut sched = scheduler.lock().unwrap();
        build_sine_gain_demo(&mut sched, cli.freq, cli.gain);
    }

    let output = CpalOutput::new(scheduler, config.block_size)?;
    tracing::info!(
        sample_rate = output.sample_rate(),
        channels = output.channels(),
        freq = cli.freq,
        gain = cli.gain,
        "playing"
    );

    std::thread::sleep(Duration::from_secs(cli.seconds));
    Ok(())
}
