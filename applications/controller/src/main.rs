/// Chime Controller - scheduled unattended playback
use anyhow::Context;
use chime_controller::{
    run, Controller, ControllerConfig, MqttSettings, SimulatedDecoder, WifiSettings,
    DEFAULT_CONFIG_PATH,
};
use chime_core::SystemClock;
use chime_scheduler::Schedule;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chime-controller")]
#[command(about = "Plays music from a memory-card style library on a daily schedule", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the control loop until Ctrl-C
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Parse the schedule and print the task table
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chime_controller=info,chime_playback=info,chime_scheduler=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            let config = load_config(&config)?;
            serve(config).await?;
        }
        Commands::Check { config } => {
            let config = load_config(&config)?;
            check(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<ControllerConfig> {
    let config = ControllerConfig::load(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

async fn serve(config: ControllerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Chime controller");
    tracing::info!("Schedule: {}", config.schedule_path.display());
    tracing::info!("Music root: {}", config.decoder.music_root.display());

    log_connectivity(&config.settings_dir)?;

    let decoder = SimulatedDecoder::new(
        config.decoder.music_root.clone(),
        config.track_length(),
        SystemClock,
    );
    let controller = Controller::new(decoder, SystemClock, &config);
    tracing::info!(
        tasks = controller.scheduler().schedule().len(),
        "Scheduler armed"
    );

    run(controller, config.tick_interval()).await
}

/// Report which credential files are present; connecting is out of scope
fn log_connectivity(dir: &Path) -> anyhow::Result<()> {
    match WifiSettings::load(dir)? {
        Some(wifi) => tracing::info!(ssid = %wifi.ssid, "Wi-Fi settings present"),
        None => tracing::info!("No Wi-Fi settings"),
    }
    match MqttSettings::load(dir)? {
        Some(mqtt) => tracing::info!(
            host = %mqtt.hostname,
            port = mqtt.port,
            "MQTT settings present"
        ),
        None => tracing::info!("No MQTT settings"),
    }
    Ok(())
}

fn check(config: &ControllerConfig) -> anyhow::Result<()> {
    let path = &config.schedule_path;
    let bytes =
        std::fs::read(path).with_context(|| format!("reading schedule {}", path.display()))?;
    let (schedule, skipped) = Schedule::parse_with_report(&String::from_utf8_lossy(&bytes));

    println!("{} task(s) in {}", schedule.len(), path.display());
    for (slot, task) in schedule.tasks() {
        println!("  [{slot:2}] {task}");
    }

    if !skipped.is_empty() {
        println!("{} line(s) skipped:", skipped.len());
        for skip in &skipped {
            println!("  line {}: {} ({})", skip.line, skip.text, skip.error);
        }
    }
    Ok(())
}
