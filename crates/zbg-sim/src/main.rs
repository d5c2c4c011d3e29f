mod config;
mod scenario;

use std::time::Duration;

use config::SimConfig;
use scenario::Scenario;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "glassbreak.toml".into());
    let config = match SimConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "zbg-sim v{} (seed {}, {} zombies of type {})",
        env!("CARGO_PKG_VERSION"),
        config.simulation.seed,
        config.scenario.zombie_count,
        config.scenario.zombie_type
    );
    info!(
        "Glass: {} ticks to break, detection {} blocks, reach {} blocks",
        config.glass_break.break_ticks,
        config.glass_break.detection_range,
        config.glass_break.glass_break_range
    );

    let mut scenario = match Scenario::build(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build scenario: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Player {} is inside; zombies {:?} are outside",
        scenario.player, scenario.zombies
    );

    if config.simulation.realtime {
        run_realtime(&mut scenario, &config).await;
    } else {
        for _ in 0..config.simulation.max_ticks {
            scenario.step();
        }
    }

    scenario.log_summary();
}

/// Tick at a fixed rate until `max_ticks` (if set) or Ctrl+C.
async fn run_realtime(scenario: &mut Scenario, config: &SimConfig) {
    let max_ticks = config.simulation.max_ticks;
    let mut tick_interval =
        tokio::time::interval(Duration::from_millis(config.simulation.tick_millis));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                scenario.step();
                if scenario.stats.ticks % 100 == 0 {
                    info!(
                        "Tick {}: {}/{} windows intact",
                        scenario.stats.ticks,
                        scenario.windows_intact(),
                        scenario.windows.len()
                    );
                }
                if max_ticks > 0 && scenario.stats.ticks >= max_ticks {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}
