mod bounty;
mod carbon;
mod config;
mod monitor;

use crate::config::MonitorConfig;
use crate::monitor::{CycleOutcome, GridMonitor};
use common::helper::tracing::init_default_tracing;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load env variables from '.env' file
    dotenv::dotenv().ok();
    // Init tracing in level specified with env 'GRID_LOG' or "info" level by default
    init_default_tracing();

    let args: Vec<String> = env::args().collect();
    let run_once = match args.len() {
        1 => false,
        2 if args[1] == "once" => true,
        _ => anyhow::bail!("Unknown subcommand, usage: grid-monitor [once]"),
    };

    let config = MonitorConfig::from_env()?;
    tracing::info!("Grid monitor started");
    tracing::info!("Monitoring: {}", config.zone);
    tracing::info!("Bounty contract: {:?}", config.bounty_address);

    let monitor = GridMonitor::connect(&config).await?;
    if run_once {
        match monitor.run_cycle().await? {
            CycleOutcome::Stable { reading } => {
                tracing::info!("Grid stable at {} gCO2eq/kWh", reading.intensity);
            }
            CycleOutcome::BountyCreated {
                reading,
                approval_tx,
                bounty_tx,
            } => {
                tracing::info!(
                    "Bounty created at {} gCO2eq/kWh, approval tx {approval_tx:?}, bounty tx {bounty_tx:?}",
                    reading.intensity
                );
            }
        }
    } else {
        monitor.run_forever(config.interval).await;
    }
    Ok(())
}
