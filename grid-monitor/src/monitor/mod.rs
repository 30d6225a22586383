use common::eth::create_web3_http;
use common::eth::helper::{format_units, tx_link, unix_now};
use std::sync::Arc;
use std::time::Duration;
use web3::types::H256;

use crate::bounty::{BountyChain, BountyParameters, Web3BountyChain, TOKEN_DECIMALS};
use crate::carbon::{CarbonReading, CarbonSource, ElectricityMaps};
use crate::config::MonitorConfig;

mod schedule;

pub use schedule::run_every;

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Stable {
        reading: CarbonReading,
    },
    BountyCreated {
        reading: CarbonReading,
        approval_tx: H256,
        bounty_tx: H256,
    },
}

/// Action is taken only when the reading is strictly above the threshold.
pub fn exceeds_threshold(intensity: f64, threshold: f64) -> bool {
    intensity > threshold
}

pub struct GridMonitor {
    carbon: Arc<dyn CarbonSource>,
    chain: Arc<dyn BountyChain>,
    threshold: f64,
    explorer_tx_url: String,
}

impl GridMonitor {
    pub fn new(
        carbon: Arc<dyn CarbonSource>,
        chain: Arc<dyn BountyChain>,
        threshold: f64,
        explorer_tx_url: String,
    ) -> Self {
        Self {
            carbon,
            chain,
            threshold,
            explorer_tx_url,
        }
    }

    /// Build the RPC connection, signer, contract proxies and the carbon API client.
    pub async fn connect(config: &MonitorConfig) -> anyhow::Result<Self> {
        let web3s = create_web3_http(&config.rpc_url)?;
        let chain = Web3BountyChain::new(
            &web3s,
            config.token_address,
            config.bounty_address,
            config.secret,
            config.call,
        )?;
        tracing::info!("Wallet address: {:?}", chain.wallet());
        chain.log_token_data().await;

        let carbon = ElectricityMaps::new(
            &config.api_url,
            &config.zone,
            &config.api_token,
            config.http_timeout,
        )?;

        Ok(Self::new(
            Arc::new(carbon),
            Arc::new(chain),
            config.threshold,
            config.explorer_tx_url.clone(),
        ))
    }

    pub async fn run_cycle(&self) -> anyhow::Result<CycleOutcome> {
        tracing::info!("Checking grid status");
        let reading = self.carbon.latest().await?;
        tracing::info!(
            "Carbon intensity in {}: {} gCO2eq/kWh ({})",
            reading.zone,
            reading.intensity,
            reading.datetime.as_deref().unwrap_or("no timestamp")
        );

        if !exceeds_threshold(reading.intensity, self.threshold) {
            tracing::info!("Grid stable, no action needed");
            return Ok(CycleOutcome::Stable { reading });
        }

        tracing::warn!(
            "High carbon intensity detected ({} > {}), creating bounty",
            reading.intensity,
            self.threshold
        );
        let params = BountyParameters::at(unix_now());

        tracing::info!(
            "Approving {} tokens for the bounty contract",
            format_units(params.total_budget, TOKEN_DECIMALS)
        );
        let approval_tx = self
            .chain
            .approve(params.total_budget)
            .await
            .map_err(|e| anyhow::format_err!("Failed to approve bounty budget: {e}"))?;
        tracing::info!("Approval confirmed, tx: {approval_tx:?}");

        tracing::info!(
            "Creating bounty: reward {} per kWh, budget {}, deadline {}",
            format_units(params.reward_per_unit, TOKEN_DECIMALS),
            format_units(params.total_budget, TOKEN_DECIMALS),
            params.deadline
        );
        let bounty_tx = self
            .chain
            .create_bounty(&params)
            .await
            .map_err(|e| anyhow::format_err!("Failed to create bounty: {e}"))?;

        tracing::info!("Bounty created, tx: {bounty_tx:?}");
        tracing::info!("View: {}", tx_link(&self.explorer_tx_url, &bounty_tx));

        Ok(CycleOutcome::BountyCreated {
            reading,
            approval_tx,
            bounty_tx,
        })
    }

    /// Run one cycle, logging and swallowing any error so the schedule keeps going.
    pub async fn check_grid(&self) -> Option<CycleOutcome> {
        match self.run_cycle().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!("Grid check failed: {e}");
                None
            }
        }
    }

    pub async fn run_forever(&self, period: Duration) {
        tracing::info!("Checking grid every {}s", period.as_secs());
        run_every(period, || async {
            self.check_grid().await;
        })
        .await
    }
}
