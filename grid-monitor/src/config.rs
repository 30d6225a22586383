use common::eth::{get_contract_address, get_secret, CallSettings};
use common::helper::{get_env, get_env_or};
use std::time::Duration;
use web3::signing::SecretKey;
use web3::types::Address;

use crate::carbon::{DEFAULT_CARBON_API_URL, DEFAULT_ZONE};

const DEFAULT_CARBON_THRESHOLD: f64 = 400.0;
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_EXPLORER_TX_URL: &str = "https://sepolia.etherscan.io/tx/";

pub struct MonitorConfig {
    pub rpc_url: String,
    pub secret: SecretKey,
    pub token_address: Address,
    pub bounty_address: Address,
    pub api_token: String,
    pub api_url: String,
    pub zone: String,
    pub threshold: f64,
    pub interval: Duration,
    pub http_timeout: Duration,
    pub call: CallSettings,
    pub explorer_tx_url: String,
}

impl MonitorConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let rpc_url = get_env("RPC_URL")?;
        let secret = get_secret()?;
        let bounty_address = get_contract_address("CONTRACT_ADDRESS")?;
        let token_address = get_contract_address("USDC_ADDRESS")?;
        let api_token = get_env("ELECTRICITYMAPS_TOKEN")?;

        let interval_secs = get_env_or("CHECK_INTERVAL_SECS", DEFAULT_CHECK_INTERVAL_SECS);
        if interval_secs == 0 {
            anyhow::bail!("CHECK_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            rpc_url,
            secret,
            token_address,
            bounty_address,
            api_token,
            api_url: get_env_or("CARBON_API_URL", DEFAULT_CARBON_API_URL.to_string()),
            zone: get_env_or("GRID_ZONE", DEFAULT_ZONE.to_string()),
            threshold: get_env_or("CARBON_THRESHOLD", DEFAULT_CARBON_THRESHOLD),
            interval: Duration::from_secs(interval_secs),
            http_timeout: Duration::from_secs(get_env_or(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            call: CallSettings::from_env(),
            explorer_tx_url: get_env_or("EXPLORER_TX_URL", DEFAULT_EXPLORER_TX_URL.to_string()),
        })
    }
}
