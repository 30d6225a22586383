use crate::helper::get_env;
use std::str::FromStr;
use web3::signing::SecretKey;
use web3::transports::Http;
use web3::types::Address;
use web3::Web3;

mod call;
pub mod helper;
pub mod token;

pub use call::{
    call_function, check_receipt_status, get_options, wait_with_timeout, CallSettings,
};

pub fn create_web3_http(eth_endpoint: &str) -> anyhow::Result<Web3<Http>> {
    let http = Http::new(eth_endpoint)
        .map_err(|e| anyhow::format_err!("Failed to create http transport: {e}"))?;
    tracing::info!("Created ETH http transport");
    Ok(Web3::new(http))
}

pub fn get_secret() -> anyhow::Result<SecretKey> {
    let key = get_env("PRIVATE_KEY")?;
    parse_secret(&key)
}

pub fn parse_secret(key: &str) -> anyhow::Result<SecretKey> {
    SecretKey::from_str(key.trim().trim_start_matches("0x"))
        .map_err(|e| anyhow::format_err!("Failed to load private key: {e}"))
}

pub fn get_contract_address(env_name: &str) -> anyhow::Result<Address> {
    let address = get_env(env_name)?.to_lowercase();
    tracing::info!("{env_name}: {address}");
    Address::from_str(&address)
        .map_err(|e| anyhow::format_err!("Failed to convert {env_name} to eth address: {e}"))
}
