use crate::helper::get_env_or;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use web3::contract::tokens::Tokenize;
use web3::contract::{Contract, Options};
use web3::signing::SecretKey;
use web3::types::{TransactionReceipt, H256, U256, U64};
use web3::Transport;

const ETH_CALL_GAS_LIMIT: u128 = 1000000;
const ETH_TRANSACTION_TYPE: u64 = 2;
const DEFAULT_CONFIRMATIONS_CNT: usize = 1;
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 300;

/// Type 2 transaction with a fixed gas limit.
pub fn get_options(gas_limit: u128) -> Options {
    Options {
        transaction_type: Some(U64::from(ETH_TRANSACTION_TYPE)),
        gas: Some(U256::from(gas_limit)),
        ..Default::default()
    }
}

/// How long and how deep to wait for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSettings {
    pub confirmations: usize,
    pub timeout: Duration,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            confirmations: DEFAULT_CONFIRMATIONS_CNT,
            timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
        }
    }
}

impl CallSettings {
    pub fn from_env() -> Self {
        Self {
            confirmations: get_env_or("ETH_CONFIRMATIONS_CNT", DEFAULT_CONFIRMATIONS_CNT),
            timeout: Duration::from_secs(get_env_or(
                "TX_CONFIRMATION_TIMEOUT_SECS",
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )),
        }
    }
}

/// Await `fut`, failing with a descriptive error if it does not finish within `limit`.
pub async fn wait_with_timeout<F, T, E>(what: &str, limit: Duration, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(|e| anyhow::format_err!("Failed to {what}: {e}")),
        Err(_) => anyhow::bail!("Timed out after {}s waiting to {what}", limit.as_secs()),
    }
}

pub fn check_receipt_status(
    function: &str,
    tx_hash: H256,
    status: Option<U64>,
) -> anyhow::Result<()> {
    match status {
        Some(status) if status.is_zero() => {
            anyhow::bail!("Transaction {tx_hash:?} calling {function} reverted")
        }
        _ => Ok(()),
    }
}

/// Sign and send a contract call, then wait for the configured number of confirmations.
pub async fn call_function<T, P>(
    contract: &Contract<T>,
    key: &SecretKey,
    function: &str,
    params: P,
    settings: &CallSettings,
) -> anyhow::Result<TransactionReceipt>
where
    T: Transport,
    P: Tokenize,
{
    tracing::info!("Call ETH contract function {function}");

    let receipt = wait_with_timeout(
        &format!("confirm {function}"),
        settings.timeout,
        contract.signed_call_with_confirmations(
            function,
            params,
            get_options(ETH_CALL_GAS_LIMIT),
            settings.confirmations,
            key,
        ),
    )
    .await?;
    tracing::info!(
        "ETH call result: {}",
        web3::helpers::to_string(&receipt.transaction_hash)
    );
    check_receipt_status(function, receipt.transaction_hash, receipt.status)?;
    Ok(receipt)
}
