use common::eth::{get_options, wait_with_timeout, CallSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use web3::contract::tokens::Tokenize;
use web3::contract::Contract;
use web3::signing::SecretKey;
use web3::transports::Http;
use web3::types::Address;
use web3::Web3;

const ETH_DEPLOY_GAS_LIMIT: u128 = 5000000;

/// Compiled contract as written by hardhat under `artifacts/contracts/<Name>.sol/<Name>.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl Artifact {
    pub fn parse(data: &str) -> anyhow::Result<Self> {
        let artifact: Artifact = serde_json::from_str(data)
            .map_err(|e| anyhow::format_err!("Failed to decode contract artifact: {e}"))?;
        if artifact.code().is_empty() {
            anyhow::bail!(
                "Artifact {} has no bytecode, is it an interface or abstract contract?",
                artifact.contract_name
            );
        }
        Ok(artifact)
    }

    pub fn load(artifacts_dir: &Path, name: &str) -> anyhow::Result<Self> {
        let path = artifact_path(artifacts_dir, name);
        tracing::info!("Loading artifact {}", path.display());
        let data = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::format_err!("Failed to read {}: {e}", path.display()))?;
        Self::parse(&data)
    }

    /// Hex bytecode without the `0x` prefix.
    pub fn code(&self) -> &str {
        self.bytecode.trim().trim_start_matches("0x")
    }
}

pub fn artifact_path(artifacts_dir: &Path, name: &str) -> PathBuf {
    artifacts_dir
        .join(format!("{name}.sol"))
        .join(format!("{name}.json"))
}

/// Publish `artifact` with constructor `params` and wait for it to be confirmed.
pub async fn deploy_contract<P: Tokenize>(
    web3s: &Web3<Http>,
    artifact: &Artifact,
    params: P,
    key: &SecretKey,
    settings: &CallSettings,
) -> anyhow::Result<Address> {
    tracing::info!("Deploying {}", artifact.contract_name);
    let abi = serde_json::to_vec(&artifact.abi)?;
    let builder = Contract::deploy(web3s.eth(), &abi)
        .map_err(|e| anyhow::format_err!("Failed to load {} abi: {e}", artifact.contract_name))?
        .confirmations(settings.confirmations)
        .options(get_options(ETH_DEPLOY_GAS_LIMIT));

    let contract = wait_with_timeout(
        &format!("deploy {}", artifact.contract_name),
        settings.timeout,
        builder.sign_with_key_and_execute(artifact.code(), params, key, None),
    )
    .await?;
    Ok(contract.address())
}

#[cfg(test)]
mod tests {
    use super::{artifact_path, Artifact};
    use serde_json::json;
    use std::path::{Path, PathBuf};

    #[test]
    fn hardhat_artifact_layout() {
        assert_eq!(
            artifact_path(Path::new("artifacts/contracts"), "MockUSDC"),
            PathBuf::from("artifacts/contracts/MockUSDC.sol/MockUSDC.json")
        );
    }

    #[test]
    fn parse_artifact() -> anyhow::Result<()> {
        let data = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "MockUSDC",
            "sourceName": "contracts/MockUSDC.sol",
            "abi": [{ "type": "constructor", "inputs": [], "stateMutability": "nonpayable" }],
            "bytecode": "0x6080604052",
            "deployedBytecode": "0x6080"
        })
        .to_string();
        let artifact = Artifact::parse(&data)?;
        assert_eq!(artifact.contract_name, "MockUSDC");
        assert_eq!(artifact.code(), "6080604052");
        assert!(artifact.abi.is_array());
        Ok(())
    }

    #[test]
    fn interface_artifact_is_rejected() {
        let data = json!({
            "contractName": "IERC20",
            "abi": [],
            "bytecode": "0x"
        })
        .to_string();
        let err = Artifact::parse(&data).unwrap_err();
        assert!(err.to_string().contains("IERC20"));
    }

    #[test]
    fn missing_artifact_names_the_path() {
        let dir = std::env::temp_dir().join("deployer-missing-artifacts");
        let err = Artifact::load(&dir, "AuraBounty").unwrap_err();
        assert!(err.to_string().contains("AuraBounty.json"));
    }
}
