mod deploy;

use crate::deploy::{deploy_contract, Artifact};
use common::eth::{create_web3_http, get_secret, CallSettings};
use common::helper::tracing::init_default_tracing;
use common::helper::{get_env, get_env_or};
use std::path::PathBuf;
use web3::signing::{Key, SecretKeyRef};

const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";
const TOKEN_CONTRACT: &str = "MockUSDC";
const BOUNTY_CONTRACT: &str = "AuraBounty";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_default_tracing();

    let web3s = create_web3_http(&get_env("RPC_URL")?)?;
    let key = get_secret()?;
    let settings = CallSettings::from_env();
    let artifacts_dir: PathBuf = get_env_or("ARTIFACTS_DIR", PathBuf::from(DEFAULT_ARTIFACTS_DIR));

    let token_artifact = Artifact::load(&artifacts_dir, TOKEN_CONTRACT)?;
    let bounty_artifact = Artifact::load(&artifacts_dir, BOUNTY_CONTRACT)?;

    let chain_id = web3s
        .eth()
        .chain_id()
        .await
        .map_err(|e| anyhow::format_err!("Failed to get chain id: {e}"))?;
    tracing::info!(
        "Deploying contracts to chain {chain_id} from {:?}",
        SecretKeyRef::new(&key).address()
    );

    let token_address = deploy_contract(&web3s, &token_artifact, (), &key, &settings).await?;
    println!("{TOKEN_CONTRACT} deployed to: {token_address:?}");

    let bounty_address =
        deploy_contract(&web3s, &bounty_artifact, token_address, &key, &settings).await?;
    println!("{BOUNTY_CONTRACT} deployed to: {bounty_address:?}");

    println!();
    println!("Add these to your .env file:");
    println!("USDC_ADDRESS={token_address:?}");
    println!("CONTRACT_ADDRESS={bounty_address:?}");
    Ok(())
}
