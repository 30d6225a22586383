use async_trait::async_trait;
use common::eth::helper::parse_units;
use common::eth::token::{get_token_data, token_contract};
use common::eth::{call_function, wait_with_timeout, CallSettings};
use common::helper::abi::BOUNTY_ABI;
use web3::contract::Contract;
use web3::signing::{Key, SecretKey, SecretKeyRef};
use web3::transports::Http;
use web3::types::{Address, H256, U256};
use web3::Web3;

// Bounties are paid in USDC.
pub const TOKEN_DECIMALS: u8 = 6;
pub const REWARD_PER_UNIT: u64 = 1;
pub const TOTAL_BUDGET: u64 = 100;
pub const BOUNTY_LIFETIME_SECS: u64 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BountyParameters {
    pub reward_per_unit: U256,
    pub total_budget: U256,
    /// Unix timestamp, seconds.
    pub deadline: U256,
}

impl BountyParameters {
    pub fn at(now: u64) -> Self {
        Self {
            reward_per_unit: parse_units(REWARD_PER_UNIT, TOKEN_DECIMALS),
            total_budget: parse_units(TOTAL_BUDGET, TOKEN_DECIMALS),
            deadline: U256::from(now) + U256::from(BOUNTY_LIFETIME_SECS),
        }
    }
}

/// The two on-chain actions a bounty needs. Both return the confirmed transaction hash.
#[async_trait]
pub trait BountyChain: Send + Sync {
    /// Allow the bounty contract to spend `amount` of the token.
    async fn approve(&self, amount: U256) -> anyhow::Result<H256>;

    async fn create_bounty(&self, params: &BountyParameters) -> anyhow::Result<H256>;
}

pub struct Web3BountyChain {
    token: Contract<Http>,
    bounty: Contract<Http>,
    key: SecretKey,
    settings: CallSettings,
}

impl Web3BountyChain {
    pub fn new(
        web3s: &Web3<Http>,
        token_address: Address,
        bounty_address: Address,
        key: SecretKey,
        settings: CallSettings,
    ) -> anyhow::Result<Self> {
        let token = token_contract(web3s, token_address)?;
        let bounty_abi = web3::ethabi::Contract::load(BOUNTY_ABI.as_bytes())
            .map_err(|e| anyhow::format_err!("Failed to load bounty abi: {e}"))?;
        let bounty = Contract::new(web3s.eth(), bounty_address, bounty_abi);
        Ok(Self {
            token,
            bounty,
            key,
            settings,
        })
    }

    pub fn wallet(&self) -> Address {
        SecretKeyRef::new(&self.key).address()
    }

    /// Log what the token contract reports about itself. Failures are not fatal,
    /// the RPC endpoint may be temporarily unreachable at startup.
    pub async fn log_token_data(&self) {
        let token_data = wait_with_timeout(
            "read token data",
            self.settings.timeout,
            get_token_data(&self.token),
        )
        .await;
        match token_data {
            Ok(data) => {
                tracing::info!(
                    "Bounty token {} at {:?}, decimals {}",
                    data.symbol,
                    data.address,
                    data.decimals
                );
                if data.decimals != TOKEN_DECIMALS {
                    tracing::warn!(
                        "Token reports {} decimals, bounty amounts assume {TOKEN_DECIMALS}",
                        data.decimals
                    );
                }
            }
            Err(e) => tracing::warn!("Failed to read bounty token data: {e}"),
        }
    }

    /// `approve(spender, amount)` arguments, the spender is the bounty contract.
    fn approve_params(&self, amount: U256) -> (Address, U256) {
        (self.bounty.address(), amount)
    }
}

/// `createBounty(rewardPerKwh, totalBudget, deadline)` arguments.
fn create_params(params: &BountyParameters) -> (U256, U256, U256) {
    (params.reward_per_unit, params.total_budget, params.deadline)
}

#[async_trait]
impl BountyChain for Web3BountyChain {
    async fn approve(&self, amount: U256) -> anyhow::Result<H256> {
        let receipt = call_function(
            &self.token,
            &self.key,
            "approve",
            self.approve_params(amount),
            &self.settings,
        )
        .await?;
        Ok(receipt.transaction_hash)
    }

    async fn create_bounty(&self, params: &BountyParameters) -> anyhow::Result<H256> {
        let receipt = call_function(
            &self.bounty,
            &self.key,
            "createBounty",
            create_params(params),
            &self.settings,
        )
        .await?;
        Ok(receipt.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::{create_params, BountyParameters, Web3BountyChain};
    use common::eth::{create_web3_http, parse_secret, CallSettings};
    use common::helper::abi::{BOUNTY_ABI, ERC20_ABI};
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;
    use web3::contract::tokens::Tokenize;
    use web3::ethabi::Token;
    use web3::types::{Address, U256};

    // First default hardhat account.
    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn chain(rpc_url: &str, timeout: Duration) -> anyhow::Result<Web3BountyChain> {
        let web3s = create_web3_http(rpc_url)?;
        Web3BountyChain::new(
            &web3s,
            Address::repeat_byte(0x0a),
            Address::repeat_byte(0x0b),
            parse_secret(HARDHAT_KEY)?,
            CallSettings {
                confirmations: 1,
                timeout,
            },
        )
    }

    #[test]
    fn approve_spender_is_bounty_contract() -> anyhow::Result<()> {
        let chain = chain("http://127.0.0.1:8545", Duration::from_secs(1))?;
        let budget = BountyParameters::at(0).total_budget;
        let (spender, amount) = chain.approve_params(budget);
        assert_eq!(spender, Address::repeat_byte(0x0b));
        assert_eq!(amount, U256::from(100_000_000_u64));

        let erc20 = web3::ethabi::Contract::load(ERC20_ABI.as_bytes())?;
        let approve = erc20.function("approve")?;
        let data = approve.encode_input(&chain.approve_params(budget).into_tokens())?;
        let decoded = approve.decode_input(&data[4..])?;
        assert_eq!(
            decoded,
            vec![
                Token::Address(Address::repeat_byte(0x0b)),
                Token::Uint(U256::from(100_000_000_u64)),
            ]
        );
        Ok(())
    }

    #[test]
    fn create_bounty_arguments_in_abi_order() -> anyhow::Result<()> {
        let params = BountyParameters::at(1_700_000_000);
        let bounty = web3::ethabi::Contract::load(BOUNTY_ABI.as_bytes())?;
        let create = bounty.function("createBounty")?;
        let data = create.encode_input(&create_params(&params).into_tokens())?;
        let decoded = create.decode_input(&data[4..])?;
        assert_eq!(
            decoded,
            vec![
                Token::Uint(U256::from(1_000_000_u64)),
                Token::Uint(U256::from(100_000_000_u64)),
                Token::Uint(U256::from(1_700_001_800_u64)),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn token_data_query_gives_up_on_silent_rpc() -> anyhow::Result<()> {
        // Accepts connections but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let rpc_url = format!("http://{}", listener.local_addr()?);
        let chain = chain(&rpc_url, Duration::from_millis(200))?;

        let started = Instant::now();
        tokio::time::timeout(Duration::from_secs(5), chain.log_token_data()).await?;
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
        Ok(())
    }

    #[test]
    fn parameters_are_scaled_to_usdc() {
        let params = BountyParameters::at(1_700_000_000);
        assert_eq!(params.reward_per_unit, U256::from(1_000_000_u64));
        assert_eq!(params.total_budget, U256::from(100_000_000_u64));
        assert_eq!(params.deadline, U256::from(1_700_001_800_u64));
    }

    #[test]
    fn deadline_tracks_computation_time() {
        for now in [0_u64, 1, 86_400, u32::MAX as u64] {
            assert_eq!(BountyParameters::at(now).deadline, U256::from(now + 1800));
        }
    }
}
