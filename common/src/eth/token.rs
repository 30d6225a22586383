use crate::helper::abi::ERC20_ABI;
use web3::contract::{Contract, Options};
use web3::types::Address;
use web3::{Transport, Web3};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub symbol: String,
    pub decimals: u8,
    pub address: Address,
}

pub fn token_contract<T: Transport>(
    web3s: &Web3<T>,
    address: Address,
) -> anyhow::Result<Contract<T>> {
    let abi = web3::ethabi::Contract::load(ERC20_ABI.as_bytes())
        .map_err(|e| anyhow::format_err!("Failed to load erc20 abi: {e}"))?;
    Ok(Contract::new(web3s.eth(), address, abi))
}

pub async fn get_token_data<T: Transport>(token: &Contract<T>) -> anyhow::Result<TokenData> {
    let symbol: String = token
        .query("symbol", (), None, Options::default(), None)
        .await
        .map_err(|e| anyhow::format_err!("Failed to query token symbol: {e}"))?;

    let decimals: u8 = token
        .query("decimals", (), None, Options::default(), None)
        .await
        .map_err(|e| anyhow::format_err!("Failed to query token decimals: {e}"))?;

    Ok(TokenData {
        symbol,
        decimals,
        address: token.address(),
    })
}
