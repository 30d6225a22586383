use chrono::Utc;
use web3::types::{H256, U256};

/// Scale a whole token amount to its smallest unit.
pub fn parse_units(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::exp10(decimals as usize)
}

pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let unit = U256::exp10(decimals as usize);
    let fraction = (value % unit).to_string();
    format!(
        "{}.{:0>width$}",
        value / unit,
        fraction,
        width = decimals as usize
    )
}

pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

pub fn tx_link(explorer_tx_url: &str, tx_hash: &H256) -> String {
    format!("{}/{:?}", explorer_tx_url.trim_end_matches('/'), tx_hash)
}

#[cfg(test)]
mod tests {
    use super::{format_units, parse_units, tx_link};
    use web3::types::{H256, U256};

    #[test]
    fn usdc_units() {
        assert_eq!(parse_units(1, 6), U256::from(1_000_000_u64));
        assert_eq!(parse_units(100, 6), U256::from(100_000_000_u64));
        assert_eq!(parse_units(7, 0), U256::from(7_u64));
    }

    #[test]
    fn units_are_formatted_with_padding() {
        assert_eq!(format_units(U256::from(100_000_000_u64), 6), "100.000000");
        assert_eq!(format_units(U256::from(1_050_u64), 6), "0.001050");
        assert_eq!(format_units(U256::from(42_u64), 0), "42");
    }

    #[test]
    fn explorer_link() {
        let hash = H256::repeat_byte(0x11);
        let expected = format!("https://sepolia.etherscan.io/tx/0x{}", "11".repeat(32));
        assert_eq!(tx_link("https://sepolia.etherscan.io/tx/", &hash), expected);
        assert_eq!(tx_link("https://sepolia.etherscan.io/tx", &hash), expected);
    }
}
