macro_rules! abi {
    ($file: expr) => {
        include_str!($file)
    };
}

pub static ERC20_ABI: &str = abi!("../../../resources/erc20.abi.json");
pub static BOUNTY_ABI: &str = abi!("../../../resources/bounty.abi.json");
