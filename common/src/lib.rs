pub mod eth;
pub mod helper;
