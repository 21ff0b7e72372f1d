pub mod units;

pub use units::{format_units, ETHER_DECIMALS};
