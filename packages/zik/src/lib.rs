#![no_std]

pub mod collateral;
pub mod ttl;
pub mod utils;

pub use collateral::{Attributes, CollateralClient, CollateralInterface};
