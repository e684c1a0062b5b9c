#![no_std]
mod contract;
mod error;
mod storage;
mod utils;


pub use crate::contract::{ZikProfileFactory, ZikProfileFactoryClient};
pub use crate::error::ContractError;
