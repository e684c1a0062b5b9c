#![no_std]
mod contract;
mod error;
mod storage;


pub use crate::contract::{ZikProfile, ZikProfileClient};
pub use crate::error::ContractError;
