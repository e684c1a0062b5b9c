#![no_std]
mod accrual;
mod contract;
mod error;
mod storage;


pub use crate::contract::{ZikPool, ZikPoolClient};
pub use crate::error::ContractError;
