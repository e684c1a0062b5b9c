#![no_std]
mod contract;
mod error;
mod storage;


pub use crate::contract::{ZikAvatar, ZikAvatarClient};
pub use crate::error::ContractError;
pub use crate::storage::{Config, Currency, Payment};

/// Units minted to the admin by `mint_team_reserve`.
pub const TEAM_RESERVE: u32 = 210;
/// Upper bound of units enrolled in a single attribute round.
pub const MAX_ROUND_SIZE: u32 = 50;
/// Inclusive range of generated profit bonuses, in basis points.
pub const PROFIT_RANGE: (u64, u64) = (100, 500);
/// Inclusive range of generated fee reductions, in percent.
pub const FEE_REDUCTION_RANGE: (u64, u64) = (1, 50);
/// Longest base URI accepted at construction.
pub const MAX_BASE_URI_LEN: u32 = 200;
