use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol, Vec};
use zik::ttl::{
    INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
    PERSISTENT_TARGET_TTL,
};

use crate::error::ContractError;

pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token paid out as reward
    pub reward_token: Address,
    /// Collection whose units are staked
    pub collateral: Address,
    /// Annual reward rate every staked unit earns, in bps of `unit_value`
    pub base_rate_bps: u32,
    /// Reward token amount credited per staked unit
    pub unit_value: i128,
    pub start_time: u64,
    /// No reward accrues past this timestamp and no new stake is accepted
    pub end_time: u64,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

    env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Pool: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    })
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    /// Collateral units held in custody for the user
    pub token_ids: Vec<u32>,
    /// Time of the last checkpoint, accrual restarts from here
    pub stake_timestamp: u64,
    /// Reward accrued up to `stake_timestamp` and not yet claimed
    pub reward: i128,
    /// Mean profit attribute of `token_ids`, in bps
    pub profit_bonus: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum StakeKey {
    Position(Address),
    StakedBy(u32),
}

fn bump_persistent(env: &Env, key: &StakeKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}

pub fn get_user_stake(env: &Env, user: &Address) -> UserStake {
    let key = StakeKey::Position(user.clone());
    match env.storage().persistent().get::<_, UserStake>(&key) {
        Some(user_stake) => {
            bump_persistent(env, &key);
            user_stake
        }
        None => UserStake {
            token_ids: Vec::new(env),
            stake_timestamp: 0,
            reward: 0,
            profit_bonus: 0,
        },
    }
}

pub fn save_user_stake(env: &Env, user: &Address, user_stake: &UserStake) {
    let key = StakeKey::Position(user.clone());
    env.storage().persistent().set(&key, user_stake);
    bump_persistent(env, &key);
}

pub fn get_staked_by(env: &Env, token_id: u32) -> Option<Address> {
    let key = StakeKey::StakedBy(token_id);
    let staker = env.storage().persistent().get(&key);
    if staker.is_some() {
        bump_persistent(env, &key);
    }

    staker
}

pub fn save_staked_by(env: &Env, token_id: u32, staker: &Address) {
    let key = StakeKey::StakedBy(token_id);
    env.storage().persistent().set(&key, staker);
    bump_persistent(env, &key);
}

pub fn remove_staked_by(env: &Env, token_id: u32) {
    env.storage()
        .persistent()
        .remove(&StakeKey::StakedBy(token_id));
}

pub mod utils {
    use super::*;

    use soroban_sdk::{ConversionError, TryFromVal, Val};
    use zik::utils::AdminChange;

    #[derive(Clone, Copy)]
    #[repr(u32)]
    pub enum DataKey {
        Admin = 0,
        TotalStaked = 1,
    }

    impl TryFromVal<Env, DataKey> for Val {
        type Error = ConversionError;

        fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
            Ok((*v as u32).into())
        }
    }

    fn bump_instance(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&DataKey::Admin, address);
        bump_instance(e);
    }

    pub fn get_admin(e: &Env) -> Address {
        bump_instance(e);

        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| {
                log!(e, "Pool: Admin not set");
                panic_with_error!(e, ContractError::AdminNotSet)
            })
    }

    pub fn get_total_staked(e: &Env) -> u32 {
        bump_instance(e);

        e.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0)
    }

    pub fn save_total_staked(e: &Env, total: u32) {
        e.storage().instance().set(&DataKey::TotalStaked, &total);
        bump_instance(e);
    }

    pub fn get_pending_admin(e: &Env) -> Option<AdminChange> {
        e.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn save_pending_admin(e: &Env, admin_change: &AdminChange) {
        e.storage().instance().set(&PENDING_ADMIN, admin_change);
        bump_instance(e);
    }

    pub fn remove_pending_admin(e: &Env) {
        e.storage().instance().remove(&PENDING_ADMIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_get_admin_failure() {
        let env = Env::default();
        let _ = utils::get_admin(&env);
    }

    #[test]
    #[should_panic]
    fn test_get_config_failure() {
        let env = Env::default();
        let _ = get_config(&env);
    }
}
