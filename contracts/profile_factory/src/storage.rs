use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, BytesN, ConversionError, Env,
    Symbol, TryFromVal, Val,
};
use zik::ttl::{
    INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
    PERSISTENT_TARGET_TTL,
};

use crate::error::ContractError;

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Admin = 0,
    ProfileCount = 1,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Wasm installed for every new profile
    pub profile_wasm_hash: BytesN<32>,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

#[contracttype]
#[derive(Clone)]
pub enum ProfileKey {
    UserProfile(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn get_config(env: &Env) -> Config {
    bump_instance(env);

    env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Factory: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    })
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    bump_instance(env);
}

pub fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);

    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| {
            log!(env, "Factory: Admin not set");
            panic_with_error!(env, ContractError::AdminNotSet)
        })
}

pub fn get_profile_count(env: &Env) -> u32 {
    bump_instance(env);

    env.storage()
        .instance()
        .get(&DataKey::ProfileCount)
        .unwrap_or(0)
}

pub fn save_profile_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ProfileCount, &count);
    bump_instance(env);
}

pub fn get_user_profile(env: &Env, user: &Address) -> Option<Address> {
    let key = ProfileKey::UserProfile(user.clone());
    let profile = env.storage().persistent().get(&key);
    if profile.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    profile
}

pub fn save_user_profile(env: &Env, user: &Address, profile: &Address) {
    let key = ProfileKey::UserProfile(user.clone());
    env.storage().persistent().set(&key, profile);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}
