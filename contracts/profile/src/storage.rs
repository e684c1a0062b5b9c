use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, Bytes, BytesN, ConversionError,
    Env, Symbol, TryFromVal, Val,
};
use zik::{
    ttl::{
        INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    },
    utils::AdminChange,
};

use crate::error::ContractError;

pub const PENDING_OWNER: Symbol = symbol_short!("p_owner");

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Owner = 0,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

#[contracttype]
#[derive(Clone)]
pub enum ProfileKey {
    Data(BytesN<32>),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

pub fn save_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Address {
    bump_instance(env);

    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .unwrap_or_else(|| {
            log!(env, "Profile: Owner not set");
            panic_with_error!(env, ContractError::OwnerNotSet)
        })
}

pub fn get_pending_owner(env: &Env) -> Option<AdminChange> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn save_pending_owner(env: &Env, owner_change: &AdminChange) {
    env.storage().instance().set(&PENDING_OWNER, owner_change);
    bump_instance(env);
}

pub fn remove_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

/// Empty when nothing is stored under `key`.
pub fn get_data(env: &Env, key: &BytesN<32>) -> Bytes {
    let key = ProfileKey::Data(key.clone());
    match env.storage().persistent().get(&key) {
        Some(value) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_RENEWAL_THRESHOLD,
                PERSISTENT_TARGET_TTL,
            );
            value
        }
        None => Bytes::new(env),
    }
}

/// Writing an empty value removes the entry.
pub fn save_data(env: &Env, key: &BytesN<32>, value: &Bytes) {
    let key = ProfileKey::Data(key.clone());
    if value.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }

    env.storage().persistent().set(&key, value);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}
