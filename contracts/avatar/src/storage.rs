use core::fmt::Debug;

use soroban_sdk::{
    contracttype, log, panic_with_error, Address, Env, IntoVal, String, TryFromVal, Val, Vec,
};
use zik::{
    ttl::{
        INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    },
    Attributes,
};

use crate::error::ContractError;

/// Currencies an avatar can be paid with
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Currency {
    Native = 0,
    Stable = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payment {
    pub token: Address,
    /// Price of a single avatar, in `token` units
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Payment accepted by `mint_avatar` with `Currency::Native`
    pub native: Payment,
    /// Payment accepted by `mint_avatar` with `Currency::Stable`
    pub stable: Payment,
    /// Prefix of every token URI, the token id is appended to it
    pub base_uri: String,
    /// Total number of avatars that can ever exist
    pub max_supply: u32,
}

impl Config {
    pub fn payment(&self, currency: Currency) -> &Payment {
        match currency {
            Currency::Native => &self.native,
            Currency::Stable => &self.stable,
        }
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Admin,
    TotalSupply,
    TeamMinted,
    CurrentRound,
    Owner(u32),
    Balance(Address),
    Approval(Address, Address),
    Attributes(u32),
    RoundRequesters(u32),
    RoundTokens(u32, Address),
    RoundSize(u32),
    RoundGenerated(u32),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}

fn read_persistent<T>(env: &Env, key: &DataKey) -> Option<T>
where
    T: TryFromVal<Env, Val>,
    <T as TryFromVal<Env, Val>>::Error: Debug,
{
    let value = env.storage().persistent().get::<_, T>(key);
    if value.is_some() {
        bump_persistent(env, key);
    }

    value
}

fn write_persistent<T>(env: &Env, key: &DataKey, value: &T)
where
    T: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Config {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Avatar: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
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
            log!(env, "Avatar: Admin not set");
            panic_with_error!(env, ContractError::AdminNotSet)
        })
}

pub fn get_total_supply(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn save_total_supply(env: &Env, total_supply: u32) {
    env.storage()
        .instance()
        .set(&DataKey::TotalSupply, &total_supply);
    bump_instance(env);
}

pub fn is_team_minted(env: &Env) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TeamMinted)
        .unwrap_or(false)
}

pub fn set_team_minted(env: &Env) {
    env.storage().instance().set(&DataKey::TeamMinted, &true);
    bump_instance(env);
}

pub fn get_owner(env: &Env, token_id: u32) -> Option<Address> {
    read_persistent(env, &DataKey::Owner(token_id))
}

pub fn save_owner(env: &Env, token_id: u32, owner: &Address) {
    write_persistent(env, &DataKey::Owner(token_id), owner);
}

pub fn get_balance(env: &Env, owner: &Address) -> u32 {
    read_persistent(env, &DataKey::Balance(owner.clone())).unwrap_or(0)
}

pub fn save_balance(env: &Env, owner: &Address, balance: u32) {
    write_persistent(env, &DataKey::Balance(owner.clone()), &balance);
}

pub fn is_approved_for_all(env: &Env, owner: &Address, operator: &Address) -> bool {
    read_persistent(env, &DataKey::Approval(owner.clone(), operator.clone())).unwrap_or(false)
}

pub fn save_approval(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    let key = DataKey::Approval(owner.clone(), operator.clone());
    if approved {
        write_persistent(env, &key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn get_attributes(env: &Env, token_id: u32) -> Attributes {
    read_persistent(env, &DataKey::Attributes(token_id)).unwrap_or_default()
}

pub fn save_attributes(env: &Env, token_id: u32, attributes: &Attributes) {
    write_persistent(env, &DataKey::Attributes(token_id), attributes);
}

// Round 0 means no round was ever opened
pub fn get_current_round(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CurrentRound)
        .unwrap_or(0)
}

pub fn save_current_round(env: &Env, round: u32) {
    env.storage().instance().set(&DataKey::CurrentRound, &round);
    bump_instance(env);
}

pub fn get_round_requesters(env: &Env, round: u32) -> Vec<Address> {
    read_persistent(env, &DataKey::RoundRequesters(round)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_round_requesters(env: &Env, round: u32, requesters: &Vec<Address>) {
    write_persistent(env, &DataKey::RoundRequesters(round), requesters);
}

pub fn get_round_tokens(env: &Env, round: u32, requester: &Address) -> Vec<u32> {
    read_persistent(env, &DataKey::RoundTokens(round, requester.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_round_tokens(env: &Env, round: u32, requester: &Address, token_ids: &Vec<u32>) {
    let key = DataKey::RoundTokens(round, requester.clone());
    if token_ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        write_persistent(env, &key, token_ids);
    }
}

pub fn get_round_size(env: &Env, round: u32) -> u32 {
    read_persistent(env, &DataKey::RoundSize(round)).unwrap_or(0)
}

pub fn save_round_size(env: &Env, round: u32, size: u32) {
    write_persistent(env, &DataKey::RoundSize(round), &size);
}

pub fn is_round_generated(env: &Env, round: u32) -> bool {
    read_persistent(env, &DataKey::RoundGenerated(round)).unwrap_or(false)
}

pub fn set_round_generated(env: &Env, round: u32) {
    write_persistent(env, &DataKey::RoundGenerated(round), &true);
}
