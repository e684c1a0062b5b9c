use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Bytes, BytesN, Env, Vec};
use zik::utils::AdminChange;

use crate::{
    error::ContractError,
    storage::{
        get_data, get_owner, get_pending_owner, remove_pending_owner, save_data, save_owner,
        save_pending_owner,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Zikkie profile: key value store of ZikJob profile data"
);

#[contract]
pub struct ZikProfile;

pub trait ZikProfileTrait {
    fn __constructor(env: Env, owner: Address);

    // Stores `value` under `key`, an empty value clears the key
    fn set_data(
        env: Env,
        sender: Address,
        key: BytesN<32>,
        value: Bytes,
    ) -> Result<(), ContractError>;

    fn set_data_batch(
        env: Env,
        sender: Address,
        keys: Vec<BytesN<32>>,
        values: Vec<Bytes>,
    ) -> Result<(), ContractError>;

    fn transfer_ownership(
        env: Env,
        new_owner: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_ownership_transfer(env: Env) -> Result<(), ContractError>;

    fn accept_ownership(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn get_data(env: Env, key: BytesN<32>) -> Bytes;

    fn get_data_batch(env: Env, keys: Vec<BytesN<32>>) -> Vec<Bytes>;

    fn query_owner(env: Env) -> Address;

    fn query_pending_owner(env: Env) -> Option<AdminChange>;
}

#[contractimpl]
impl ZikProfileTrait for ZikProfile {
    fn __constructor(env: Env, owner: Address) {
        save_owner(&env, &owner);

        env.events()
            .publish(("initialize", "Zikkie profile"), owner);
    }

    fn set_data(
        env: Env,
        sender: Address,
        key: BytesN<32>,
        value: Bytes,
    ) -> Result<(), ContractError> {
        sender.require_auth();
        check_owner(&env, &sender)?;

        save_data(&env, &key, &value);

        env.events().publish(("set_data", "key"), key);

        Ok(())
    }

    fn set_data_batch(
        env: Env,
        sender: Address,
        keys: Vec<BytesN<32>>,
        values: Vec<Bytes>,
    ) -> Result<(), ContractError> {
        sender.require_auth();
        check_owner(&env, &sender)?;

        if keys.is_empty() {
            log!(&env, "Profile: Set data batch: no keys provided");
            return Err(ContractError::EmptyDataList);
        }
        if keys.len() != values.len() {
            log!(
                &env,
                "Profile: Set data batch: {} keys but {} values",
                keys.len(),
                values.len()
            );
            return Err(ContractError::DataLengthMismatch);
        }

        for (key, value) in keys.iter().zip(values.iter()) {
            save_data(&env, &key, &value);
            env.events().publish(("set_data", "key"), key);
        }

        Ok(())
    }

    fn transfer_ownership(
        env: Env,
        new_owner: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_owner = get_owner(&env);
        current_owner.require_auth();

        if current_owner == new_owner {
            log!(&env, "Profile: Transfer ownership: new owner is the current one");
            return Err(ContractError::SameOwner);
        }

        save_pending_owner(
            &env,
            &AdminChange {
                new_admin: new_owner.clone(),
                time_limit,
            },
        );

        env.events()
            .publish(("transfer_ownership", "new_owner"), &new_owner);
        env.events()
            .publish(("transfer_ownership", "time_limit"), time_limit);

        Ok(new_owner)
    }

    fn revoke_ownership_transfer(env: Env) -> Result<(), ContractError> {
        get_owner(&env).require_auth();

        let Some(owner_change) = get_pending_owner(&env) else {
            log!(&env, "Profile: Revoke ownership transfer: nothing pending");
            return Err(ContractError::NoOwnershipChangeInPlace);
        };
        remove_pending_owner(&env);

        env.events().publish(
            ("revoke_ownership_transfer", "new_owner"),
            owner_change.new_admin,
        );

        Ok(())
    }

    fn accept_ownership(env: Env) -> Result<Address, ContractError> {
        let Some(owner_change) = get_pending_owner(&env) else {
            log!(&env, "Profile: Accept ownership: nothing pending");
            return Err(ContractError::NoOwnershipChangeInPlace);
        };
        owner_change.new_admin.require_auth();

        if owner_change.is_expired(env.ledger().timestamp()) {
            log!(&env, "Profile: Accept ownership: ownership transfer expired");
            return Err(ContractError::OwnershipChangeExpired);
        }

        remove_pending_owner(&env);
        save_owner(&env, &owner_change.new_admin);

        env.events()
            .publish(("accept_ownership", "new_owner"), &owner_change.new_admin);

        Ok(owner_change.new_admin)
    }

    // QUERIES

    fn get_data(env: Env, key: BytesN<32>) -> Bytes {
        get_data(&env, &key)
    }

    fn get_data_batch(env: Env, keys: Vec<BytesN<32>>) -> Vec<Bytes> {
        let mut values = Vec::new(&env);
        for key in keys.iter() {
            values.push_back(get_data(&env, &key));
        }

        values
    }

    fn query_owner(env: Env) -> Address {
        get_owner(&env)
    }

    fn query_pending_owner(env: Env) -> Option<AdminChange> {
        get_pending_owner(&env)
    }
}

fn check_owner(env: &Env, sender: &Address) -> Result<(), ContractError> {
    if get_owner(env) != *sender {
        log!(env, "Profile: only the owner can change profile data");
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}
