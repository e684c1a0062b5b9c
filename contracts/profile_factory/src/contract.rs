use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, BytesN, Env};

use crate::{
    error::ContractError,
    storage::{
        get_admin, get_config, get_profile_count, get_user_profile, save_admin, save_config,
        save_profile_count, save_user_profile, Config,
    },
    utils::deploy_profile_contract,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "ZikJob profile factory: one Zikkie profile per user"
);

#[contract]
pub struct ZikProfileFactory;

pub trait ZikProfileFactoryTrait {
    fn __constructor(env: Env, admin: Address, profile_wasm_hash: BytesN<32>);

    // Deploys a profile owned by the sender and records it as the sender's profile
    fn create_profile(env: Env, sender: Address) -> Result<Address, ContractError>;

    // Profiles created afterwards run the new wasm, existing ones are left as they are
    fn update_profile_wasm_hash(
        env: Env,
        sender: Address,
        profile_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError>;

    // QUERIES

    fn query_profile(env: Env, user: Address) -> Option<Address>;

    fn query_profile_count(env: Env) -> u32;

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;
}

#[contractimpl]
impl ZikProfileFactoryTrait for ZikProfileFactory {
    fn __constructor(env: Env, admin: Address, profile_wasm_hash: BytesN<32>) {
        save_config(&env, &Config { profile_wasm_hash });
        save_admin(&env, &admin);
        save_profile_count(&env, 0);

        env.events()
            .publish(("initialize", "ZikJob profile factory"), admin);
    }

    fn create_profile(env: Env, sender: Address) -> Result<Address, ContractError> {
        sender.require_auth();

        if let Some(profile) = get_user_profile(&env, &sender) {
            log!(
                &env,
                "Factory: Create profile: user already owns profile {}",
                profile
            );
            return Err(ContractError::ProfileAlreadyExists);
        }

        let profile =
            deploy_profile_contract(&env, get_config(&env).profile_wasm_hash, &sender);
        save_user_profile(&env, &sender, &profile);
        save_profile_count(&env, get_profile_count(&env) + 1);

        env.events().publish(("create_profile", "user"), &sender);
        env.events().publish(("create_profile", "profile"), &profile);

        Ok(profile)
    }

    fn update_profile_wasm_hash(
        env: Env,
        sender: Address,
        profile_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        if get_admin(&env) != sender {
            log!(&env, "Factory: Update profile wasm hash: sender is not the admin");
            return Err(ContractError::Unauthorized);
        }

        save_config(
            &env,
            &Config {
                profile_wasm_hash: profile_wasm_hash.clone(),
            },
        );

        env.events()
            .publish(("update_profile_wasm_hash", "hash"), profile_wasm_hash);

        Ok(())
    }

    // QUERIES

    fn query_profile(env: Env, user: Address) -> Option<Address> {
        get_user_profile(&env, &user)
    }

    fn query_profile_count(env: Env) -> u32 {
        get_profile_count(&env)
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }
}
