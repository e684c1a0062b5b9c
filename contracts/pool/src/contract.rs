use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env, Vec};
use zik::{utils::AdminChange, validate_bps, validate_int_parameters, CollateralClient};

use crate::{
    accrual::{checkpoint, earned, mean_profit},
    error::ContractError,
    storage::{
        get_config, get_staked_by, get_user_stake, remove_staked_by, save_config,
        save_staked_by, save_user_stake,
        utils::{
            get_admin, get_pending_admin, get_total_staked, remove_pending_admin, save_admin,
            save_pending_admin, save_total_staked,
        },
        Config, UserStake,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Zik staking pool: time weighted rewards for staked Zikkie Avatars"
);

#[contract]
pub struct ZikPool;

pub trait ZikPoolTrait {
    // The epoch starts at deployment and lasts `duration` seconds.
    // `base_rate_bps` is the yearly rate every staked unit earns on `unit_value`.
    fn __constructor(
        env: Env,
        admin: Address,
        reward_token: Address,
        collateral: Address,
        base_rate_bps: u32,
        unit_value: i128,
        duration: u64,
    );

    // Takes custody of `token_ids` and adds them to the sender's position.
    // The pool must be an approved operator of the sender on the collateral contract.
    fn stake(env: Env, sender: Address, token_ids: Vec<u32>) -> Result<(), ContractError>;

    // Returns every staked unit to the sender. Accrued reward stays claimable.
    fn unstake(env: Env, sender: Address) -> Result<(), ContractError>;

    fn claim(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn fund_rewards(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    // Sends the whole reward reserve back to the admin once the epoch is over
    fn withdraw_reward_unused(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn query_earned(env: Env, address: Address) -> Result<i128, ContractError>;

    fn query_profit_bonus(env: Env, address: Address) -> u32;

    // Reward token value of the units staked by `address`
    fn query_balance(env: Env, address: Address) -> Result<i128, ContractError>;

    fn query_total_staked(env: Env) -> u32;

    fn query_user_stake(env: Env, address: Address) -> UserStake;

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;

    fn query_reward_reserve(env: Env) -> i128;
}

#[contractimpl]
impl ZikPoolTrait for ZikPool {
    fn __constructor(
        env: Env,
        admin: Address,
        reward_token: Address,
        collateral: Address,
        base_rate_bps: u32,
        unit_value: i128,
        duration: u64,
    ) {
        validate_bps!(base_rate_bps);
        validate_int_parameters!(unit_value, duration);

        let start_time = env.ledger().timestamp();
        let end_time = start_time.checked_add(duration).unwrap_or_else(|| {
            log!(&env, "Pool: Initialize: epoch end overflows the ledger clock");
            panic!("Pool: Initialize: duration is too long")
        });

        let config = Config {
            reward_token,
            collateral,
            base_rate_bps,
            unit_value,
            start_time,
            end_time,
        };
        save_config(&env, &config);
        save_admin(&env, &admin);
        save_total_staked(&env, 0);

        env.events()
            .publish(("initialize", "Zik staking pool"), admin);
        env.events().publish(("initialize", "end_time"), end_time);
    }

    fn stake(env: Env, sender: Address, token_ids: Vec<u32>) -> Result<(), ContractError> {
        sender.require_auth();

        if token_ids.is_empty() {
            log!(&env, "Pool: Stake: no units provided");
            return Err(ContractError::NoUnitsProvided);
        }

        let config = get_config(&env);
        let now = env.ledger().timestamp();
        if now >= config.end_time {
            log!(
                &env,
                "Pool: Stake: epoch ended at {}, now is {}",
                config.end_time,
                now
            );
            return Err(ContractError::PoolEnded);
        }

        let collateral = CollateralClient::new(&env, &config.collateral);
        let pool = env.current_contract_address();

        for (index, token_id) in token_ids.iter().enumerate() {
            let repeated = token_ids
                .iter()
                .take(index)
                .any(|previous| previous == token_id);
            if repeated || get_staked_by(&env, token_id).is_some() {
                log!(&env, "Pool: Stake: unit {} is already staked", token_id);
                return Err(ContractError::AlreadyStaked);
            }
        }

        for token_id in token_ids.iter() {
            match collateral.try_owner_of(&token_id) {
                Ok(Ok(owner)) if owner == sender => {}
                _ => {
                    log!(
                        &env,
                        "Pool: Stake: unit {} is not owned by the sender",
                        token_id
                    );
                    return Err(ContractError::UnitNotOwned);
                }
            }
        }

        if !collateral.query_is_approved_for_all(&sender, &pool) {
            log!(
                &env,
                "Pool: Stake: pool is not an approved operator of the sender"
            );
            return Err(ContractError::CollateralNotApproved);
        }

        let mut user_stake = get_user_stake(&env, &sender);
        checkpoint(&env, &config, &mut user_stake, now)?;

        for token_id in token_ids.iter() {
            collateral.transfer_from(&pool, &sender, &pool, &token_id);
            save_staked_by(&env, token_id, &sender);
            user_stake.token_ids.push_back(token_id);
        }
        user_stake.profit_bonus = mean_profit(
            user_stake
                .token_ids
                .iter()
                .map(|token_id| collateral.query_attributes(&token_id).profit),
        );
        save_user_stake(&env, &sender, &user_stake);

        let total_staked = get_total_staked(&env)
            .checked_add(token_ids.len())
            .ok_or(ContractError::ContractMathError)?;
        save_total_staked(&env, total_staked);

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "units"), token_ids.len());
        env.events()
            .publish(("stake", "profit_bonus"), user_stake.profit_bonus);

        Ok(())
    }

    fn unstake(env: Env, sender: Address) -> Result<(), ContractError> {
        sender.require_auth();

        let mut user_stake = get_user_stake(&env, &sender);
        if user_stake.token_ids.is_empty() {
            log!(&env, "Pool: Unstake: sender has nothing staked");
            return Err(ContractError::NothingStaked);
        }

        let config = get_config(&env);
        checkpoint(&env, &config, &mut user_stake, env.ledger().timestamp())?;

        let collateral = CollateralClient::new(&env, &config.collateral);
        let pool = env.current_contract_address();
        let units = user_stake.token_ids.len();
        for token_id in user_stake.token_ids.iter() {
            collateral.transfer(&pool, &sender, &token_id);
            remove_staked_by(&env, token_id);
        }
        user_stake.token_ids = Vec::new(&env);
        user_stake.profit_bonus = 0;
        save_user_stake(&env, &sender, &user_stake);

        let total_staked = get_total_staked(&env)
            .checked_sub(units)
            .ok_or(ContractError::ContractMathError)?;
        save_total_staked(&env, total_staked);

        env.events().publish(("unstake", "user"), &sender);
        env.events().publish(("unstake", "units"), units);

        Ok(())
    }

    fn claim(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let mut user_stake = get_user_stake(&env, &sender);
        checkpoint(&env, &config, &mut user_stake, env.ledger().timestamp())?;

        let amount = user_stake.reward;
        if amount == 0 {
            return Ok(0);
        }

        let reward_token = token::Client::new(&env, &config.reward_token);
        let reserve = reward_token.balance(&env.current_contract_address());
        if reserve < amount {
            log!(
                &env,
                "Pool: Claim: reserve of {} can not cover {}",
                reserve,
                amount
            );
            return Err(ContractError::InsufficientReserve);
        }

        user_stake.reward = 0;
        save_user_stake(&env, &sender, &user_stake);

        reward_token.transfer(&env.current_contract_address(), &sender, &amount);

        env.events().publish(("claim", "user"), &sender);
        env.events().publish(("claim", "amount"), amount);

        Ok(amount)
    }

    fn fund_rewards(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(&env, "Pool: Fund rewards: amount must be positive");
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        token::Client::new(&env, &config.reward_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        env.events().publish(("fund_rewards", "sender"), &sender);
        env.events().publish(("fund_rewards", "amount"), amount);

        Ok(())
    }

    fn withdraw_reward_unused(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        if get_admin(&env) != sender {
            log!(&env, "Pool: Withdraw reward unused: sender is not the admin");
            return Err(ContractError::Unauthorized);
        }

        let config = get_config(&env);
        if env.ledger().timestamp() < config.end_time {
            log!(
                &env,
                "Pool: Withdraw reward unused: epoch ends at {}",
                config.end_time
            );
            return Err(ContractError::PoolNotEnded);
        }

        let reward_token = token::Client::new(&env, &config.reward_token);
        let amount = reward_token.balance(&env.current_contract_address());
        if amount == 0 {
            log!(&env, "Pool: Withdraw reward unused: reserve is empty");
            return Err(ContractError::NoUnusedReward);
        }

        reward_token.transfer(&env.current_contract_address(), &sender, &amount);

        env.events()
            .publish(("withdraw_reward_unused", "amount"), amount);

        Ok(amount)
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Pool: Propose admin: new admin is the current one");
            return Err(ContractError::SameAdmin);
        }

        save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events()
            .publish(("propose_admin", "new_admin"), &new_admin);
        env.events()
            .publish(("propose_admin", "time_limit"), time_limit);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        get_admin(&env).require_auth();

        let Some(admin_change) = get_pending_admin(&env) else {
            log!(&env, "Pool: Revoke admin change: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        };
        remove_pending_admin(&env);

        env.events()
            .publish(("revoke_admin_change", "new_admin"), admin_change.new_admin);

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let Some(admin_change) = get_pending_admin(&env) else {
            log!(&env, "Pool: Accept admin: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        };
        admin_change.new_admin.require_auth();

        if admin_change.is_expired(env.ledger().timestamp()) {
            log!(&env, "Pool: Accept admin: admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        save_admin(&env, &admin_change.new_admin);

        env.events()
            .publish(("accept_admin", "new_admin"), &admin_change.new_admin);

        Ok(admin_change.new_admin)
    }

    // QUERIES

    fn query_earned(env: Env, address: Address) -> Result<i128, ContractError> {
        earned(
            &env,
            &get_config(&env),
            &get_user_stake(&env, &address),
            env.ledger().timestamp(),
        )
    }

    fn query_profit_bonus(env: Env, address: Address) -> u32 {
        get_user_stake(&env, &address).profit_bonus
    }

    fn query_balance(env: Env, address: Address) -> Result<i128, ContractError> {
        get_config(&env)
            .unit_value
            .checked_mul(get_user_stake(&env, &address).token_ids.len() as i128)
            .ok_or(ContractError::ContractMathError)
    }

    fn query_total_staked(env: Env) -> u32 {
        get_total_staked(&env)
    }

    fn query_user_stake(env: Env, address: Address) -> UserStake {
        get_user_stake(&env, &address)
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_reward_reserve(env: Env) -> i128 {
        let config = get_config(&env);
        token::Client::new(&env, &config.reward_token).balance(&env.current_contract_address())
    }
}
