extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Env};

use super::setup::{
    deploy_funded_pool, deploy_pool_with_reward, expected_reward, set_timestamp, ONE_HOUR,
    ONE_WEEK, POOL_REWARD, START,
};
use crate::error::ContractError;

#[test]
fn earned_after_one_hour() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 5);
    deployment.generate_attributes(&user, &token_ids);
    pool.stake(&user, &token_ids);

    assert_eq!(pool.query_earned(&user), 0);

    set_timestamp(&env, START + ONE_HOUR);

    let bonus = pool.query_profit_bonus(&user);
    assert_eq!(bonus, deployment.mean_profit(&token_ids));
    assert_eq!(
        pool.query_earned(&user),
        expected_reward(5, bonus, ONE_HOUR)
    );
    // reading does not checkpoint
    assert_eq!(pool.query_user_stake(&user).stake_timestamp, START);
}

#[test]
fn claim_pays_out_accrued_reward() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 5);
    pool.stake(&user, &token_ids);

    set_timestamp(&env, START + ONE_HOUR);
    let expected = expected_reward(5, 0, ONE_HOUR);

    assert_eq!(pool.claim(&user), expected);
    assert_eq!(deployment.reward_token.balance(&user), expected);
    assert_eq!(pool.query_reward_reserve(), POOL_REWARD - expected);

    let user_stake = pool.query_user_stake(&user);
    assert_eq!(user_stake.reward, 0);
    assert_eq!(user_stake.stake_timestamp, START + ONE_HOUR);
    assert_eq!(pool.query_earned(&user), 0);

    // units stay staked and keep accruing
    set_timestamp(&env, START + 2 * ONE_HOUR);
    assert_eq!(pool.query_earned(&user), expected);
    assert_eq!(pool.query_total_staked(), 5);
}

#[test]
fn claim_with_nothing_accrued() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    assert_eq!(pool.claim(&user), 0);

    let token_ids = deployment.mint_avatars(&user, 1);
    pool.stake(&user, &token_ids);
    assert_eq!(pool.claim(&user), 0);

    assert_eq!(deployment.reward_token.balance(&user), 0);
    assert_eq!(pool.query_reward_reserve(), POOL_REWARD);
}

#[test]
fn accrual_stops_at_pool_end() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 3);
    pool.stake(&user, &token_ids);

    let full_epoch = expected_reward(3, 0, ONE_WEEK);

    set_timestamp(&env, START + ONE_WEEK);
    assert_eq!(pool.query_earned(&user), full_epoch);

    set_timestamp(&env, START + ONE_WEEK + 10 * ONE_HOUR);
    assert_eq!(pool.query_earned(&user), full_epoch);

    assert_eq!(pool.claim(&user), full_epoch);

    set_timestamp(&env, START + 2 * ONE_WEEK);
    assert_eq!(pool.query_earned(&user), 0);
    assert_eq!(pool.claim(&user), 0);
}

#[test]
fn earned_never_decreases_without_claim() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 4);
    deployment.generate_attributes(&user, &token_ids);
    pool.stake(&user, &token_ids);

    let mut previous = 0;
    for hours in [0u64, 1, 5, 24, 100, 168, 169, 500] {
        set_timestamp(&env, START + hours * ONE_HOUR);
        let earned = pool.query_earned(&user);
        assert!(earned >= previous);
        // same second, same answer
        assert_eq!(pool.query_earned(&user), earned);
        previous = earned;
    }
}

#[test]
fn claim_with_insufficient_reserve() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_pool_with_reward(&env, 0);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 5);
    pool.stake(&user, &token_ids);

    set_timestamp(&env, START + ONE_HOUR);
    assert_eq!(
        pool.try_claim(&user),
        Err(Ok(ContractError::InsufficientReserve))
    );

    // the position is left as it was
    let expected = expected_reward(5, 0, ONE_HOUR);
    assert_eq!(pool.query_user_stake(&user).reward, 0);
    assert_eq!(pool.query_earned(&user), expected);

    pool.fund_rewards(&deployment.admin, &expected);
    assert_eq!(pool.claim(&user), expected);
    assert_eq!(pool.query_reward_reserve(), 0);
}

#[test]
fn fund_rewards_tops_up_the_reserve() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;

    assert_eq!(
        pool.try_fund_rewards(&deployment.admin, &0),
        Err(Ok(ContractError::InvalidAmount))
    );

    pool.fund_rewards(&deployment.admin, &1_000);
    assert_eq!(pool.query_reward_reserve(), POOL_REWARD + 1_000);
}
