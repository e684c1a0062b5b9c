extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use super::setup::{
    deploy_funded_pool, expected_reward, set_timestamp, ONE_HOUR, ONE_WEEK, START,
};
use crate::error::ContractError;

#[test]
fn unstake_returns_units_and_freezes_reward() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 3);
    deployment.generate_attributes(&user, &token_ids);
    pool.stake(&user, &token_ids);
    let bonus = pool.query_profit_bonus(&user);

    set_timestamp(&env, START + ONE_HOUR);
    pool.unstake(&user);

    for token_id in token_ids.iter() {
        assert_eq!(deployment.avatar.owner_of(&token_id), user);
    }
    assert_eq!(deployment.avatar.balance_of(&user), 3);
    assert_eq!(pool.query_total_staked(), 0);
    assert_eq!(pool.query_balance(&user), 0);
    assert_eq!(pool.query_profit_bonus(&user), 0);

    let frozen = expected_reward(3, bonus, ONE_HOUR);
    assert_eq!(pool.query_user_stake(&user).reward, frozen);

    set_timestamp(&env, START + 5 * ONE_HOUR);
    assert_eq!(pool.query_earned(&user), frozen);

    assert_eq!(pool.claim(&user), frozen);
    assert_eq!(deployment.reward_token.balance(&user), frozen);
}

#[test]
fn unstake_with_nothing_staked() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    assert_eq!(
        pool.try_unstake(&user),
        Err(Ok(ContractError::NothingStaked))
    );

    let token_ids = deployment.mint_avatars(&user, 2);
    pool.stake(&user, &token_ids);
    pool.unstake(&user);

    assert_eq!(
        pool.try_unstake(&user),
        Err(Ok(ContractError::NothingStaked))
    );
}

#[test]
fn stake_then_unstake_immediately_earns_nothing() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 5);
    deployment.generate_attributes(&user, &token_ids);

    set_timestamp(&env, START + ONE_HOUR);
    pool.stake(&user, &token_ids);
    pool.unstake(&user);

    assert_eq!(pool.query_earned(&user), 0);
    assert_eq!(pool.claim(&user), 0);
}

#[test]
fn units_can_be_staked_again_after_unstake() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);
    let buyer = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 2);
    pool.stake(&user, &token_ids);

    set_timestamp(&env, START + ONE_HOUR);
    pool.unstake(&user);

    // the unit is free to move and be staked by its new owner
    deployment.avatar.transfer(&user, &buyer, &1);
    deployment
        .avatar
        .set_approval_for_all(&buyer, &pool.address, &true);
    pool.stake(&buyer, &vec![&env, 1u32]);
    pool.stake(&user, &vec![&env, 0u32]);

    assert_eq!(pool.query_total_staked(), 2);

    set_timestamp(&env, START + 2 * ONE_HOUR);
    assert_eq!(
        pool.query_earned(&user),
        expected_reward(2, 0, ONE_HOUR) + expected_reward(1, 0, ONE_HOUR)
    );
    assert_eq!(pool.query_earned(&buyer), expected_reward(1, 0, ONE_HOUR));
}

#[test]
fn unstake_after_pool_end() {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let deployment = deploy_funded_pool(&env);
    let pool = &deployment.pool;
    let user = Address::generate(&env);

    let token_ids = deployment.mint_avatars(&user, 2);
    pool.stake(&user, &token_ids);

    set_timestamp(&env, START + 2 * ONE_WEEK);
    pool.unstake(&user);

    assert_eq!(
        pool.query_user_stake(&user).reward,
        expected_reward(2, 0, ONE_WEEK)
    );
    assert_eq!(deployment.avatar.balance_of(&user), 2);
}
