use soroban_sdk::{log, Env};

use crate::{
    error::ContractError,
    storage::{Config, UserStake},
};

pub const SECONDS_PER_YEAR: i128 = 31_556_926;
pub const BPS_SCALE: i128 = 10_000;

/// Seconds accrued since `stake_timestamp`, accrual stops at `end_time`.
pub fn accrual_period(stake_timestamp: u64, now: u64, end_time: u64) -> u64 {
    now.min(end_time).saturating_sub(stake_timestamp)
}

/// Reward earned by `units` collateral units over `elapsed` seconds.
///
/// `unit_value * units * (profit_bonus + base_rate_bps) * elapsed / SECONDS_PER_YEAR / BPS_SCALE`,
/// truncating after each division. Returns `None` on overflow.
pub fn pending_reward(
    unit_value: i128,
    units: u32,
    profit_bonus: u32,
    base_rate_bps: u32,
    elapsed: u64,
) -> Option<i128> {
    unit_value
        .checked_mul(units as i128)?
        .checked_mul(profit_bonus as i128 + base_rate_bps as i128)?
        .checked_mul(elapsed as i128)?
        .checked_div(SECONDS_PER_YEAR)?
        .checked_div(BPS_SCALE)
}

/// Truncated mean of the given profit attributes, 0 for an empty set.
pub fn mean_profit(profits: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = profits.fold((0u64, 0u64), |(sum, count), profit| {
        (sum + profit as u64, count + 1)
    });
    if count == 0 {
        return 0;
    }

    (sum / count) as u32
}

/// Total claimable reward of `user_stake` at `now`.
pub fn earned(
    env: &Env,
    config: &Config,
    user_stake: &UserStake,
    now: u64,
) -> Result<i128, ContractError> {
    let elapsed = accrual_period(user_stake.stake_timestamp, now, config.end_time);

    pending_reward(
        config.unit_value,
        user_stake.token_ids.len(),
        user_stake.profit_bonus,
        config.base_rate_bps,
        elapsed,
    )
    .and_then(|pending| user_stake.reward.checked_add(pending))
    .ok_or_else(|| {
        log!(env, "Pool: Earned: overflow while computing the reward");
        ContractError::ContractMathError
    })
}

/// Folds the reward accrued so far into `user_stake.reward` and restarts accrual from `now`.
/// Must run before `token_ids` or `profit_bonus` change.
pub fn checkpoint(
    env: &Env,
    config: &Config,
    user_stake: &mut UserStake,
    now: u64,
) -> Result<(), ContractError> {
    user_stake.reward = earned(env, config, user_stake, now)?;
    user_stake.stake_timestamp = now;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec, Address};
    use test_case::test_case;

    const WEI: i128 = 1_000_000_000_000_000_000;

    #[test_case(100, 200, 1_000, 100 ; "inside the epoch")]
    #[test_case(100, 2_000, 1_000, 900 ; "capped at the end")]
    #[test_case(1_500, 2_000, 1_000, 0 ; "checkpoint after the end")]
    #[test_case(300, 300, 1_000, 0 ; "same second")]
    fn accrual_period_cases(stake_timestamp: u64, now: u64, end_time: u64, expected: u64) {
        assert_eq!(accrual_period(stake_timestamp, now, end_time), expected);
    }

    #[test_case(25 * WEI, 5, 0, 1_000, 3_600, 1_425_994_407_693_575 ; "base rate only")]
    #[test_case(25 * WEI, 5, 300, 1_000, 3_600, 1_853_792_730_001_648 ; "with profit bonus")]
    #[test_case(25 * WEI, 3, 250, 1_000, 604_800, 179_675_295_369_390_542 ; "full week")]
    #[test_case(25 * WEI, 1, 0, 1_000, 31_556_926, 2_500_000_000_000_000_000 ; "full year at ten percent")]
    #[test_case(1, 1, 0, 1_000, 3_600, 0 ; "truncates to zero")]
    #[test_case(25 * WEI, 0, 300, 1_000, 3_600, 0 ; "no units")]
    fn pending_reward_cases(
        unit_value: i128,
        units: u32,
        profit_bonus: u32,
        base_rate_bps: u32,
        elapsed: u64,
        expected: i128,
    ) {
        assert_eq!(
            pending_reward(unit_value, units, profit_bonus, base_rate_bps, elapsed),
            Some(expected)
        );
    }

    #[test]
    fn pending_reward_overflow() {
        assert_eq!(pending_reward(i128::MAX, 2, 0, 1_000, 1), None);
    }

    #[test]
    fn mean_profit_truncates() {
        assert_eq!(mean_profit([100u32, 200, 301].into_iter()), 200);
        assert_eq!(mean_profit([500u32].into_iter()), 500);
        assert_eq!(mean_profit(core::iter::empty()), 0);
    }

    #[test]
    fn checkpoint_moves_pending_into_reward() {
        let env = Env::default();
        let config = Config {
            reward_token: Address::generate(&env),
            collateral: Address::generate(&env),
            base_rate_bps: 1_000,
            unit_value: 25 * WEI,
            start_time: 0,
            end_time: 604_800,
        };
        let mut user_stake = UserStake {
            token_ids: vec![&env, 1u32, 2, 3, 4, 5],
            stake_timestamp: 0,
            reward: 7,
            profit_bonus: 300,
        };

        assert_eq!(
            earned(&env, &config, &user_stake, 3_600),
            Ok(1_853_792_730_001_648 + 7)
        );

        checkpoint(&env, &config, &mut user_stake, 3_600).unwrap();
        assert_eq!(user_stake.reward, 1_853_792_730_001_648 + 7);
        assert_eq!(user_stake.stake_timestamp, 3_600);

        // nothing accrues twice for the same second
        assert_eq!(
            earned(&env, &config, &user_stake, 3_600),
            Ok(user_stake.reward)
        );
    }
}
