use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Intrinsic attributes of a collateral unit. Both fields stay zero until the
/// collection generates them.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Attributes {
    /// Bonus, in basis points, a staked unit adds to the yearly reward rate.
    pub profit: u32,
    /// Fee discount, in percent, granted to the unit holder.
    pub fee_reduction: u32,
}

impl Attributes {
    pub fn is_generated(&self) -> bool {
        self.profit != 0 || self.fee_reduction != 0
    }
}

/// What the staking pool needs from a collateral collection: ownership and
/// approval checks, custody transfer and the profit attribute of a unit.
#[contractclient(name = "CollateralClient")]
pub trait CollateralInterface {
    fn owner_of(env: Env, token_id: u32) -> Address;

    fn query_is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;

    fn transfer(env: Env, from: Address, to: Address, token_id: u32);

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u32);

    fn query_attributes(env: Env, token_id: u32) -> Attributes;
}
