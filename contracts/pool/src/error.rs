use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyStaked = 800,
    NothingStaked = 801,
    PoolEnded = 802,
    PoolNotEnded = 803,
    NoUnusedReward = 804,
    InsufficientReserve = 805,
    NoUnitsProvided = 806,
    UnitNotOwned = 807,
    CollateralNotApproved = 808,
    Unauthorized = 809,
    InvalidAmount = 810,
    ContractMathError = 811,
    ConfigNotSet = 812,
    AdminNotSet = 813,
    SameAdmin = 814,
    NoAdminChangeInPlace = 815,
    AdminChangeExpired = 816,
}
