use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 900,
    AdminNotSet = 901,
    Unauthorized = 902,
    InvalidQuantity = 903,
    MaxSupplyReached = 904,
    TeamAlreadyMinted = 905,
    TokenNotFound = 906,
    NotTokenOwner = 907,
    NotApproved = 908,
    EmptyTokenList = 909,
    NoActiveRound = 910,
    RoundFull = 911,
    RoundAlreadyGenerated = 912,
    AttributesAlreadyGenerated = 913,
    NothingToWithdraw = 914,
    ContractMathError = 915,
}
