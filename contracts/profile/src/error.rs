use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    OwnerNotSet = 1000,
    Unauthorized = 1001,
    EmptyDataList = 1002,
    DataLengthMismatch = 1003,
    SameOwner = 1004,
    NoOwnershipChangeInPlace = 1005,
    OwnershipChangeExpired = 1006,
}
