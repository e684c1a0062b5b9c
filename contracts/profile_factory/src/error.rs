use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 1100,
    AdminNotSet = 1101,
    Unauthorized = 1102,
    ProfileAlreadyExists = 1103,
}
