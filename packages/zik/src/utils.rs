use soroban_sdk::{contracttype, Address};

pub const MIN_BPS: i64 = 0;
pub const MAX_BPS: i64 = 10_000;

// Validate that every value is a positive integer
#[macro_export]
macro_rules! validate_int_parameters {
    ($($arg:expr),*) => {
        {
            $(
                let value: i128 = $arg as i128;
                if value <= 0 {
                    panic!("value cannot be less than or equal zero")
                }
            )*
        }
    };
}

// Validate that every value is a basis point amount between 0 and 100%
#[macro_export]
macro_rules! validate_bps {
    ($($value:expr),+) => {
        $(
            let value = $value as i64;
            if !($crate::utils::MIN_BPS..=$crate::utils::MAX_BPS).contains(&value) {
                panic!(
                    "The value {} is out of range. Must be between {} and {} bps.",
                    value,
                    $crate::utils::MIN_BPS,
                    $crate::utils::MAX_BPS
                );
            }
        )+
    };
}

/// Pending two-step admin handover. `time_limit` is the last ledger timestamp at
/// which the proposed admin may still accept.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.time_limit, Some(limit) if now > limit)
    }
}
