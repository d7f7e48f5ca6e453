use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidParameter = 4,
    CircleClosed = 5,
    InvalidContribution = 6,
    SecurityViolation = 7,
    NoMembers = 8,
    RandomnessUnavailable = 9,
    PayoutFailed = 10,
    Overflow = 11,
    LedgerMismatch = 12,
}
