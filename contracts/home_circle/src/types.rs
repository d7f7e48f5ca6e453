use soroban_sdk::{contracttype, Address, Map, Vec};

/// Persisted state of the savings circle.
///
/// `target_amount` and `monthly_contribution` are written by `initialize`
/// and never touched again. `members` is append-only in enrollment order.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CircleState {
    pub target_amount: u64,
    pub monthly_contribution: u64,
    pub members: Vec<Address>,
    pub member_contribution: Map<Address, u64>,
    pub balance: u64,
    pub is_active: bool,
    pub payout: Option<PayoutRecord>,
}

/// Outcome of the draw, kept for audit after the circle closes.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PayoutRecord {
    pub winner: Address,
    pub amount: u64,
    pub index: u64,
}

/// Payment bundled with an enrollment call.
///
/// `rekey` must be `None`: a payment that also hands authority over the
/// paying account to someone else is rejected.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Payment {
    pub sender: Address,
    pub amount: u64,
    pub rekey: Option<Address>,
}

/// The three state transitions a caller can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Initialize,
    Enroll,
    SelectWinner,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    Oracle,
    Circle,
}
