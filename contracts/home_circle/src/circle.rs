use soroban_sdk::{Address, Env, Map, Vec};

use crate::auth;
use crate::errors::ContractError;
use crate::storage;
use crate::types::{CircleState, PayoutRecord, Transition};

/// Open the circle. Admin only, and only once per deployment.
pub fn initialize(
    env: &Env,
    admin: Address,
    target_amount: u64,
    monthly_contribution: u64,
) -> Result<(), ContractError> {
    let existing = storage::get_circle(env);
    auth::authorize(env, &admin, Transition::Initialize, existing.as_ref())?;

    let circle = new_circle(env, target_amount, monthly_contribution)?;
    storage::set_circle(env, &circle);

    env.events().publish(
        (crate::symbol_short!("init"),),
        (target_amount, monthly_contribution),
    );

    Ok(())
}

pub(crate) fn new_circle(
    env: &Env,
    target_amount: u64,
    monthly_contribution: u64,
) -> Result<CircleState, ContractError> {
    if target_amount == 0 || monthly_contribution == 0 {
        return Err(ContractError::InvalidParameter);
    }

    Ok(CircleState {
        target_amount,
        monthly_contribution,
        members: Vec::new(env),
        member_contribution: Map::new(env),
        balance: 0,
        is_active: true,
        payout: None,
    })
}

/// Sum of every member's cumulative contribution.
///
/// Equals `balance` while the circle is open and `payout.amount` after it closes.
pub(crate) fn total_contributed(circle: &CircleState) -> Result<u64, ContractError> {
    let mut total = 0u64;
    for amount in circle.member_contribution.values().iter() {
        total = total.checked_add(amount).ok_or(ContractError::Overflow)?;
    }
    Ok(total)
}

// --- Queries ---

pub fn get_circle(env: &Env) -> Result<CircleState, ContractError> {
    storage::get_circle(env).ok_or(ContractError::NotInitialized)
}

pub fn get_members(env: &Env) -> Result<Vec<Address>, ContractError> {
    Ok(get_circle(env)?.members)
}

pub fn get_contribution(env: &Env, member: Address) -> Result<u64, ContractError> {
    let circle = get_circle(env)?;
    Ok(circle.member_contribution.get(member).unwrap_or(0))
}

pub fn is_member(env: &Env, member: Address) -> Result<bool, ContractError> {
    let circle = get_circle(env)?;
    Ok(circle.member_contribution.contains_key(member))
}

pub fn get_payout(env: &Env) -> Result<Option<PayoutRecord>, ContractError> {
    Ok(get_circle(env)?.payout)
}

pub fn is_target_reached(env: &Env) -> Result<bool, ContractError> {
    let circle = get_circle(env)?;
    Ok(circle.balance >= circle.target_amount)
}
