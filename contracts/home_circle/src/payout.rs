use soroban_sdk::{token, Address, Env};

use crate::auth;
use crate::circle::total_contributed;
use crate::errors::ContractError;
use crate::randomness::{self, OracleRandomness, RandomnessSource};
use crate::storage;
use crate::types::{CircleState, PayoutRecord, Transition};

/// Sends the pooled balance out of the circle.
pub trait PayoutExecutor {
    fn transfer(&self, to: &Address, amount: u64) -> Result<(), ContractError>;
}

/// [`PayoutExecutor`] paying from the contract's own token balance.
pub struct TokenPayout<'a> {
    from: Address,
    token: token::Client<'a>,
}

impl<'a> TokenPayout<'a> {
    pub fn new(env: &Env, token: &Address) -> Self {
        Self {
            from: env.current_contract_address(),
            token: token::Client::new(env, token),
        }
    }
}

impl PayoutExecutor for TokenPayout<'_> {
    fn transfer(&self, to: &Address, amount: u64) -> Result<(), ContractError> {
        match self.token.try_transfer(&self.from, to, &i128::from(amount)) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::PayoutFailed),
        }
    }
}

/// Draw a winner, pay out the whole balance and close the circle. Admin only.
pub fn select_winner(env: &Env, admin: Address) -> Result<Address, ContractError> {
    let circle = storage::get_circle(env);
    auth::authorize(env, &admin, Transition::SelectWinner, circle.as_ref())?;
    let mut circle = circle.ok_or(ContractError::NotInitialized)?;

    let oracle = storage::get_oracle(env).ok_or(ContractError::NotInitialized)?;
    let token = storage::get_token(env).ok_or(ContractError::NotInitialized)?;

    let record = settle(
        &mut circle,
        &OracleRandomness::new(env, &oracle),
        &TokenPayout::new(env, &token),
    )?;

    storage::set_circle(env, &circle);

    env.events().publish(
        (crate::symbol_short!("payout"),),
        (record.winner.clone(), record.amount),
    );
    env.events()
        .publish((crate::symbol_short!("closed"),), circle.members.len());

    Ok(record.winner)
}

/// The terminal transition over an in-memory circle.
///
/// `circle` is only written after the transfer succeeds; any `Err` leaves it
/// unchanged and the call can be retried.
pub(crate) fn settle<R, P>(
    circle: &mut CircleState,
    source: &R,
    payout: &P,
) -> Result<PayoutRecord, ContractError>
where
    R: RandomnessSource,
    P: PayoutExecutor,
{
    if !circle.is_active {
        return Err(ContractError::CircleClosed);
    }

    let count = circle.members.len();
    if count == 0 {
        return Err(ContractError::NoMembers);
    }

    // Never pay out a balance the member ledger does not account for
    if total_contributed(circle)? != circle.balance {
        return Err(ContractError::LedgerMismatch);
    }

    let index = randomness::draw_index(source, u64::from(count))?;
    let winner = u32::try_from(index)
        .ok()
        .and_then(|i| circle.members.get(i))
        .ok_or(ContractError::RandomnessUnavailable)?;

    let amount = circle.balance;
    payout.transfer(&winner, amount)?;

    let record = PayoutRecord {
        winner,
        amount,
        index,
    };
    circle.balance = 0;
    circle.is_active = false;
    circle.payout = Some(record.clone());

    Ok(record)
}
