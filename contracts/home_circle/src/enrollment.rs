use soroban_sdk::{token, Env};

use crate::auth;
use crate::errors::ContractError;
use crate::storage;
use crate::types::{CircleState, Payment, Transition};

/// Enroll `payment.sender` (or top up an existing member) by pulling exactly
/// one monthly contribution into the circle.
pub fn enroll(env: &Env, payment: Payment) -> Result<(), ContractError> {
    let circle = storage::get_circle(env);
    auth::authorize(env, &payment.sender, Transition::Enroll, circle.as_ref())?;
    let mut circle = circle.ok_or(ContractError::NotInitialized)?;

    let member_total = apply_payment(&mut circle, &payment)?;

    // Collect the payment in the same invocation as the state change
    let token_addr = storage::get_token(env).ok_or(ContractError::NotInitialized)?;
    let token_client = token::Client::new(env, &token_addr);
    token_client.transfer(
        &payment.sender,
        &env.current_contract_address(),
        &i128::from(payment.amount),
    );

    storage::set_circle(env, &circle);

    env.events().publish(
        (crate::symbol_short!("enroll"),),
        (payment.sender, payment.amount, member_total),
    );

    Ok(())
}

/// Validate `payment` against the circle and credit it.
///
/// Every check runs before the first write, so an `Err` leaves `circle`
/// exactly as it was. Returns the member's new cumulative contribution.
pub(crate) fn apply_payment(
    circle: &mut CircleState,
    payment: &Payment,
) -> Result<u64, ContractError> {
    if !circle.is_active {
        return Err(ContractError::CircleClosed);
    }
    if payment.amount != circle.monthly_contribution {
        return Err(ContractError::InvalidContribution);
    }
    if payment.rekey.is_some() {
        return Err(ContractError::SecurityViolation);
    }

    let balance = circle
        .balance
        .checked_add(payment.amount)
        .ok_or(ContractError::Overflow)?;
    let previous = circle.member_contribution.get(payment.sender.clone());
    let member_total = match previous {
        Some(paid) => paid
            .checked_add(payment.amount)
            .ok_or(ContractError::Overflow)?,
        None => payment.amount,
    };

    if previous.is_none() {
        circle.members.push_back(payment.sender.clone());
    }
    circle
        .member_contribution
        .set(payment.sender.clone(), member_total);
    circle.balance = balance;

    Ok(member_total)
}

#[cfg(test)]
mod tests {
    use soroban_sdk::{testutils::Address as _, Address, Env};

    use super::*;
    use crate::circle::{new_circle, total_contributed};

    fn payment(sender: &Address, amount: u64) -> Payment {
        Payment {
            sender: sender.clone(),
            amount,
            rekey: None,
        }
    }

    #[test]
    fn test_first_payment_appends_member() {
        let env = Env::default();
        let mut circle = new_circle(&env, 100_000, 1_000).unwrap();
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        assert_eq!(apply_payment(&mut circle, &payment(&alice, 1_000)), Ok(1_000));
        assert_eq!(apply_payment(&mut circle, &payment(&bob, 1_000)), Ok(1_000));

        assert_eq!(circle.balance, 2_000);
        assert_eq!(circle.members.len(), 2);
        assert_eq!(circle.members.get(0), Some(alice));
        assert_eq!(circle.members.get(1), Some(bob));
        assert_eq!(total_contributed(&circle), Ok(circle.balance));
    }

    #[test]
    fn test_repeat_payment_tops_up() {
        let env = Env::default();
        let mut circle = new_circle(&env, 100_000, 1_000).unwrap();
        let alice = Address::generate(&env);

        apply_payment(&mut circle, &payment(&alice, 1_000)).unwrap();
        assert_eq!(apply_payment(&mut circle, &payment(&alice, 1_000)), Ok(2_000));

        assert_eq!(circle.members.len(), 1);
        assert_eq!(circle.member_contribution.get(alice), Some(2_000));
        assert_eq!(circle.balance, 2_000);
    }

    #[test]
    fn test_wrong_amount_leaves_circle_untouched() {
        let env = Env::default();
        let mut circle = new_circle(&env, 100_000, 1_000).unwrap();
        let alice = Address::generate(&env);
        let before = circle.clone();

        assert_eq!(
            apply_payment(&mut circle, &payment(&alice, 999)),
            Err(ContractError::InvalidContribution)
        );
        assert_eq!(
            apply_payment(&mut circle, &payment(&alice, 1_001)),
            Err(ContractError::InvalidContribution)
        );
        assert_eq!(circle, before);
    }

    #[test]
    fn test_rekey_is_rejected() {
        let env = Env::default();
        let mut circle = new_circle(&env, 100_000, 1_000).unwrap();
        let alice = Address::generate(&env);
        let before = circle.clone();

        let mut rekeyed = payment(&alice, 1_000);
        rekeyed.rekey = Some(Address::generate(&env));

        assert_eq!(
            apply_payment(&mut circle, &rekeyed),
            Err(ContractError::SecurityViolation)
        );
        assert_eq!(circle, before);
    }

    #[test]
    fn test_closed_circle_checked_before_amount() {
        let env = Env::default();
        let mut circle = new_circle(&env, 100_000, 1_000).unwrap();
        circle.is_active = false;
        let alice = Address::generate(&env);

        assert_eq!(
            apply_payment(&mut circle, &payment(&alice, 5)),
            Err(ContractError::CircleClosed)
        );
    }

    #[test]
    fn test_balance_overflow() {
        let env = Env::default();
        let mut circle = new_circle(&env, u64::MAX, u64::MAX).unwrap();
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        apply_payment(&mut circle, &payment(&alice, u64::MAX)).unwrap();
        let before = circle.clone();

        assert_eq!(
            apply_payment(&mut circle, &payment(&bob, u64::MAX)),
            Err(ContractError::Overflow)
        );
        assert_eq!(circle, before);
    }
}
