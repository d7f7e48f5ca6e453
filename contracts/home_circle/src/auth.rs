//! Authorization gate evaluated at the start of every transition.
//!
//! A denial is returned before any state is read for mutation, so a rejected
//! call leaves the circle untouched.

use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::storage;
use crate::types::{CircleState, Transition};

/// Decide whether `caller` may run `transition` against the current circle.
///
/// `circle` is `None` while the circle has not been initialized.
pub fn authorize(
    env: &Env,
    caller: &Address,
    transition: Transition,
    circle: Option<&CircleState>,
) -> Result<(), ContractError> {
    caller.require_auth();

    match transition {
        Transition::Initialize => {
            require_admin(env, caller)?;
            if circle.is_some() {
                return Err(ContractError::AlreadyInitialized);
            }
            Ok(())
        }
        // Enrollment is open to anyone while the circle is accepting funds.
        Transition::Enroll => require_active(circle),
        Transition::SelectWinner => {
            require_admin(env, caller)?;
            require_active(circle)
        }
    }
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin = storage::get_admin(env).ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn require_active(circle: Option<&CircleState>) -> Result<(), ContractError> {
    match circle {
        None => Err(ContractError::NotInitialized),
        Some(circle) if !circle.is_active => Err(ContractError::CircleClosed),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use soroban_sdk::{Env, Map, Vec};

    use super::*;

    fn circle(env: &Env, is_active: bool) -> CircleState {
        CircleState {
            target_amount: 100_000,
            monthly_contribution: 1_000,
            members: Vec::new(env),
            member_contribution: Map::new(env),
            balance: 0,
            is_active,
            payout: None,
        }
    }

    #[test]
    fn test_require_active() {
        let env = Env::default();

        assert_eq!(require_active(None), Err(ContractError::NotInitialized));
        assert_eq!(
            require_active(Some(&circle(&env, false))),
            Err(ContractError::CircleClosed)
        );
        assert_eq!(require_active(Some(&circle(&env, true))), Ok(()));
    }
}
